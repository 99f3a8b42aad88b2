//! Common crate, containing types describing artifacts produced by
//! webroot-pack-packer, shared with anything that reads them back.
//!
//! A build produces two artifacts:
//! - the object blob (`webroot.objdb`), a raw concatenation of unique file
//!   contents, each located by an [range::ObjectRange],
//! - the name index (`webroot.h`), a C source table of [name_entry::NameEntry]
//!   records ordered by [uri::sort_key], to be compiled into the target
//!   program and searched with binary search.

#![warn(missing_docs)]

pub mod name_entry;
pub mod range;
pub mod uri;

/// Default file name of the object blob.
pub const OBJECT_DB_FILE_NAME: &str = "webroot.objdb";
/// Default file name of the name index.
pub const NAME_DB_FILE_NAME: &str = "webroot.h";
/// Default path of the object served for uris that cannot be resolved.
pub const NOT_FOUND_PATH: &str = "./404.html";
/// Default document looked up when uri resolves to a directory.
pub const INDEX_DOCUMENT: &str = "index.html";
