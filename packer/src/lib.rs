//! webroot-pack-packer builds a static, deduplicated content store out of a
//! web root directory and a list of request uris. The result is meant to be
//! compiled into a native http server that has no file system access at run
//! time.
//!
//! Build produces two artifacts:
//! - `webroot.objdb`, the object blob: contents of every unique file
//!   concatenated, smallest first, without any headers or padding,
//! - `webroot.h`, the name index: C initializers `{ { .v_ptr, .v_len },
//!   .f_ofs, .f_len }` mapping each uri to a byte range of the blob, ordered
//!   by uri length, then text, ready for binary search.
//!
//! Files are deduplicated by identity (device and inode), so hard links and
//! different uris resolving to the same file are stored once. Uris that can't
//! be resolved point at the not-found object (`./404.html` by default).
//!
//! # Using as a standalone application
//!
//! `webroot-pack-packer` provides up to date documentation with `$
//! webroot-pack-packer --help`. Uris are read from stdin, one per line:
//! ```text
//! $ printf '/\n/img/logo.png\n/missing\n' | webroot-pack-packer ./public
//! ```
//! creates `webroot.objdb` and `webroot.h` in the current directory. Add
//! `--scan` to pack every file in web root instead of reading stdin.
//!
//! # Using as a library
//! The build is run by [driver::Driver], owning [resolve::PathResolver],
//! [object_store::ObjectStore] and [name_index::NameIndex]. Register all uris
//! first, then call [driver::Driver::finish].
//!
//! ```no_run
//! # use anyhow::Error;
//! # use std::path::PathBuf;
//! # use webroot_pack_packer::{
//! #     driver::Driver,
//! #     name_index::{IndexFormat, NameIndex},
//! #     object_store::ObjectStore,
//! #     output::OutputPaths,
//! #     resolve::{PathResolver, ResolveOptions},
//! # };
//!
//! # fn main() -> Result<(), Error> {
//! let mut driver = Driver::new(
//!     PathResolver::new(PathBuf::from("public"), ResolveOptions::default()),
//!     ObjectStore::new(),
//!     NameIndex::new(),
//! );
//!
//! driver.register_all(["/", "/img/logo.png", "/missing"])?;
//!
//! let summary = driver.finish(&OutputPaths::default(), &IndexFormat::default())?;
//! assert_eq!(summary.uri_count, 3);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::new_without_default)]
#![warn(missing_docs)]

pub use webroot_pack_common as common;

pub mod driver;
pub mod error;
pub mod name_index;
pub mod object;
pub mod object_store;
pub mod output;
pub mod resolve;
pub mod scan;
