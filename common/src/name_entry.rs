//! Name entry, a single record of the name index (`webroot.h`).

use crate::{range::ObjectRange, uri::Uri};
use std::fmt;

/// Name of the field holding uri text pointer.
pub const FIELD_URI_PTR: &str = "v_ptr";
/// Name of the field holding uri text length.
pub const FIELD_URI_LEN: &str = "v_len";
/// Name of the field holding object offset in the blob.
pub const FIELD_OBJECT_OFFSET: &str = "f_ofs";
/// Name of the field holding object length.
pub const FIELD_OBJECT_LENGTH: &str = "f_len";

/// Name of the C struct that a single [NameEntry] initializes.
pub const ENTRY_STRUCT_NAME: &str = "webroot_name";

/// Single record of the name index: uri and the range of object it resolves
/// to.
///
/// [fmt::Display] renders the entry as a C struct initializer:
/// ```text
///     { { .v_ptr = "/index.html",
///         .v_len = 11 },
///         .f_ofs = 0, .f_len = 500 },
/// ```
/// The uri and its length are grouped (they form a `struct ro_vec` on the
/// native side), followed by object offset and length.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameEntry {
    /// Request path.
    pub uri: Uri,
    /// Location of the content served for this uri.
    pub range: ObjectRange,
}
impl fmt::Display for NameEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "\t{{ {{ .{} = {},",
            FIELD_URI_PTR,
            c_string_literal(self.uri.as_bytes())
        )?;
        writeln!(f, "\t\t.{} = {} }},", FIELD_URI_LEN, self.uri.len())?;
        writeln!(
            f,
            "\t\t.{} = {}, .{} = {} }},",
            FIELD_OBJECT_OFFSET, self.range.offset, FIELD_OBJECT_LENGTH, self.range.length
        )?;
        Ok(())
    }
}

/// Renders `bytes` as a double quoted C string literal.
///
/// Printable ascii is copied as is, except `"` and `\` which are backslash
/// escaped. Everything else is written as three digit octal escape, which
/// can't swallow a following digit the way `\x` escapes do.
///
/// # Examples
///
/// ```
/// # use webroot_pack_common::name_entry::c_string_literal;
/// #
/// assert_eq!(c_string_literal(b"/a\"b"), r#""/a\"b""#);
/// assert_eq!(c_string_literal("/\u{e9}1".as_bytes()), r#""/\303\2511""#);
/// ```
pub fn c_string_literal(bytes: &[u8]) -> String {
    let mut literal = String::with_capacity(bytes.len() + 2);
    literal.push('"');
    for &byte in bytes {
        match byte {
            b'"' => literal.push_str("\\\""),
            b'\\' => literal.push_str("\\\\"),
            // `?` is escaped too, to never form a trigraph
            b'?' => literal.push_str("\\?"),
            0x20..=0x7e => literal.push(byte as char),
            _ => literal.push_str(&format!("\\{:03o}", byte)),
        }
    }
    literal.push('"');
    literal
}
