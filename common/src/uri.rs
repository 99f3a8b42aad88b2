//! Uri contains custom type for representing request path registered in the
//! name index, together with the ordering the index is emitted in.

use std::{borrow::Borrow, cmp::Ordering, ops::Deref};

/// [Uri] represents a request path, exactly as it was given to the packer (eg.
/// `/img/logo.png`). It will correspond to http request path directly.
///
/// [Uri] deliberately does not implement [Ord]. Name index order is not the
/// natural string order, use [sort_key] or [compare] instead.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Uri {
    inner: String,
}
impl Uri {
    /// Construct uri from string representation. No validation is performed,
    /// text is stored byte for byte.
    pub fn from_string(inner: String) -> Self {
        Self { inner }
    }

    /// Returns uri text.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Consumes [self], returning uri text.
    pub fn into_string(self) -> String {
        self.inner
    }
}

// to allow searching in HashMap directly by uri text
impl Deref for Uri {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl Borrow<str> for Uri {
    fn borrow(&self) -> &str {
        self.inner.as_str()
    }
}

/// Sort key of the name index: shorter uris go first, uris of equal length are
/// ordered lexicographically (by bytes).
///
/// The consumer of the index performs binary search using the same ordering,
/// so it must never change.
///
/// # Examples
///
/// ```
/// # use webroot_pack_common::uri::compare;
/// #
/// let mut uris = vec!["/index.html", "/b", "/", "/a"];
/// uris.sort_by(|a, b| compare(a, b));
/// assert_eq!(uris, vec!["/", "/a", "/b", "/index.html"]);
/// ```
pub fn sort_key(uri: &str) -> (usize, &[u8]) {
    (uri.len(), uri.as_bytes())
}

/// Compares two uris according to [sort_key].
pub fn compare(
    a: &str,
    b: &str,
) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}
