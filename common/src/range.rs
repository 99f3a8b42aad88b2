//! Object range, a location of a single object inside the object blob.

use std::ops::Range;

/// Byte range of one stored object inside the object blob (`objdb`).
///
/// Objects are stored back to back with no headers or padding, so
/// `blob[offset..offset + length]` is exactly the content of the source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObjectRange {
    /// Position of the first byte of the object, counted from blob start.
    pub offset: u64,
    /// Number of bytes of the object.
    pub length: u64,
}
impl ObjectRange {
    /// Position of the first byte after the object.
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    /// Slices `blob` to contents of this object. Returns [None] if range
    /// exceeds blob, which means blob and index do not belong together.
    ///
    /// # Examples
    ///
    /// ```
    /// # use webroot_pack_common::range::ObjectRange;
    /// #
    /// let blob = b"abcdef";
    /// let range = ObjectRange { offset: 2, length: 3 };
    /// assert_eq!(range.slice(blob), Some(&b"cde"[..]));
    /// assert_eq!(ObjectRange { offset: 4, length: 3 }.slice(blob), None);
    /// ```
    pub fn slice<'b>(
        &self,
        blob: &'b [u8],
    ) -> Option<&'b [u8]> {
        blob.get(self.as_usize_range()?)
    }

    fn as_usize_range(&self) -> Option<Range<usize>> {
        let start = usize::try_from(self.offset).ok()?;
        let end = usize::try_from(self.end()).ok()?;
        Some(start..end)
    }
}
