//! raw table bytes

use std::ops::{Range, RangeBounds};

use bytemuck::AnyBitPattern;
use crate::types::{FixedSize, Scalar};

use crate::read::{ReadError, TableRead};

/// A bounds-checked view over a contiguous run of font bytes.
///
/// A segment never owns its bytes; it borrows them from the single font blob
/// that outlives the whole lookup graph. Every read is checked against the
/// segment length, so a corrupt offset produces [`ReadError::OutOfBounds`]
/// rather than an out-of-range access.
///
/// In addition to the byte slice, a segment remembers its `origin`: the byte
/// offset of its first byte within the font blob. Sub-slicing keeps the origin
/// up to date, which lets diagnostics report absolute file positions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    bytes: &'a [u8],
    origin: u32,
}

/// A cursor for reading consecutive fields of a table.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cursor<'a> {
    pos: usize,
    data: Segment<'a>,
}

impl<'a> Segment<'a> {
    /// Empty data, useful for some tests and error paths.
    pub const EMPTY: Segment<'static> = Segment {
        bytes: &[],
        origin: 0,
    };

    /// Create a new `Segment` rooted at the start of `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Segment { bytes, origin: 0 }
    }

    pub(crate) const fn with_origin(bytes: &'a [u8], origin: u32) -> Self {
        Segment { bytes, origin }
    }

    /// The length of the segment, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the segment has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The byte offset of this segment within the font blob.
    pub fn origin(&self) -> u32 {
        self.origin
    }

    /// Returns the sub-segment starting at `pos`, i.e. `self[pos..]`.
    ///
    /// This is the basic navigation step: resolving an offset field means
    /// jumping to the offset's target within the segment the offset is
    /// relative to.
    pub fn jump(&self, pos: usize) -> Option<Segment<'a>> {
        let bytes = self.bytes.get(pos..)?;
        Some(Segment {
            bytes,
            origin: self.origin.saturating_add(pos as u32),
        })
    }

    /// Returns `self[range]` as a new segment.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<Segment<'a>> {
        let start = match range.start_bound() {
            std::ops::Bound::Included(&n) => n,
            std::ops::Bound::Excluded(&n) => n.checked_add(1)?,
            std::ops::Bound::Unbounded => 0,
        };
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let bytes = self.bytes.get(bounds)?;
        Some(Segment {
            bytes,
            origin: self.origin.saturating_add(start as u32),
        })
    }

    /// Read a scalar at the provided location in the data.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Interpret the bytes in `range` as a slice of `T`.
    ///
    /// Returns an error if `range` is out of bounds for the underlying data,
    /// or if the length of the range is not a multiple of `T::RAW_BYTE_LEN`.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self
            .bytes
            .get(range.clone())
            .ok_or(ReadError::OutOfBounds)?;
        if bytes
            .len()
            .checked_rem(std::mem::size_of::<T>())
            .unwrap_or(1)
            != 0
        {
            return Err(ReadError::InvalidArrayLen);
        }
        Ok(bytemuck::cast_slice(bytes))
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// Return the data as a byte slice.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    /// Read a scalar and advance the cursor.
    pub(crate) fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.advance_by(T::RAW_BYTE_LEN);
        temp
    }

    /// Read `n_elem` fixed-size records and advance the cursor.
    pub(crate) fn read_array<T: AnyBitPattern + FixedSize>(
        &mut self,
        n_elem: usize,
    ) -> Result<&'a [T], ReadError> {
        let len = n_elem
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let end = self.pos.checked_add(len).ok_or(ReadError::OutOfBounds)?;
        let temp = self.data.read_array(self.pos..end);
        self.advance_by(len);
        temp
    }

    /// The current position of the cursor within its segment.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}

// useful so we can have offsets that are just to data
impl<'a> TableRead<'a> for Segment<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        Ok(data)
    }
}

impl AsRef<[u8]> for Segment<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for Segment<'a> {
    fn from(src: &'a [u8]) -> Segment<'a> {
        Segment::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_checked_reads() {
        let data = Segment::new(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(data.read_at::<u16>(0), Ok(0xdead));
        assert_eq!(data.read_at::<u16>(2), Ok(0xbeef));
        assert_eq!(data.read_at::<u32>(0), Ok(0xdeadbeef));
        assert_eq!(data.read_at::<u16>(3), Err(ReadError::OutOfBounds));
        assert_eq!(data.read_at::<u32>(usize::MAX), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn jump_tracks_origin() {
        let data = Segment::new(&[0u8; 16]);
        let child = data.jump(6).unwrap();
        assert_eq!(child.len(), 10);
        assert_eq!(child.origin(), 6);
        let grandchild = child.jump(4).unwrap();
        assert_eq!(grandchild.origin(), 10);
        assert!(data.jump(17).is_none());
        // jumping to the very end is legal and yields an empty segment
        assert_eq!(data.jump(16).unwrap().len(), 0);
    }
}
