//! Count-prefixed array readers
//!
//! The layout tables encode most repetition as a 16-bit count followed either
//! by fixed-size records or by 16-bit offsets to variable-sized children.
//! This module provides a reader for each of those two shapes.

use bytemuck::AnyBitPattern;
use crate::types::{BigEndian, FixedSize, Offset16};

use crate::offset::{Offset, ResolveOffset};
use crate::read::ReadError;
use crate::segment::{Cursor, Segment};

/// A 16-bit count followed by `count` fixed-size records.
///
/// The whole array is validated against the segment when it is read, so
/// indexing afterwards is infallible.
#[derive(Clone, Copy)]
pub struct RecordArray<'a, T> {
    records: &'a [T],
}

impl<'a, T: AnyBitPattern + FixedSize> RecordArray<'a, T> {
    /// Read a count and the records it announces at the cursor position.
    ///
    /// Bounds: `2 + count * T::RAW_BYTE_LEN` must fit in the segment.
    pub(crate) fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        let count: u16 = cursor.read()?;
        let records = cursor.read_array(count as usize)?;
        Ok(RecordArray { records })
    }

    /// The number of records in the array.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&'a T> {
        self.records.get(idx)
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.records
    }
}

/// A 16-bit count followed by `count` 16-bit offsets to variable-sized
/// children.
///
/// The offsets are relative to a base segment that the caller supplies: for
/// most tables that is the segment the array itself starts in, but some
/// formats place the array mid-table with offsets still relative to the
/// table base.
///
/// A zero offset is a valid "absent child" marker in several formats;
/// [`get_deep`](Self::get_deep) surfaces it as [`ReadError::NullOffset`] so
/// each call site can decide whether absence is allowed there.
#[derive(Clone, Copy)]
pub struct OffsetArray<'a> {
    base: Segment<'a>,
    offsets: &'a [BigEndian<Offset16>],
}

impl<'a> OffsetArray<'a> {
    /// Read a count and offset table at the cursor position, resolving
    /// children against `base`.
    pub(crate) fn read(base: Segment<'a>, cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        let count: u16 = cursor.read()?;
        let offsets = cursor.read_array(count as usize)?;
        Ok(OffsetArray { base, offsets })
    }

    /// Read an offset array that sits at the very start of `base`.
    pub(crate) fn read_from(base: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = base.cursor();
        Self::read(base, &mut cursor)
    }

    /// The number of offsets in the array.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The raw offset at `idx`.
    pub fn get(&self, idx: usize) -> Option<Offset16> {
        self.offsets.get(idx).map(|off| off.get())
    }

    /// The child segment the offset at `idx` points to.
    pub fn get_deep(&self, idx: usize) -> Result<Segment<'a>, ReadError> {
        self.offsets
            .get(idx)
            .ok_or(ReadError::OutOfBounds)
            .and_then(|off| off.get().jump(self.base))
    }

    /// Iterate the child segments in declaration order.
    ///
    /// Null offsets yield `Err(NullOffset)` entries rather than being
    /// skipped, so positions stay aligned with parallel tables.
    pub fn iter_deep(&self) -> impl Iterator<Item = Result<Segment<'a>, ReadError>> + '_ {
        self.offsets.iter().map(|off| off.get().jump(self.base))
    }
}

/// Resolve a slice of raw 16-bit offsets against `base`, preserving order.
pub(crate) fn deep<'a>(
    base: Segment<'a>,
    offsets: &'a [BigEndian<Offset16>],
) -> impl Iterator<Item = Result<Segment<'a>, ReadError>> + 'a {
    offsets.iter().map(move |off| off.get().jump(base))
}

/// Like [`deep`], but a null offset is an absent child, not an error.
pub(crate) fn deep_nullable<'a>(
    base: Segment<'a>,
    offsets: &'a [BigEndian<Offset16>],
) -> impl Iterator<Item = Result<Option<Segment<'a>>, ReadError>> + 'a {
    offsets.iter().map(move |off| match off.get().non_null() {
        None => Ok(None),
        Some(pos) => base.jump(pos).ok_or(ReadError::OutOfBounds).map(Some),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_array_deep() {
        // count 2, offsets 6 and 0; child at 6 is the bytes [0xaa, 0xbb]
        let bytes = [0x00, 0x02, 0x00, 0x06, 0x00, 0x00, 0xaa, 0xbb];
        let array = OffsetArray::read_from(Segment::new(&bytes)).unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array.get_deep(0).unwrap().as_bytes(), &[0xaa, 0xbb]);
        assert_eq!(array.get_deep(1), Err(ReadError::NullOffset));
        assert_eq!(array.get_deep(2), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn record_array_too_short() {
        // count says 3 but only one u16 record follows
        let bytes = [0x00, 0x03, 0x00, 0x05];
        let mut cursor = Segment::new(&bytes).cursor();
        assert!(RecordArray::<BigEndian<u16>>::read(&mut cursor).is_err());
    }
}
