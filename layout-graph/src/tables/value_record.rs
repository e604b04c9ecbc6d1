//! A GPOS ValueRecord

use core::ops::{BitOr, BitOrAssign};

use crate::types::Scalar;

use crate::read::ReadError;
use crate::segment::Cursor;

/// The bit mask that says which fields a [`ValueRecord`] carries.
///
/// Like `LookupFlag`, this is almost but not quite a bit enumeration, so it
/// is implemented by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueFormat(u16);

impl ValueFormat {
    /// Includes horizontal adjustment for placement
    pub const X_PLACEMENT: Self = ValueFormat(0x0001);
    /// Includes vertical adjustment for placement
    pub const Y_PLACEMENT: Self = ValueFormat(0x0002);
    /// Includes horizontal adjustment for advance
    pub const X_ADVANCE: Self = ValueFormat(0x0004);
    /// Includes vertical adjustment for advance
    pub const Y_ADVANCE: Self = ValueFormat(0x0008);
    /// Includes Device table (non-variable font) / VariationIndex table
    /// (variable font) for horizontal placement
    pub const X_PLACEMENT_DEVICE: Self = ValueFormat(0x0010);
    /// Includes Device table (non-variable font) / VariationIndex table
    /// (variable font) for vertical placement
    pub const Y_PLACEMENT_DEVICE: Self = ValueFormat(0x0020);
    /// Includes Device table (non-variable font) / VariationIndex table
    /// (variable font) for horizontal advance
    pub const X_ADVANCE_DEVICE: Self = ValueFormat(0x0040);
    /// Includes Device table (non-variable font) / VariationIndex table
    /// (variable font) for vertical advance
    pub const Y_ADVANCE_DEVICE: Self = ValueFormat(0x0080);

    const VALID_BITS: u16 = 0x00FF;

    pub fn empty() -> Self {
        Self(0)
    }

    /// Construct a ValueFormat from a raw value, discarding reserved bits.
    pub fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::VALID_BITS)
    }

    pub fn to_bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// The number of bytes a value record in this format occupies.
    #[inline]
    pub fn record_byte_len(self) -> usize {
        self.0.count_ones() as usize * 2
    }
}

impl BitOr for ValueFormat {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ValueFormat {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl Scalar for ValueFormat {
    type Raw = <u16 as Scalar>::Raw;
    fn to_raw(self) -> Self::Raw {
        self.0.to_raw()
    }
    fn from_raw(raw: Self::Raw) -> Self {
        Self(<u16>::from_raw(raw))
    }
}

/// A positioning adjustment, with exactly the fields its format bits name.
///
/// Each field is `Some` iff the corresponding format bit was set when the
/// record was read; the parser reads exactly those fields and no more.
/// Device fields hold the raw 16-bit offset to a Device or VariationIndex
/// table (relative to the enclosing subtable); a stored offset of zero means
/// no table. Device table internals are not interpreted here.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueRecord {
    pub x_placement: Option<i16>,
    pub y_placement: Option<i16>,
    pub x_advance: Option<i16>,
    pub y_advance: Option<i16>,
    pub x_placement_device: Option<u16>,
    pub y_placement_device: Option<u16>,
    pub x_advance_device: Option<u16>,
    pub y_advance_device: Option<u16>,
    format: ValueFormat,
}

impl ValueRecord {
    pub(crate) fn read(cursor: &mut Cursor, format: ValueFormat) -> Result<Self, ReadError> {
        let mut this = ValueRecord {
            format,
            ..Default::default()
        };
        if format.contains(ValueFormat::X_PLACEMENT) {
            this.x_placement = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::Y_PLACEMENT) {
            this.y_placement = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::X_ADVANCE) {
            this.x_advance = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::Y_ADVANCE) {
            this.y_advance = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::X_PLACEMENT_DEVICE) {
            this.x_placement_device = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::Y_PLACEMENT_DEVICE) {
            this.y_placement_device = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::X_ADVANCE_DEVICE) {
            this.x_advance_device = Some(cursor.read()?);
        }
        if format.contains(ValueFormat::Y_ADVANCE_DEVICE) {
            this.y_advance_device = Some(cursor.read()?);
        }
        Ok(this)
    }

    /// The format the record was read with.
    pub fn format(&self) -> ValueFormat {
        self.format
    }
}

impl std::fmt::Debug for ValueRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut f = f.debug_struct("ValueRecord");
        self.x_placement.map(|x| f.field("x_placement", &x));
        self.y_placement.map(|y| f.field("y_placement", &y));
        self.x_advance.map(|x| f.field("x_advance", &x));
        self.y_advance.map(|y| f.field("y_advance", &y));
        self.x_placement_device
            .map(|x| f.field("x_placement_device", &x));
        self.y_placement_device
            .map(|y| f.field("y_placement_device", &y));
        self.x_advance_device
            .map(|x| f.field("x_advance_device", &x));
        self.y_advance_device
            .map(|y| f.field("y_advance_device", &y));
        f.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;

    #[test]
    fn record_byte_len() {
        let format = ValueFormat::X_PLACEMENT | ValueFormat::X_ADVANCE;
        assert_eq!(format.record_byte_len(), 4);
        assert_eq!(ValueFormat::empty().record_byte_len(), 0);
    }

    #[test]
    fn reads_exactly_the_masked_fields() {
        let bytes = [0x00, 0x07, 0xff, 0xf0];
        let mut cursor = Segment::new(&bytes).cursor();
        let format = ValueFormat::X_ADVANCE | ValueFormat::Y_ADVANCE;
        let record = ValueRecord::read(&mut cursor, format).unwrap();
        assert_eq!(record.x_advance, Some(7));
        assert_eq!(record.y_advance, Some(-16));
        assert_eq!(record.x_placement, None);
        assert_eq!(record.x_advance_device, None);
        assert_eq!(cursor.position(), 4);
    }
}
