//! Handling offsets

use crate::types::{Offset16, Offset32};

use crate::read::{ReadError, TableRead};
use crate::segment::Segment;

/// Any offset type.
pub trait Offset: Copy {
    fn to_usize(self) -> usize;

    fn non_null(self) -> Option<usize> {
        match self.to_usize() {
            0 => None,
            other => Some(other),
        }
    }
}

macro_rules! impl_offset {
    ($name:ident) => {
        impl Offset for $name {
            #[inline]
            fn to_usize(self) -> usize {
                self.to_u32() as _
            }
        }
    };
}

impl_offset!(Offset16);
impl_offset!(Offset32);

/// A helper trait providing `jump`/`resolve` methods for offset types.
///
/// Offsets in the lookup graph are always relative to the segment of the
/// structure that declares them; `jump` performs that one navigation step,
/// and `resolve` additionally reads a typed table at the target.
pub trait ResolveOffset {
    /// The sub-segment this offset points at, within `data`.
    fn jump<'a>(&self, data: Segment<'a>) -> Result<Segment<'a>, ReadError>;

    fn resolve<'a, T: TableRead<'a>>(&self, data: Segment<'a>) -> Result<T, ReadError>;
}

impl<O: Offset> ResolveOffset for O {
    fn jump<'a>(&self, data: Segment<'a>) -> Result<Segment<'a>, ReadError> {
        self.non_null()
            .ok_or(ReadError::NullOffset)
            .and_then(|off| data.jump(off).ok_or(ReadError::OutOfBounds))
    }

    fn resolve<'a, T: TableRead<'a>>(&self, data: Segment<'a>) -> Result<T, ReadError> {
        self.jump(data).and_then(T::read)
    }
}
