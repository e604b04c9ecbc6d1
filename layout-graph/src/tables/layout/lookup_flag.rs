//! The lookup flag word.

/// The flag word of a lookup header.
///
/// The parser carries these bits through to the shaping engine mostly
/// untouched: the low bits say which glyph categories the lookup skips, and
/// a non-zero high byte restricts it to marks of one attachment class. One
/// bit matters to parsing itself: [`USE_MARK_FILTERING_SET`] changes the
/// lookup header's shape by appending a mark-filtering-set field after the
/// subtable offsets.
///
/// [`USE_MARK_FILTERING_SET`]: LookupFlag::USE_MARK_FILTERING_SET
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupFlag(u16);

impl LookupFlag {
    /// Cursive attachment sequences run right to left.
    pub const RIGHT_TO_LEFT: Self = LookupFlag(0x0001);
    /// Base glyphs are skipped while matching.
    pub const IGNORE_BASE_GLYPHS: Self = LookupFlag(0x0002);
    /// Ligature glyphs are skipped while matching.
    pub const IGNORE_LIGATURES: Self = LookupFlag(0x0004);
    /// Mark glyphs are skipped while matching.
    pub const IGNORE_MARKS: Self = LookupFlag(0x0008);
    /// A mark-filtering-set index follows the subtable offsets in the
    /// lookup header.
    pub const USE_MARK_FILTERING_SET: Self = LookupFlag(0x0010);

    // bits 5..=7 are reserved; the high byte holds the attachment class
    const RESERVED: u16 = 0x00E0;

    /// A flag word with nothing set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Interpret a flag word as read from a lookup header, clearing the
    /// reserved bits.
    pub fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & !Self::RESERVED)
    }

    /// The raw word, reserved bits cleared.
    pub fn to_bits(self) -> u16 {
        self.0
    }

    /// `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn right_to_left(self) -> bool {
        self.contains(Self::RIGHT_TO_LEFT)
    }

    pub fn ignores_base_glyphs(self) -> bool {
        self.contains(Self::IGNORE_BASE_GLYPHS)
    }

    pub fn ignores_ligatures(self) -> bool {
        self.contains(Self::IGNORE_LIGATURES)
    }

    pub fn ignores_marks(self) -> bool {
        self.contains(Self::IGNORE_MARKS)
    }

    pub fn uses_mark_filtering_set(self) -> bool {
        self.contains(Self::USE_MARK_FILTERING_SET)
    }

    /// The mark attachment class the lookup is limited to, if any.
    pub fn mark_attachment_class(self) -> Option<u16> {
        match self.0 >> 8 {
            0 => None,
            class => Some(class),
        }
    }
}
