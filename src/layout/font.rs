//! Font and icon tables.

/// First character code covered by every font table.
pub const FIRST_CODE: u8 = 0x20;
/// A font must cover at least the codes 0x20 to 0x5F.
pub const MIN_GLYPHS: usize = 64;

/// The segment bits for one character, split the way grid memory is: `lsb` drives segments 1-8
/// and `msb` segments 9-16.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    pub msb: u8,
    pub lsb: u8,
}

impl Glyph {
    pub fn is_blank(self) -> bool {
        self.msb == 0 && self.lsb == 0
    }
}

/// A table of glyphs indexed by `code - 0x20`, stored as `[msb, lsb]` pairs.
#[derive(Clone, Copy, Debug)]
pub struct Font {
    glyphs: &'static [[u8; 2]],
}

impl Font {
    pub const fn new(glyphs: &'static [[u8; 2]]) -> Self {
        Font { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Look up a character code. Codes outside the table render blank.
    pub fn glyph(&self, code: u8) -> Glyph {
        code.checked_sub(FIRST_CODE)
            .and_then(|i| self.glyphs.get(i as usize))
            .map(|&[msb, lsb]| Glyph { msb, lsb })
            .unwrap_or_default()
    }

    /// Every character code the table draws as something other than blank, in code order.
    pub fn printable<'a>(&'a self) -> impl Iterator<Item = u8> + 'a {
        self.glyphs
            .iter()
            .enumerate()
            .filter(|(_, g)| g[0] | g[1] != 0)
            .map(|(i, _)| FIRST_CODE.wrapping_add(i as u8))
    }
}

/// One persistent icon segment, located by zero-based grid and zero-based segment number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Icon {
    pub grid: u8,
    pub segment: u8,
}

impl Icon {
    /// Decode the packed table form: low nibble is the grid, high nibble the segment.
    pub const fn from_packed(packed: u8) -> Self {
        Icon {
            grid: packed & 0x0F,
            segment: packed >> 4,
        }
    }

    /// The memory address of the byte holding this icon's segment.
    pub fn address(self, bytes_per_grid: u8) -> usize {
        self.grid as usize * bytes_per_grid as usize + (self.segment >= 8) as usize
    }

    /// The bit of that byte.
    pub fn mask(self) -> u8 {
        1 << (self.segment % 8)
    }
}
