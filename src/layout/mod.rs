//! The physical arrangement of a VFD glass: how many grids it has, how characters map onto grid
//! memory, and where its fixed icons, colon and busy spinner live.

pub mod font;
pub mod presets;

use crate::command::consts::{DISPLAY_MEMORY_BYTES, MAX_GRIDS};
use crate::error::ConfigError;

pub use self::font::{Font, Glyph, Icon};

/// Grid count and memory shape of a glass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Number of grids wired up, 1-11.
    pub grids: u8,
    /// Display memory bytes per grid, 1 or 2. With 1, only segments 1-8 are driven.
    pub bytes_per_grid: u8,
    /// Number of characters the glass can show at once.
    pub displayable: u8,
}

impl Geometry {
    pub fn memory_bytes(&self) -> usize {
        self.grids as usize * self.bytes_per_grid as usize
    }

    /// Memory address of the first byte of the 1-based grid `position`.
    pub fn address_of(&self, position: u8) -> u8 {
        position.saturating_sub(1).wrapping_mul(self.bytes_per_grid)
    }
}

/// How characters are assigned to grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packing {
    /// Every grid shows one character using up to 16 segments.
    OneCharPerGrid,
    /// Grids `first..=last` (1-based) each show two small characters, one per memory byte, the
    /// first character of a pair in the upper byte. Every other grid shows one character.
    PackedPairs { first: u8, last: u8 },
}

impl Packing {
    /// Whether the grid at 1-based `position` holds a pair of characters.
    pub fn is_packed(&self, position: u8) -> bool {
        match *self {
            Packing::OneCharPerGrid => false,
            Packing::PackedPairs { first, last } => (first..=last).contains(&position),
        }
    }

    fn packed_grids(&self) -> u8 {
        match *self {
            Packing::OneCharPerGrid => 0,
            Packing::PackedPairs { first, last } => last.saturating_sub(first).saturating_add(1),
        }
    }
}

/// A colon segment drawn alongside the characters at certain grids when text is written with
/// the colon flag set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colon {
    /// 1-based segment number, 1-16.
    pub segment: u8,
    /// 1-based grid positions at which the colon is drawn.
    pub positions: &'static [u8],
}

impl Colon {
    pub fn applies_at(&self, position: u8) -> bool {
        self.positions.contains(&position)
    }

    /// The colon's bits as `(lower, upper)` byte masks.
    pub fn masks(&self) -> (u8, u8) {
        let bits = 1u16 << (self.segment.saturating_sub(1) & 0x0F);
        (bits as u8, (bits >> 8) as u8)
    }
}

/// Where spinner frames are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinnerTarget {
    /// A single memory byte, written without touching the cursor.
    Byte { address: u8 },
    /// A whole grid at this 1-based position, written through the cursor.
    Grid(u8),
}

/// How often a call to the spinner actually renders a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinnerGating {
    EveryCall,
    EveryOtherCall,
}

/// The segments of the busy spinner in animation order, as masks over a grid's two memory bytes
/// (low byte first). When the target is a single byte only the low byte is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinnerLayout {
    pub segments: [u16; 6],
    pub target: SpinnerTarget,
    pub gating: SpinnerGating,
}

/// Everything the engine needs to know about a particular glass.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub geometry: Geometry,
    pub packing: Packing,
    pub font: Font,
    pub icons: &'static [Icon],
    pub colon: Option<Colon>,
    pub spinner: SpinnerLayout,
}

impl Layout {
    /// Check that the layout fits the controller and is self-consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        if g.grids == 0 || g.grids > MAX_GRIDS {
            return Err(ConfigError::GridCount(g.grids));
        }
        if g.bytes_per_grid != 1 && g.bytes_per_grid != 2 {
            return Err(ConfigError::BytesPerGrid(g.bytes_per_grid));
        }
        debug_assert!(g.memory_bytes() <= DISPLAY_MEMORY_BYTES);

        if let Packing::PackedPairs { first, last } = self.packing {
            if g.bytes_per_grid != 2 || first == 0 || first > last || last > g.grids {
                return Err(ConfigError::PackedRange);
            }
        }
        let expected = g.grids + self.packing.packed_grids();
        if g.displayable != expected {
            return Err(ConfigError::DisplayableWidth {
                expected,
                found: g.displayable,
            });
        }

        if self.font.len() < font::MIN_GLYPHS {
            return Err(ConfigError::FontTooSmall(self.font.len()));
        }

        for (i, icon) in self.icons.iter().enumerate() {
            if icon.grid >= g.grids || (icon.segment >= 8 && g.bytes_per_grid < 2) {
                return Err(ConfigError::IconOutOfRange(i));
            }
        }

        if let Some(colon) = self.colon {
            let max = 8 * g.bytes_per_grid;
            if colon.segment == 0 || colon.segment > max {
                return Err(ConfigError::ColonBit(colon.segment));
            }
        }

        let spinner = &self.spinner;
        let byte_wide = match spinner.target {
            SpinnerTarget::Byte { address } => {
                if address as usize >= g.memory_bytes() {
                    return Err(ConfigError::SpinnerTarget);
                }
                true
            }
            SpinnerTarget::Grid(position) => {
                if position == 0 || position > g.grids {
                    return Err(ConfigError::SpinnerTarget);
                }
                g.bytes_per_grid == 1
            }
        };
        if byte_wide && spinner.segments.iter().any(|&m| m > 0xFF) {
            return Err(ConfigError::SpinnerMask);
        }

        Ok(())
    }
}
