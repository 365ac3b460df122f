//! Error types for the driver.

use core::fmt;

/// A layout that cannot be driven by the controller. These are programmer errors, so they are
/// only raised when a [`Display`](crate::Display) is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Grid count must be 1-11.
    GridCount(u8),
    /// Bytes per grid must be 1 or 2.
    BytesPerGrid(u8),
    /// The displayable character count does not follow from the grid count and packing.
    DisplayableWidth { expected: u8, found: u8 },
    /// Packed grids must be an ordered range inside the grid range, on 2-byte grids.
    PackedRange,
    /// The font must cover at least the 64 codes from 0x20 to 0x5F.
    FontTooSmall(usize),
    /// The icon at this table index lies outside display memory.
    IconOutOfRange(usize),
    /// The spinner's target grid or address lies outside display memory.
    SpinnerTarget,
    /// A spinner segment does not fit in the single byte it is written to.
    SpinnerMask,
    /// Colon segment numbers are 1-16, and 1-8 on 1-byte grids.
    ColonBit(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::GridCount(n) => write!(f, "grid count {} not in 1-11", n),
            ConfigError::BytesPerGrid(n) => write!(f, "bytes per grid {} not 1 or 2", n),
            ConfigError::DisplayableWidth { expected, found } => write!(
                f,
                "displayable width {} does not match layout (expected {})",
                found, expected
            ),
            ConfigError::PackedRange => write!(f, "invalid packed grid range"),
            ConfigError::FontTooSmall(len) => write!(f, "font has only {} glyphs", len),
            ConfigError::IconOutOfRange(i) => write!(f, "icon {} outside display memory", i),
            ConfigError::SpinnerTarget => write!(f, "spinner target outside display memory"),
            ConfigError::SpinnerMask => write!(f, "spinner segment does not fit target byte"),
            ConfigError::ColonBit(bit) => write!(f, "colon segment {} out of range", bit),
        }
    }
}

/// Errors raised while driving the display.
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// Underlying bus line error.
    Bus(E),
    /// Icon index not present in the layout's icon table.
    UnknownIcon(usize),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::UnknownIcon(i) => write!(f, "unknown icon index {}", i),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Bus(e) => defmt::write!(f, "bus error: {}", e),
            Error::UnknownIcon(i) => defmt::write!(f, "unknown icon index {}", i),
        }
    }
}
