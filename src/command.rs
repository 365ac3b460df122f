//! The command set for the PT6312 and its clones (AD16312, HT16512, ET16312N).
//!
//! Note 1: Every command is a single byte whose top two bits select the command class. The
//! controller treats the first byte after chip-select falls as a command and any following bytes
//! in the same transaction as data for that command, which is how memory bursts and LED writes
//! are framed.
//!
//! Note 2: Display memory is 22 bytes, 2 bytes per grid for up to 11 grids. Each grid's first
//! (lower) byte drives segments 1-8 and its second (upper) byte segments 9-16.

use crate::interface::BusInterface;

pub mod consts {
    pub const MAX_GRIDS: u8 = 11;
    pub const DISPLAY_MEMORY_BYTES: usize = 22;
    /// Key matrix data is read as this many consecutive bytes.
    pub const KEY_MEMORY_BYTES: usize = 3;

    pub const CMD_CLASS_MASK: u8 = 0xC0;
    pub const MODE_SET_CMD: u8 = 0x00;
    pub const DATA_SET_CMD: u8 = 0x40;
    pub const DISPLAY_CTRL_CMD: u8 = 0x80;
    pub const ADDR_SET_CMD: u8 = 0xC0;

    pub const GRID_MODE_MASK: u8 = 0x07;

    pub const DATA_MODE_MASK: u8 = 0x03;
    pub const DATA_WRITE: u8 = 0x00;
    pub const DATA_LED_WRITE: u8 = 0x01;
    pub const DATA_KEY_READ: u8 = 0x02;
    pub const DATA_SWITCH_READ: u8 = 0x03;
    pub const DATA_ADDR_FIXED: u8 = 0x04;
    pub const DATA_TEST_MODE: u8 = 0x08;

    pub const ADDR_MASK: u8 = 0x1F;

    pub const DISPLAY_ON: u8 = 0x08;
    pub const BRIGHTNESS_MASK: u8 = 0x07;
    pub const BRIGHTNESS_MAX: u8 = 7;

    pub const LED_MASK: u8 = 0x0F;
    pub const SWITCH_MASK: u8 = 0x0F;
    pub const KEY_SAMPLE_MASK: u8 = 0x0F;
}

use self::consts::*;

/// Grid/segment split of the controller's outputs. Some segment drivers double as grid drivers,
/// so each extra grid costs a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GridMode {
    Grids4Segments16,
    Grids5Segments16,
    Grids6Segments16,
    Grids7Segments15,
    Grids8Segments14,
    Grids9Segments13,
    Grids10Segments12,
    Grids11Segments11,
}

impl GridMode {
    /// The smallest mode that drives `grids` grids. Fewer than 4 grids still select the 4-grid
    /// mode; more than 11 select the 11-grid mode.
    pub fn for_grids(grids: u8) -> Self {
        match grids {
            0..=4 => GridMode::Grids4Segments16,
            5 => GridMode::Grids5Segments16,
            6 => GridMode::Grids6Segments16,
            7 => GridMode::Grids7Segments15,
            8 => GridMode::Grids8Segments14,
            9 => GridMode::Grids9Segments13,
            10 => GridMode::Grids10Segments12,
            _ => GridMode::Grids11Segments11,
        }
    }

    /// The number of segment lines available in this mode.
    pub fn segments(self) -> u8 {
        match self {
            GridMode::Grids4Segments16 | GridMode::Grids5Segments16 | GridMode::Grids6Segments16 => 16,
            GridMode::Grids7Segments15 => 15,
            GridMode::Grids8Segments14 => 14,
            GridMode::Grids9Segments13 => 13,
            GridMode::Grids10Segments12 => 12,
            GridMode::Grids11Segments11 => 11,
        }
    }

    fn code(self) -> u8 {
        match self {
            GridMode::Grids4Segments16 => 0x00,
            GridMode::Grids5Segments16 => 0x01,
            GridMode::Grids6Segments16 => 0x02,
            GridMode::Grids7Segments15 => 0x03,
            GridMode::Grids8Segments14 => 0x04,
            GridMode::Grids9Segments13 => 0x05,
            GridMode::Grids10Segments12 => 0x06,
            GridMode::Grids11Segments11 => 0x07,
        }
    }
}

/// What the data following a data-set command is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataMode {
    /// Write to display memory.
    Write,
    /// Write the LED output port.
    LedWrite,
    /// Read the key matrix.
    KeyRead,
    /// Read the switch inputs.
    SwitchRead,
}

/// Whether the memory address advances after each data byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    Increment,
    Fixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    Normal,
    /// Factory test mode.
    Test,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Select the grid/segment split. Sent as part of every (re)initialisation.
    SetMode(GridMode),
    /// Select what following data bytes mean, whether the address auto-increments, and the
    /// operating mode.
    SetData(DataMode, AddressMode, OperatingMode),
    /// Set the display memory address for following data bytes. Range is 0-31; higher bits are
    /// masked off. (Note 2)
    SetAddress(u8),
    /// Turn the display on or off and set its brightness. Brightness range is 0-7, for pulse
    /// widths of 1/16, 2/16, 4/16, 10/16, 11/16, 12/16, 13/16 and 14/16; higher bits are masked
    /// off.
    SetDisplay(bool, u8),
}

impl Command {
    /// The byte sent on the wire for this command.
    pub fn encode(self) -> u8 {
        match self {
            Command::SetMode(mode) => MODE_SET_CMD | mode.code(),
            Command::SetData(data, address, operating) => {
                let d = match data {
                    DataMode::Write => DATA_WRITE,
                    DataMode::LedWrite => DATA_LED_WRITE,
                    DataMode::KeyRead => DATA_KEY_READ,
                    DataMode::SwitchRead => DATA_SWITCH_READ,
                };
                let a = match address {
                    AddressMode::Increment => 0x00,
                    AddressMode::Fixed => DATA_ADDR_FIXED,
                };
                let o = match operating {
                    OperatingMode::Normal => 0x00,
                    OperatingMode::Test => DATA_TEST_MODE,
                };
                DATA_SET_CMD | d | a | o
            }
            Command::SetAddress(address) => ADDR_SET_CMD | (address & ADDR_MASK),
            Command::SetDisplay(on, brightness) => {
                let o = match on {
                    true => DISPLAY_ON,
                    false => 0x00,
                };
                DISPLAY_CTRL_CMD | o | (brightness & BRIGHTNESS_MASK)
            }
        }
    }

    /// Shift this command out. With `end_transaction` unset the transaction stays open so data
    /// bytes can follow.
    pub fn send<DI>(self, iface: &mut DI, end_transaction: bool) -> Result<(), DI::Error>
    where
        DI: BusInterface,
    {
        iface.write_byte(self.encode(), end_transaction)
    }

    /// The data-set command the engine returns to after every LED write or key/switch read.
    pub fn default_data_mode() -> Self {
        Command::SetData(DataMode::Write, AddressMode::Increment, OperatingMode::Normal)
    }
}
