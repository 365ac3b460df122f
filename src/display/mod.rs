//! The main API to the display driver. A `Display` owns the bus interface, the layout of the
//! glass, and the little state the controller cannot be asked for: the grid cursor, the
//! brightness, the icon overlay and the spinner animation.

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
pub mod testing {
    use crate::config::Config;
    use crate::interface::test_spy::TestSpyInterface;
    use crate::layout::Layout;

    use super::Display;

    macro_rules! send {
        (S) => {Sent::Strobe};
        ([$ms:expr]) => {Sent::Delay($ms)};
        ($b:expr) => {Sent::Byte($b)};
    }
    macro_rules! sends {
        ($($e:tt),* $(,)?) => {&[$(send!($e),)*]};
    }

    /// A display over a fresh spy, and a handle onto the spy's log.
    pub fn spy_display(layout: Layout) -> (TestSpyInterface, Display<TestSpyInterface>) {
        let di = TestSpyInterface::new();
        let disp = Display::new(di.split(), layout, Config::new()).unwrap();
        (di, disp)
    }
}

mod keys;
mod scroll;
mod spinner;
mod text;

pub use self::keys::KeySample;
pub use self::scroll::Scroll;
pub use self::spinner::{trail_mask, FRAMES, LOOPS_PER_FRAME};

use itertools::iproduct;

use crate::command::consts::*;
use crate::command::{Command, GridMode};
use crate::config::Config;
use crate::error::{ConfigError, Error};
use crate::interface::BusInterface;
use crate::layout::Layout;

use self::spinner::SpinnerState;

/// A driver for a PT6312 family controller and the glass wired to it.
pub struct Display<DI>
where
    DI: BusInterface,
{
    iface: DI,
    layout: Layout,
    config: Config,
    brightness: u8,
    cursor: u8,
    icons: [u8; DISPLAY_MEMORY_BYTES],
    spinner: SpinnerState,
}

impl<DI> Display<DI>
where
    DI: BusInterface,
{
    /// Construct a driver for a glass with the given `layout`, connected to the interface
    /// `iface`. Nothing is sent until [`init`](Self::init).
    pub fn new(iface: DI, layout: Layout, config: Config) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Display {
            iface,
            layout,
            config,
            brightness: config.brightness,
            cursor: 1,
            icons: [0; DISPLAY_MEMORY_BYTES],
            spinner: SpinnerState::new(),
        })
    }

    /// Give the interface back.
    pub fn release(self) -> DI {
        self.iface
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The 1-based grid position the next character will be written to.
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// The icon overlay, one byte per display memory byte of the glass.
    pub fn icon_buffer(&self) -> &[u8] {
        &self.icons[..self.layout.geometry.memory_bytes()]
    }

    /// Wait for the controller to power up, then initialize it and home the cursor.
    pub fn init(&mut self) -> Result<(), Error<DI::Error>> {
        self.iface.delay_ms(self.config.power_up_delay_ms);
        self.reset_display()?;
        self.cursor = 1;
        Ok(())
    }

    /// Send the initialization sequence: grid mode, display on at the current brightness, and
    /// the default data mode.
    ///
    /// The controller leaves the glass dark after some memory writes until this is sent again,
    /// so the engine repeats it after scroll pages, spinner frames and test patterns.
    pub fn reset_display(&mut self) -> Result<(), Error<DI::Error>> {
        let mode = GridMode::for_grids(self.layout.geometry.grids);
        #[cfg(feature = "defmt")]
        defmt::debug!("reinit: {}, brightness {}", mode, self.brightness);
        self.command(Command::SetMode(mode), true)?;
        self.command(Command::SetDisplay(true, self.brightness), true)?;
        self.command(Command::default_data_mode(), true)
    }

    /// Turn the display on at `brightness` (0-7, higher bits are masked off). The value is kept
    /// for every later reinitialisation.
    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), Error<DI::Error>> {
        self.brightness = brightness & BRIGHTNESS_MASK;
        self.command(Command::SetDisplay(true, self.brightness), true)
    }

    /// Turn the display off. Memory is kept.
    pub fn display_off(&mut self) -> Result<(), Error<DI::Error>> {
        self.command(Command::SetDisplay(false, 0), true)
    }

    /// Select the grid at 1-based `position` for the next memory write.
    ///
    /// Position `grids + 1` wraps around to the first grid. Anything larger, and 0, selects the
    /// last grid. With `end_transaction` unset, data bytes can follow in the same transaction.
    pub fn set_cursor(&mut self, position: u8, end_transaction: bool) -> Result<(), Error<DI::Error>> {
        let grids = self.layout.geometry.grids;
        let position = match position {
            0 => grids,
            p if p == grids + 1 => 1,
            p if p > grids => grids,
            p => p,
        };
        self.cursor = position;
        let address = self.layout.geometry.address_of(position);
        self.command(Command::SetAddress(address), end_transaction)
    }

    /// Move the cursor to the first grid.
    pub fn home(&mut self) -> Result<(), Error<DI::Error>> {
        self.set_cursor(1, false)
    }

    /// Blank every grid and leave the cursor on the last one. The icon overlay is kept, so icons
    /// come back with the next write.
    pub fn clear(&mut self) -> Result<(), Error<DI::Error>> {
        self.fill(0x00)
    }

    /// Light every segment of every grid, then reinitialize so the glass shows it.
    pub fn display_all_segments(&mut self) -> Result<(), Error<DI::Error>> {
        self.fill(0xFF)?;
        self.reset_display()
    }

    /// Light each segment of each grid in turn, holding each for the configured dwell time and
    /// clearing after every grid. Useful to map out an unknown glass.
    pub fn segments_test(&mut self) -> Result<(), Error<DI::Error>> {
        let geometry = self.layout.geometry;
        let segments = GridMode::for_grids(geometry.grids)
            .segments()
            .min(8 * geometry.bytes_per_grid);
        for (grid, segment) in iproduct!(1..=geometry.grids, 0..segments) {
            let bit = 1u16 << segment;
            self.set_cursor(grid, false)?;
            if geometry.bytes_per_grid == 2 {
                self.write(bit as u8, false)?;
                self.write((bit >> 8) as u8, true)?;
            } else {
                self.write(bit as u8, true)?;
            }
            self.iface.delay_ms(self.config.segment_test_ms);
            if segment + 1 == segments {
                self.clear()?;
            }
        }
        Ok(())
    }

    /// Write a single byte at a memory address, bypassing the cursor and the icon overlay.
    pub fn write_byte(&mut self, address: u8, data: u8) -> Result<(), Error<DI::Error>> {
        self.command(Command::SetAddress(address), false)?;
        self.write(data, true)
    }

    /// Add the icon at `index` of the layout's icon table to the overlay. It shows up with the
    /// next write to its grid.
    pub fn set_icon(&mut self, index: usize) -> Result<(), Error<DI::Error>> {
        let (address, mask) = self.icon(index)?;
        self.icons[address] |= mask;
        Ok(())
    }

    /// Remove the icon at `index` from the overlay.
    pub fn clear_icon(&mut self, index: usize) -> Result<(), Error<DI::Error>> {
        let (address, mask) = self.icon(index)?;
        self.icons[address] &= !mask;
        Ok(())
    }

    pub fn clear_icons(&mut self) {
        self.icons = [0; DISPLAY_MEMORY_BYTES];
    }

    fn icon(&self, index: usize) -> Result<(usize, u8), Error<DI::Error>> {
        match self.layout.icons.get(index) {
            Some(icon) => Ok((icon.address(self.layout.geometry.bytes_per_grid), icon.mask())),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("unknown icon index {}", index);
                Err(Error::UnknownIcon(index))
            }
        }
    }

    /// Overlay bits for a memory address.
    fn overlay(&self, address: usize) -> u8 {
        self.icons.get(address).cloned().unwrap_or(0)
    }

    /// Write `value` to every memory byte from the first grid, leaving the cursor on the last.
    fn fill(&mut self, value: u8) -> Result<(), Error<DI::Error>> {
        self.set_cursor(1, false)?;
        for _ in 0..self.layout.geometry.memory_bytes() {
            self.write(value, false)?;
        }
        self.end_transaction()?;
        self.cursor = self.layout.geometry.grids;
        Ok(())
    }

    fn command(&mut self, command: Command, end_transaction: bool) -> Result<(), Error<DI::Error>> {
        command.send(&mut self.iface, end_transaction).map_err(Error::Bus)
    }

    fn write(&mut self, value: u8, end_transaction: bool) -> Result<(), Error<DI::Error>> {
        self.iface.write_byte(value, end_transaction).map_err(Error::Bus)
    }

    fn end_transaction(&mut self) -> Result<(), Error<DI::Error>> {
        self.iface.end_transaction().map_err(Error::Bus)
    }
}
