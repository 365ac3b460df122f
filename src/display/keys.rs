//! Key matrix, switch inputs and LED outputs.

use crate::command::consts::*;
use crate::command::{AddressMode, Command, DataMode, OperatingMode};
use crate::interface::BusInterface;

use super::{Display, Error};

/// Number of 4-bit samples of the key matrix in one read.
pub const KEY_SAMPLES: usize = 6;

/// One read of the key matrix: six consecutive 4-bit samples of four keys.
///
/// The three bytes read are assembled first byte highest, so sample 0 sits in the lowest nibble
/// and comes from the last byte read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySample(u32);

impl KeySample {
    pub fn from_bytes(bytes: [u8; KEY_MEMORY_BYTES]) -> Self {
        KeySample(
            bytes
                .iter()
                .fold(0u32, |raw, &b| (raw << 8) | u32::from(b)),
        )
    }

    /// The raw 24-bit value.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Sample `n`, where bit 0 is key 1. Out-of-range samples read as no keys pressed.
    pub fn sample(self, n: usize) -> u8 {
        if n < KEY_SAMPLES {
            (self.0 >> (4 * n)) as u8 & KEY_SAMPLE_MASK
        } else {
            0
        }
    }

    pub fn samples(self) -> impl Iterator<Item = u8> {
        (0..KEY_SAMPLES).map(move |n| self.sample(n))
    }

    /// Whether any key was seen pressed in any sample.
    pub fn is_pressed(self) -> bool {
        self.0 != 0
    }

    /// The 1-based number of the lowest key pressed in sample 0, or 0 for none.
    pub fn first_pressed(self) -> u8 {
        match self.sample(0) {
            0 => 0,
            keys => keys.trailing_zeros() as u8 + 1,
        }
    }
}

impl<DI> Display<DI>
where
    DI: BusInterface,
{
    /// Drive the LED port. Bit 0 of `leds` is LED 1; a set bit lights the LED.
    pub fn set_leds(&mut self, leds: u8) -> Result<(), Error<DI::Error>> {
        self.command(data_mode(DataMode::LedWrite), false)?;
        self.write(!leds & LED_MASK, true)?;
        self.command(Command::default_data_mode(), true)
    }

    /// Read the key matrix.
    pub fn read_keys(&mut self) -> Result<KeySample, Error<DI::Error>> {
        let mut bytes = [0u8; KEY_MEMORY_BYTES];
        self.read_into(DataMode::KeyRead, &mut bytes)?;
        Ok(KeySample::from_bytes(bytes))
    }

    /// Read the key matrix and return the number of the first key pressed, or 0 for none.
    pub fn first_pressed_key(&mut self) -> Result<u8, Error<DI::Error>> {
        Ok(self.read_keys()?.first_pressed())
    }

    /// Read the four switch inputs. Bit 0 is switch 1.
    pub fn read_switches(&mut self) -> Result<u8, Error<DI::Error>> {
        let mut byte = [0u8; 1];
        self.read_into(DataMode::SwitchRead, &mut byte)?;
        Ok(byte[0] & SWITCH_MASK)
    }

    /// Select a read mode, turn the data line around for `buf.len()` bytes, then return to
    /// memory writes.
    fn read_into(&mut self, mode: DataMode, buf: &mut [u8]) -> Result<(), Error<DI::Error>> {
        self.command(data_mode(mode), false)?;
        self.iface.begin_read().map_err(Error::Bus)?;
        for b in buf.iter_mut() {
            *b = self.iface.read_byte().map_err(Error::Bus)?;
        }
        self.iface.end_read().map_err(Error::Bus)?;
        self.end_transaction()?;
        self.command(Command::default_data_mode(), true)
    }
}

fn data_mode(mode: DataMode) -> Command {
    Command::SetData(mode, AddressMode::Increment, OperatingMode::Normal)
}

#[cfg(test)]
mod tests {
    use super::super::testing::spy_display;
    use super::*;
    use crate::interface::test_spy::Sent;
    use crate::layout::presets;

    #[test]
    fn sample_layout() {
        let keys = KeySample::from_bytes([0x12, 0x34, 0x56]);
        assert_eq!(keys.bits(), 0x12_3456);
        assert_eq!(
            keys.samples().collect::<std::vec::Vec<_>>(),
            vec![0x6, 0x5, 0x4, 0x3, 0x2, 0x1]
        );
        assert_eq!(keys.sample(6), 0);
        assert!(keys.is_pressed());
        assert!(!KeySample::default().is_pressed());
    }

    #[test]
    fn first_pressed() {
        assert_eq!(KeySample::from_bytes([0, 0, 0]).first_pressed(), 0);
        assert_eq!(KeySample::from_bytes([0, 0, 0b0001]).first_pressed(), 1);
        assert_eq!(KeySample::from_bytes([0, 0, 0b1100]).first_pressed(), 3);
        assert_eq!(KeySample::from_bytes([0, 0, 0b1000]).first_pressed(), 4);
        // Only the last sample counts.
        assert_eq!(KeySample::from_bytes([0xFF, 0xFF, 0x10]).first_pressed(), 0);
    }

    #[test]
    fn leds_are_active_low() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.set_leds(0b0101).unwrap();
        di.check_multi(sends!(0x41, 0b1010, S, 0x40, S));
        disp.set_leds(0xF0).unwrap();
        assert_eq!(di.controller().leds, Some(0x0F));
    }

    #[test]
    fn read_keys_frame() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        di.queue_reads(&[0x00, 0x20, 0x04]);
        let keys = disp.read_keys().unwrap();
        assert_eq!(keys.bits(), 0x00_2004);
        assert_eq!(keys.first_pressed(), 3);
        di.check_multi(&[
            Sent::Byte(0x42),
            Sent::BeginRead,
            Sent::Read(0x00),
            Sent::Read(0x20),
            Sent::Read(0x04),
            Sent::EndRead,
            Sent::Strobe,
            Sent::Byte(0x40),
            Sent::Strobe,
        ]);
        // Back in write mode for the next memory burst.
        assert_eq!(di.controller().data_mode, DATA_WRITE);
    }

    #[test]
    fn first_pressed_key_reads_matrix() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        di.queue_reads(&[0, 0, 0b0010]);
        assert_eq!(disp.first_pressed_key().unwrap(), 2);
        assert_eq!(disp.first_pressed_key().unwrap(), 0);
    }

    #[test]
    fn read_switches_masks_to_four_bits() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        di.queue_reads(&[0xA9]);
        assert_eq!(disp.read_switches().unwrap(), 0x09);
        di.check_multi(&[
            Sent::Byte(0x43),
            Sent::BeginRead,
            Sent::Read(0xA9),
            Sent::EndRead,
            Sent::Strobe,
            Sent::Byte(0x40),
            Sent::Strobe,
        ]);
    }

    #[test]
    fn reads_leave_memory_alone() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_string_at("12", 1, false).unwrap();
        let before = di.controller().memory;
        di.queue_reads(&[1, 2, 3, 4]);
        disp.read_keys().unwrap();
        disp.read_switches().unwrap();
        disp.set_leds(1).unwrap();
        assert_eq!(di.controller().memory, before);
    }
}
