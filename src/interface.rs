//! The transport between the engine and the controller's three-wire serial port.
//!
//! The PT6312 family uses a synchronous, half-duplex port: a chip-select (STB) line framing each
//! transaction, a clock line, and a single bidirectional data line. Bytes travel least-significant
//! bit first. The first byte after chip-select falls is a command; any following bytes in the
//! same transaction are data. The controller never acknowledges anything.

/// A connection to the controller's serial port.
///
/// The engine only talks to the controller through this trait, so the display logic can be driven
/// against a recording spy in tests and against real pins through [`bitbang::BitBangInterface`].
pub trait BusInterface {
    /// Error raised by the underlying lines.
    type Error;

    /// Shift one byte out, asserting chip-select first if it is not already asserted. When
    /// `end_transaction` is set, chip-select is strobed inactive afterwards, which latches the
    /// transaction into the controller.
    fn write_byte(&mut self, value: u8, end_transaction: bool) -> Result<(), Self::Error>;

    /// Strobe chip-select inactive without sending anything else.
    fn end_transaction(&mut self) -> Result<(), Self::Error>;

    /// Turn the data line around to input, pulled to its idle level, and let it settle.
    fn begin_read(&mut self) -> Result<(), Self::Error>;

    /// Clock one byte in from the controller. `begin_read` must have been called first.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Turn the data line back to output.
    fn end_read(&mut self) -> Result<(), Self::Error>;

    /// Busy-wait for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

pub mod bitbang {
    //! A `BusInterface` that toggles three GPIO lines directly. This is the only way to talk to
    //! these controllers, as the data line changes direction mid-transaction and key data is
    //! clocked out on the opposite edge to the one that latches written data.

    use hal::blocking::delay::{DelayMs, DelayUs};
    use hal::digital::v2::{InputPin, OutputPin};

    use super::BusInterface;

    /// Minimum hold on each half of a bit cell is 0.5µs; `DelayUs` cannot go below 1µs.
    const HALF_BIT_US: u16 = 1;
    /// Settle time around chip-select transitions.
    const STROBE_SETTLE_US: u16 = 1;

    /// The bidirectional data line.
    pub trait DataLine {
        type Error;

        /// Drive the line.
        fn set_output_mode(&mut self) -> Result<(), Self::Error>;
        /// Release the line to input, pulled up to its idle-high level.
        fn set_input_mode(&mut self) -> Result<(), Self::Error>;
        fn set_high(&mut self) -> Result<(), Self::Error>;
        fn set_low(&mut self) -> Result<(), Self::Error>;
        /// Sample the line while in input mode.
        fn is_low(&self) -> Result<bool, Self::Error>;
    }

    /// How a sampled data line level maps to a bit value when reading.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum ReadPolarity {
        /// A line held low by the controller reads as 1.
        ActiveLow,
        /// A line held low by the controller reads as 0, matching the open-drain DOUT of parts
        /// that release the line for 1 bits.
        ActiveHigh,
    }

    /// Adapter for a single pin configured as open-drain with a pull-up, which can be read back
    /// while released. "Input mode" is simply releasing the line high.
    pub struct OpenDrainDataLine<P> {
        pin: P,
    }

    impl<P, E> OpenDrainDataLine<P>
    where
        P: OutputPin<Error = E> + InputPin<Error = E>,
    {
        pub fn new(pin: P) -> Self {
            Self { pin }
        }

        pub fn release(self) -> P {
            self.pin
        }
    }

    impl<P, E> DataLine for OpenDrainDataLine<P>
    where
        P: OutputPin<Error = E> + InputPin<Error = E>,
    {
        type Error = E;

        fn set_output_mode(&mut self) -> Result<(), E> {
            Ok(())
        }
        fn set_input_mode(&mut self) -> Result<(), E> {
            OutputPin::set_high(&mut self.pin)
        }
        fn set_high(&mut self) -> Result<(), E> {
            OutputPin::set_high(&mut self.pin)
        }
        fn set_low(&mut self) -> Result<(), E> {
            OutputPin::set_low(&mut self.pin)
        }
        fn is_low(&self) -> Result<bool, E> {
            InputPin::is_low(&self.pin)
        }
    }

    pub struct BitBangInterface<CS, CLK, DATA, DELAY> {
        /// Chip-select / strobe, active low.
        cs: CS,
        /// Shift clock, idle high. Written data is latched on the rising edge; read data is
        /// presented after the falling edge.
        clk: CLK,
        /// Bidirectional data line.
        data: DATA,
        delay: DELAY,
        polarity: ReadPolarity,
    }

    impl<CS, CLK, DATA, DELAY, E> BitBangInterface<CS, CLK, DATA, DELAY>
    where
        CS: OutputPin<Error = E>,
        CLK: OutputPin<Error = E>,
        DATA: DataLine<Error = E>,
        DELAY: DelayUs<u16> + DelayMs<u16>,
    {
        /// Take ownership of the three lines and a delay provider, and park the bus: chip-select
        /// and clock idle high, data line driven.
        pub fn new(mut cs: CS, mut clk: CLK, mut data: DATA, delay: DELAY) -> Result<Self, E> {
            data.set_output_mode()?;
            cs.set_high()?;
            clk.set_high()?;
            Ok(Self {
                cs,
                clk,
                data,
                delay,
                polarity: ReadPolarity::ActiveLow,
            })
        }

        /// Select how sampled levels are turned into bits when reading keys and switches.
        pub fn read_polarity(self, polarity: ReadPolarity) -> Self {
            Self { polarity, ..self }
        }

        /// Give the lines and the delay provider back.
        pub fn release(self) -> (CS, CLK, DATA, DELAY) {
            (self.cs, self.clk, self.data, self.delay)
        }

        fn hold(&mut self) {
            self.delay.delay_us(HALF_BIT_US);
        }

        fn strobe(&mut self) -> Result<(), E> {
            self.delay.delay_us(STROBE_SETTLE_US);
            self.cs.set_high()?;
            self.delay.delay_us(STROBE_SETTLE_US);
            Ok(())
        }
    }

    impl<CS, CLK, DATA, DELAY, E> BusInterface for BitBangInterface<CS, CLK, DATA, DELAY>
    where
        CS: OutputPin<Error = E>,
        CLK: OutputPin<Error = E>,
        DATA: DataLine<Error = E>,
        DELAY: DelayUs<u16> + DelayMs<u16>,
    {
        type Error = E;

        fn write_byte(&mut self, value: u8, end_transaction: bool) -> Result<(), E> {
            self.cs.set_low()?;
            self.delay.delay_us(STROBE_SETTLE_US);
            for bit in 0..8 {
                self.clk.set_low()?;
                if value & (1 << bit) != 0 {
                    self.data.set_high()?;
                } else {
                    self.data.set_low()?;
                }
                self.hold();
                self.clk.set_high()?;
                self.hold();
            }
            if end_transaction {
                self.strobe()?;
            }
            Ok(())
        }

        fn end_transaction(&mut self) -> Result<(), E> {
            self.strobe()
        }

        fn begin_read(&mut self) -> Result<(), E> {
            self.data.set_input_mode()?;
            // Chip-select is still low and the clock still high from the command byte.
            self.delay.delay_us(STROBE_SETTLE_US);
            Ok(())
        }

        fn read_byte(&mut self) -> Result<u8, E> {
            let mut value = 0u8;
            for bit in 0..8 {
                self.clk.set_low()?;
                self.hold();
                let low = self.data.is_low()?;
                let set = match self.polarity {
                    ReadPolarity::ActiveLow => low,
                    ReadPolarity::ActiveHigh => !low,
                };
                if set {
                    value |= 1 << bit;
                }
                self.clk.set_high()?;
                self.hold();
            }
            Ok(value)
        }

        fn end_read(&mut self) -> Result<(), E> {
            self.data.set_output_mode()
        }

        fn delay_ms(&mut self, ms: u32) {
            let mut remaining = ms;
            while remaining > 0 {
                let step = remaining.min(u32::from(u16::max_value())) as u16;
                self.delay.delay_ms(step);
                remaining -= u32::from(step);
            }
        }
    }

}
