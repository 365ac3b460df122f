//! Rendering characters into grid memory.

use core::fmt::Write;

use heapless::String;

use crate::command::consts::DISPLAY_MEMORY_BYTES;
use crate::interface::BusInterface;
use crate::layout::Glyph;

use super::{Display, Error};

/// Longest rendered number. Every displayable character takes at least one byte of display
/// memory, so a glass shows at most 22.
const NUMBER_TEXT_MAX: usize = DISPLAY_MEMORY_BYTES;

impl<DI> Display<DI>
where
    DI: BusInterface,
{
    /// Write `text` from the current cursor, one grid at a time, in a single memory burst.
    ///
    /// Position the cursor first with [`set_cursor`](Self::set_cursor)`(position, false)`, or use
    /// [`write_string_at`](Self::write_string_at). Writing stops at the end of `text` or at a NUL.
    /// Characters the font does not cover are drawn blank. On packed grids two characters share
    /// a grid. When `colon` is set, the layout's colon segment is drawn at its colon positions.
    /// The cursor advances one step per grid written, and is not bounds checked.
    pub fn write_string(&mut self, text: &str, colon: bool) -> Result<(), Error<DI::Error>> {
        self.write_text(text.as_bytes(), colon)
    }

    /// Move the cursor to `position` and write `text` there.
    pub fn write_string_at(
        &mut self,
        text: &str,
        position: u8,
        colon: bool,
    ) -> Result<(), Error<DI::Error>> {
        self.set_cursor(position, false)?;
        self.write_text(text.as_bytes(), colon)
    }

    /// Write `number` zero-padded to `width` characters from the current cursor.
    ///
    /// A negative sign takes one of the characters. If the number has more characters than
    /// `width`, its least significant digits are dropped until it fits. If there is still not
    /// enough room between the cursor and the end of the glass, leading characters are dropped,
    /// including the sign.
    pub fn write_int(&mut self, number: i32, width: u8, colon: bool) -> Result<(), Error<DI::Error>> {
        let room = i16::from(self.layout.geometry.displayable) - i16::from(self.cursor) + 1;
        let text = number_text(number, width, room.max(0) as u8);
        self.write_text(text.as_bytes(), colon)
    }

    /// Move the cursor to `position` and write `number` there.
    pub fn write_int_at(
        &mut self,
        number: i32,
        width: u8,
        position: u8,
        colon: bool,
    ) -> Result<(), Error<DI::Error>> {
        self.set_cursor(position, false)?;
        self.write_int(number, width, colon)
    }

    /// Write characters from the cursor until the end of `text` or a NUL, then strobe.
    pub(super) fn write_text(&mut self, text: &[u8], colon: bool) -> Result<(), Error<DI::Error>> {
        let font = self.layout.font;
        let mut chars = text.iter().cloned().take_while(|&c| c != 0);
        while let Some(c) = chars.next() {
            let glyph = font.glyph(c);
            let (mut lower, mut upper) = if self.layout.packing.is_packed(self.cursor) {
                // The second character of a pair goes in the lower byte.
                let second = chars.next().map(|c| font.glyph(c)).unwrap_or_default();
                (second.lsb, glyph.lsb)
            } else {
                let Glyph { msb, lsb } = glyph;
                (lsb, msb)
            };
            if let Some(mark) = self.layout.colon.filter(|_| colon) {
                if mark.applies_at(self.cursor) {
                    let (l, u) = mark.masks();
                    lower |= l;
                    upper |= u;
                }
            }
            self.write_grid(lower, upper)?;
            self.cursor = self.cursor.saturating_add(1);
        }
        self.end_transaction()
    }

    /// Send one grid's memory bytes at the cursor, merged with the icon overlay. Only the lower
    /// byte is sent for 1-byte grids.
    pub(super) fn write_grid(&mut self, lower: u8, upper: u8) -> Result<(), Error<DI::Error>> {
        let address = self.layout.geometry.address_of(self.cursor) as usize;
        self.write(lower | self.overlay(address), false)?;
        if self.layout.geometry.bytes_per_grid == 2 {
            self.write(upper | self.overlay(address + 1), false)?;
        }
        Ok(())
    }
}

/// Render `number` zero-padded or truncated to `width` characters, then keep only the last
/// `room` of them.
pub(crate) fn number_text(number: i32, width: u8, room: u8) -> String<NUMBER_TEXT_MAX> {
    let negative = number < 0;
    let mut magnitude = i64::from(number).abs() as u64;
    let width = width as usize;

    // Zero has no digits of its own; padding supplies them.
    let length = digits(magnitude) + negative as usize;
    if length > width {
        for _ in 0..(length - width) {
            magnitude /= 10;
        }
    }

    let len = width.min(room as usize).min(NUMBER_TEXT_MAX);
    let sign = negative && len == width;
    let digit_count = len - sign as usize;
    // Clipping from the left keeps the low digits.
    let shown = match 10u64.checked_pow(digit_count as u32) {
        Some(limit) => magnitude % limit,
        None => magnitude,
    };

    let mut text = String::new();
    if sign {
        let _ = text.push('-');
    }
    if digit_count > 0 {
        let _ = write!(text, "{:0w$}", shown, w = digit_count);
    }
    text
}

fn digits(mut n: u64) -> usize {
    let mut count = 0;
    while n > 0 {
        n /= 10;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::super::testing::spy_display;
    use super::*;
    use crate::interface::test_spy::Sent;
    use crate::layout::presets::{self, dvd_icons, sixteen_segment_icons};

    fn number(number: i32, width: u8, room: u8) -> std::string::String {
        number_text(number, width, room).as_str().into()
    }

    #[test]
    fn number_padding() {
        assert_eq!(number(7, 3, 6), "007");
        assert_eq!(number(0, 3, 6), "000");
        assert_eq!(number(0, 0, 6), "");
        assert_eq!(number(42, 2, 6), "42");
        assert_eq!(number(-12, 3, 6), "-12");
        assert_eq!(number(-5, 4, 6), "-005");
    }

    #[test]
    fn number_truncates_low_digits_to_width() {
        assert_eq!(number(12345, 3, 6), "123");
        assert_eq!(number(-1234, 3, 6), "-12");
        assert_eq!(number(-1, 1, 6), "-");
        assert_eq!(number(i32::MIN, 11, 11), "-2147483648");
        assert_eq!(number(i32::MAX, 4, 11), "2147");
    }

    #[test]
    fn number_clips_leading_characters_to_room() {
        assert_eq!(number(123456, 6, 4), "3456");
        assert_eq!(number(-123456, 7, 6), "123456");
        assert_eq!(number(-1, 1, 1), "-");
        assert_eq!(number(5, 3, 0), "");
        // Never wider than the widest glass.
        assert_eq!(number(-1, 40, 40), "0000000000000000000001");
    }

    #[test]
    fn write_string_one_char_per_grid() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(1, false).unwrap();
        disp.write_string("A-", false).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0xC0,
            0b0100_0111, 0b1110_0001, // A
            0x01, 0x81, // -
            S,
        ));
        assert_eq!(disp.cursor(), 3);
    }

    #[test]
    fn write_string_stops_at_nul() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_string_at("1\u{0}1", 2, false).unwrap();
        di.check_multi(sends!(0xC2, 0x0C, 0x40, S));
        assert_eq!(disp.cursor(), 3);
    }

    #[test]
    fn unknown_characters_are_blank() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_string_at("a\u{7}é", 1, false).unwrap();
        // 'é' is two bytes, both outside the font.
        di.check_multi(sends!(0xC0, 0, 0, 0, 0, 0, 0, 0, 0, S));
        assert_eq!(disp.cursor(), 5);
    }

    #[test]
    fn write_string_packed_pairs() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_string_at("123456", 1, false).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0xC0,
            0b0100_1000, 0, // 1
            0b1101_0110, 0, // 2
            0b0111_1000, 0b1101_1010, // 4 low, 3 high
            0b1011_1110, 0b1011_1010, // 6 low, 5 high
            S,
        ));
        assert_eq!(disp.cursor(), 5);
    }

    #[test]
    fn packed_pair_cut_short_is_blank() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_string_at("8", 3, false).unwrap();
        di.check_multi(sends!(0xC4, 0, 0b1111_1110, S));
        assert_eq!(disp.cursor(), 4);
    }

    #[test]
    fn colon_on_packed_grid() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_string_at("1234", 3, true).unwrap();
        let model = di.controller();
        // Only the fourth grid carries the colon, in its lower byte.
        #[cfg_attr(rustfmt, rustfmt_skip)]
        assert_eq!(&model.memory[4..8], &[
            0b1101_0110, 0b0100_1000, // 2 low, 1 high
            0b0111_1001, 0b1101_1010, // 4 and colon low, 3 high
        ]);

        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_string_at("12301", 1, true).unwrap();
        let model = di.controller();
        assert_eq!(&model.memory[6..8], &[0b1, 0b0100_1000]);
    }

    #[test]
    fn colon_on_single_char_grids() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_string_at("      ", 1, true).unwrap();
        let model = di.controller();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        assert_eq!(&model.memory[..12], &[
            0, 0,
            0, 0,
            0, 0b10, // grid 3
            0, 0,
            0, 0b10, // grid 5
            0, 0,
        ]);

        // No colon without the flag.
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_string_at("      ", 1, false).unwrap();
        assert_eq!(di.controller().memory, [0; DISPLAY_MEMORY_BYTES]);
    }

    #[test]
    fn icons_overlay_text() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.set_icon(dvd_icons::DVD).unwrap();
        disp.set_icon(dvd_icons::DTS).unwrap();
        disp.write_string_at("11", 1, false).unwrap();
        di.check_multi(sends!(0xC0, 0b0100_1000, 0b10, 0b0100_1000, 0, S));

        // Grids not written are not touched.
        assert_eq!(di.controller().memory[4], 0);
        disp.write_string_at("  ", 3, false).unwrap();
        assert_eq!(di.controller().memory[4], 0b1);
    }

    #[test]
    fn colon_icon_and_flag_agree() {
        let (a, mut with_flag) = spy_display(presets::sixteen_segment());
        with_flag.write_string_at("  ", 3, true).unwrap();
        let (b, mut with_icon) = spy_display(presets::sixteen_segment());
        with_icon.set_icon(sixteen_segment_icons::COLON_1).unwrap();
        with_icon.write_string_at("  ", 3, false).unwrap();
        assert_eq!(&a.controller().memory[6..8], &b.controller().memory[6..8]);
    }

    #[test]
    fn write_int_at_cursor() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_int_at(-7, 3, 2, false).unwrap();
        let font = disp.layout().font;
        let model = di.controller();
        let glyphs: std::vec::Vec<_> = b"-07".iter().map(|&c| font.glyph(c)).collect();
        for (grid, g) in glyphs.iter().enumerate() {
            let a = 2 * (grid + 1);
            assert_eq!((model.memory[a], model.memory[a + 1]), (g.lsb, g.msb));
        }
        assert_eq!(disp.cursor(), 5);
    }

    #[test]
    fn write_int_clips_to_room_left() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_int_at(1234, 4, 5, false).unwrap();
        // Only "34" fits at grids 5 and 6.
        let font = disp.layout().font;
        let model = di.controller();
        assert_eq!(model.memory[8], font.glyph(b'3').lsb);
        assert_eq!(model.memory[10], font.glyph(b'4').lsb);
        assert_eq!(disp.cursor(), 7);
    }

    #[test]
    fn write_int_past_the_end_writes_nothing() {
        let (mut di, mut disp) = spy_display(presets::sixteen_segment());
        disp.write_string_at("123456", 1, false).unwrap();
        di.clear();
        disp.write_int(9, 1, false).unwrap();
        di.check_multi(sends!(S));
    }

    #[test]
    fn write_int_on_packed_glass() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_int_at(123456, 6, 1, false).unwrap();
        let packed = di.bytes();
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.write_string_at("123456", 1, false).unwrap();
        assert_eq!(packed, di.bytes());
    }
}
