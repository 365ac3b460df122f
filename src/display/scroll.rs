//! Scrolling text longer than the glass, one character per page.

use core::iter::FusedIterator;

use crate::interface::BusInterface;
use crate::layout::font::FIRST_CODE;

use super::{Display, Error};

/// An iterator that renders one page of scrolling text per step.
///
/// Each page is a window as wide as the glass, shifted one character further into the text than
/// the last, written at the cursor position the scroll started from. After a page is written the
/// controller is reinitialized and the page is held for the configured time before `next`
/// returns its offset. Once the window reaches the end of the text the last page is held for the
/// final dwell time and the iterator is exhausted.
///
/// The engine stays usable between pages through [`display`](Self::display), so other devices
/// can be polled while text scrolls.
pub struct Scroll<'di, 't, DI>
where
    DI: 'di + BusInterface,
{
    display: &'di mut Display<DI>,
    text: &'t [u8],
    start: u8,
    offset: usize,
    finished: bool,
}

impl<'di, 't, DI> Scroll<'di, 't, DI>
where
    DI: 'di + BusInterface,
{
    fn new(display: &'di mut Display<DI>, text: &'t [u8]) -> Self {
        let len = text.iter().position(|&c| c == 0).unwrap_or(text.len());
        let start = display.cursor;
        Scroll {
            display,
            text: &text[..len],
            start,
            offset: 0,
            finished: false,
        }
    }

    /// The engine, mid-scroll. Anything written here is overwritten by the next page.
    pub fn display(&mut self) -> &mut Display<DI> {
        &mut *self.display
    }

    fn page(&mut self) -> Result<usize, Error<DI::Error>> {
        let width = self.display.layout.geometry.displayable as usize;
        let offset = self.offset;
        if offset > 0 {
            self.display.set_cursor(self.start, false)?;
        }
        let end = (offset + width).min(self.text.len());
        self.display.write_text(&self.text[offset..end], false)?;
        self.display.reset_display()?;
        let hold = if offset == 0 {
            self.display.config.scroll_first_page_ms
        } else {
            self.display.config.scroll_page_ms
        };
        self.display.iface.delay_ms(hold);
        #[cfg(feature = "defmt")]
        defmt::trace!("scroll page at offset {}", offset);
        self.offset += 1;
        Ok(offset)
    }
}

impl<'di, 't, DI> Iterator for Scroll<'di, 't, DI>
where
    DI: 'di + BusInterface,
{
    type Item = Result<usize, Error<DI::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let width = self.display.layout.geometry.displayable as usize;
        if self.offset > 0 && self.offset + width > self.text.len() {
            self.finished = true;
            let hold = self.display.config.scroll_final_ms;
            self.display.iface.delay_ms(hold);
            return None;
        }
        let page = self.page();
        if page.is_err() {
            self.finished = true;
        }
        Some(page)
    }
}

impl<'di, 't, DI> FusedIterator for Scroll<'di, 't, DI> where DI: 'di + BusInterface {}

impl<DI> Display<DI>
where
    DI: BusInterface,
{
    /// Start scrolling `text` from the current cursor. Nothing is written until the first call to
    /// `next`. Text no wider than the glass is shown as a single page.
    pub fn scroll<'di, 't>(&'di mut self, text: &'t str) -> Scroll<'di, 't, DI> {
        Scroll::new(self, text.as_bytes())
    }

    /// Scroll `text` to the end, calling `on_page` after every page is shown.
    pub fn scroll_text<F>(&mut self, text: &str, on_page: F) -> Result<(), Error<DI::Error>>
    where
        F: FnMut(&mut Self),
    {
        self.scroll_bytes(text.as_bytes(), on_page)
    }

    /// Scroll every character the font draws as something other than blank.
    pub fn display_all_glyphs(&mut self) -> Result<(), Error<DI::Error>> {
        let mut glyphs = [0u8; 256 - FIRST_CODE as usize];
        let mut len = 0;
        for (slot, code) in glyphs.iter_mut().zip(self.layout.font.printable()) {
            *slot = code;
            len += 1;
        }
        self.scroll_bytes(&glyphs[..len], |_| {})
    }

    fn scroll_bytes<F>(&mut self, text: &[u8], mut on_page: F) -> Result<(), Error<DI::Error>>
    where
        F: FnMut(&mut Self),
    {
        let mut scroll = Scroll::new(self, text);
        while let Some(page) = scroll.next() {
            page?;
            on_page(scroll.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::spy_display;
    use super::*;
    use crate::config::Config;
    use crate::interface::test_spy::{Sent, TestSpyInterface};
    use crate::layout::presets;

    fn written_pages(sent: &[Sent]) -> usize {
        sent.iter().filter(|s| **s == Sent::Delay(500) || **s == Sent::Delay(1000)).count()
    }

    #[test]
    fn pages_slide_one_character() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(1, false).unwrap();
        let offsets: std::vec::Vec<usize> =
            disp.scroll("ABCDEFGH").map(|p| p.unwrap()).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
        assert_eq!(di.delays(), vec![1000, 500, 500, 2000]);
        // The last page shows the end of the text.
        let font = disp.layout().font;
        let model = di.controller();
        assert_eq!(model.memory[0], font.glyph(b'C').lsb);
        assert_eq!(model.memory[10], font.glyph(b'H').lsb);
        assert_eq!(disp.cursor(), 7);
    }

    #[test]
    fn page_framing() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(1, false).unwrap();
        let mut scroll = disp.scroll("ABCDEFG");
        scroll.next().unwrap().unwrap();
        let first = di.transactions();
        // Memory burst at the caller's cursor, then the reinit sequence.
        assert_eq!(first.len(), 4);
        assert_eq!(first[0][0], 0xC0);
        assert_eq!(first[0].len(), 1 + 12);
        assert_eq!(&first[1..], &[vec![0x02], vec![0x8F], vec![0x40]]);

        scroll.next().unwrap().unwrap();
        let second = di.transactions();
        assert_eq!(second[4][0], 0xC0);
        assert_eq!(second[4].len(), 1 + 12);
        assert!(scroll.next().is_none());
        assert!(scroll.next().is_none());
        assert_eq!(di.delays(), vec![1000, 500, 2000]);
    }

    #[test]
    fn short_text_renders_once() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(1, false).unwrap();
        assert_eq!(disp.scroll("HI").count(), 1);
        assert_eq!(di.delays(), vec![1000, 2000]);

        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(1, false).unwrap();
        assert_eq!(disp.scroll("SIXSIX").count(), 1);
        assert_eq!(di.delays(), vec![1000, 2000]);
    }

    #[test]
    fn scroll_starts_from_cursor() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(3, false).unwrap();
        disp.scroll_text("ABCDEFG", |_| {}).unwrap();
        let tx = di.transactions();
        // The second page restores the starting position.
        assert_eq!(tx[4][0], 0xC4);
    }

    #[test]
    fn scroll_stops_at_nul() {
        let (di, mut disp) = spy_display(presets::sixteen_segment());
        disp.set_cursor(1, false).unwrap();
        assert_eq!(disp.scroll("ABCDEFG\u{0}XYZ").count(), 2);
        assert_eq!(written_pages(&di.sent()), 2);
    }

    #[test]
    fn callback_runs_after_each_page() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.set_cursor(1, false).unwrap();
        let mut pages = 0;
        disp.scroll_text("0123456789", |d| {
            pages += 1;
            // The engine can be used between pages.
            d.set_leds(pages).unwrap();
        })
        .unwrap();
        assert_eq!(pages, 5);
        assert_eq!(di.controller().leds, Some(!5 & 0x0F));
    }

    #[test]
    fn scroll_speed_from_config() {
        let di = TestSpyInterface::new();
        let cfg = Config::new()
            .scroll_first_page_ms(10)
            .scroll_page_ms(20)
            .scroll_final_ms(30);
        let mut disp = Display::new(di.split(), presets::dvd_player(), cfg).unwrap();
        disp.set_cursor(1, false).unwrap();
        disp.scroll_text("12345678", |_| {}).unwrap();
        assert_eq!(di.delays(), vec![10, 20, 20, 30]);
    }

    #[test]
    fn all_glyphs_skip_blank_entries() {
        let (di, mut disp) = spy_display(presets::dvd_player());
        disp.set_cursor(1, false).unwrap();
        disp.display_all_glyphs().unwrap();
        let printable = disp.layout().font.printable().count();
        // One page per window position over the printable glyphs.
        assert_eq!(written_pages(&di.sent()), printable - 6 + 1);
    }
}
