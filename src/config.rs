//! Runtime options that are not a property of the display glass itself: brightness and the
//! various dwell times. The physical layout lives in [`Layout`](crate::layout::Layout).

use crate::command::consts::{BRIGHTNESS_MASK, BRIGHTNESS_MAX};

/// A configuration for the engine. Builder methods offer a declarative way to override any of
/// the defaults, which match the timings the controller family is usually driven with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub(crate) brightness: u8,
    pub(crate) power_up_delay_ms: u32,
    pub(crate) scroll_first_page_ms: u32,
    pub(crate) scroll_page_ms: u32,
    pub(crate) scroll_final_ms: u32,
    pub(crate) segment_test_ms: u32,
}

impl Config {
    /// Create a configuration with full brightness, a 500ms power-up settle, and scroll pages
    /// held for 1000ms (first), 500ms (others) and 2000ms (after the last).
    pub fn new() -> Self {
        Config {
            brightness: BRIGHTNESS_MAX,
            power_up_delay_ms: 500,
            scroll_first_page_ms: 1000,
            scroll_page_ms: 500,
            scroll_final_ms: 2000,
            segment_test_ms: 2000,
        }
    }

    /// Initial brightness, 0-7. Higher bits are masked off.
    pub fn brightness(self, brightness: u8) -> Self {
        Self {
            brightness: brightness & BRIGHTNESS_MASK,
            ..self
        }
    }

    /// Wait after power-up before the first command. The controller needs at least 500ms.
    pub fn power_up_delay_ms(self, ms: u32) -> Self {
        Self {
            power_up_delay_ms: ms,
            ..self
        }
    }

    /// How long the first page of scrolled text is held.
    pub fn scroll_first_page_ms(self, ms: u32) -> Self {
        Self {
            scroll_first_page_ms: ms,
            ..self
        }
    }

    /// How long every later page of scrolled text is held. This sets the scroll speed.
    pub fn scroll_page_ms(self, ms: u32) -> Self {
        Self {
            scroll_page_ms: ms,
            ..self
        }
    }

    /// How long the last page stays up once scrolling has finished.
    pub fn scroll_final_ms(self, ms: u32) -> Self {
        Self {
            scroll_final_ms: ms,
            ..self
        }
    }

    /// How long each segment stays lit during [`Display::segments_test`](crate::Display::segments_test).
    pub fn segment_test_ms(self, ms: u32) -> Self {
        Self {
            segment_test_ms: ms,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.brightness, 7);
        assert_eq!(cfg.power_up_delay_ms, 500);
        assert_eq!(cfg.scroll_first_page_ms, 1000);
        assert_eq!(cfg.scroll_page_ms, 500);
        assert_eq!(cfg.scroll_final_ms, 2000);
    }

    #[test]
    fn brightness_is_masked() {
        assert_eq!(Config::new().brightness(3).brightness, 3);
        assert_eq!(Config::new().brightness(0x0C).brightness, 4);
    }

    #[test]
    fn builder_chains() {
        let cfg = Config::new()
            .scroll_page_ms(250)
            .scroll_first_page_ms(800)
            .scroll_final_ms(0)
            .power_up_delay_ms(600)
            .segment_test_ms(10);
        assert_eq!(cfg.scroll_page_ms, 250);
        assert_eq!(cfg.scroll_first_page_ms, 800);
        assert_eq!(cfg.scroll_final_ms, 0);
        assert_eq!(cfg.power_up_delay_ms, 600);
        assert_eq!(cfg.segment_test_ms, 10);
    }
}
