//! The busy spinner: a segment chasing around a ring with a fading trail behind it.

use itertools::izip;

use crate::interface::BusInterface;
use crate::layout::{SpinnerGating, SpinnerTarget};

use super::{Display, Error};

/// Number of ring segments, and so of animation frames.
pub const FRAMES: u8 = 6;
/// Calls spent on each frame before the head advances.
pub const LOOPS_PER_FRAME: u8 = 70;

/// For the 1st, 2nd and 3rd segment behind the head: the trail segment is lit on loops that are
/// a multiple of this.
const TRAIL_PERIODS: [u8; 3] = [2, 5, 12];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SpinnerState {
    /// 1-based index of the head segment.
    pub(crate) frame: u8,
    pub(crate) loop_count: u8,
    /// Calls left to skip before the next render, when rendering is gated.
    pub(crate) gate: u8,
}

impl SpinnerState {
    pub(crate) fn new() -> Self {
        SpinnerState {
            frame: 1,
            loop_count: 0,
            gate: 0,
        }
    }

    fn advance(&mut self) {
        self.loop_count += 1;
        if self.loop_count >= LOOPS_PER_FRAME {
            self.loop_count = 0;
            self.frame = if self.frame >= FRAMES { 1 } else { self.frame + 1 };
        }
    }
}

/// The segments lit for `frame` (1-6) on `loop_count`: the head segment, plus up to three
/// segments behind it lit on a fraction of loops. The trail does not wrap around past the first
/// segment of the ring.
pub fn trail_mask(segments: &[u16; 6], frame: u8, loop_count: u8) -> u16 {
    let head = frame.max(1).min(FRAMES) as usize - 1;
    let mut mask = segments[head];
    for (behind, &period) in izip!(1..=TRAIL_PERIODS.len(), TRAIL_PERIODS.iter()) {
        if head >= behind && loop_count % period == 0 {
            mask |= segments[head - behind];
        }
    }
    mask
}

impl<DI> Display<DI>
where
    DI: BusInterface,
{
    /// Advance the busy spinner by one step, rendering a frame unless the layout gates this
    /// call out. Returns whether a frame was rendered.
    ///
    /// Call this in a loop while waiting on something. Icons are merged into the spinner's grid.
    /// The cursor is moved when the spinner owns a whole grid.
    pub fn busy_spinner(&mut self) -> Result<bool, Error<DI::Error>> {
        let gated = self.layout.spinner.gating == SpinnerGating::EveryOtherCall;
        if gated && self.spinner.gate > 0 {
            self.spinner.gate -= 1;
            return Ok(false);
        }

        let state = self.spinner;
        let mask = trail_mask(&self.layout.spinner.segments, state.frame, state.loop_count);
        self.spinner.advance();
        if gated {
            self.spinner.gate = 1;
        }
        #[cfg(feature = "defmt")]
        {
            if self.spinner.frame != state.frame {
                defmt::trace!("spinner frame {}", self.spinner.frame);
            }
        }

        match self.layout.spinner.target {
            SpinnerTarget::Byte { address } => {
                let data = mask as u8 | self.overlay(address as usize);
                self.write_byte(address, data)?;
            }
            SpinnerTarget::Grid(position) => {
                self.set_cursor(position, false)?;
                self.write_grid(mask as u8, (mask >> 8) as u8)?;
                self.end_transaction()?;
            }
        }
        self.reset_display()?;
        Ok(true)
    }

    /// Restart the spinner animation from its first frame.
    pub fn busy_spinner_reset(&mut self) {
        self.spinner = SpinnerState::new();
    }
}
