//! Raw multiplexed button samples and the two-pass stability filter.
//!
//! The strobed buttons share wiring with the digit-select lines, so a raw
//! sample is only meaningful together with the slot that was active when it
//! was taken. The wake/cancel button is wired independently and shows up as
//! the all-pressed sentinel.

use crate::shared_constants::CELL_COUNT_U8;

/// One raw button sample per display sweep.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonSignal {
    /// No press seen during the sweep.
    #[default]
    Idle,
    /// The shared sense line was asserted while digit slot 0..=3 was strobed.
    Strobe(u8),
    /// The independent wake/cancel button, or the all-pressed sentinel.
    WakeCancel,
}

impl ButtonSignal {
    /// Attributes a sense-line sample to the digit slot being strobed.
    #[must_use]
    pub fn from_strobe(slot: u8, pressed: bool) -> Self {
        debug_assert!(slot < CELL_COUNT_U8, "strobe slot out of range");
        if pressed { Self::Strobe(slot) } else { Self::Idle }
    }
}

/// The two-pass stability filter for the raw button signal.
///
/// A code is acted upon only once it has been read equal on two consecutive
/// loop passes; the first differing read is recorded and discarded. The
/// wake/cancel sentinel never produces a set action and is always mapped
/// back to [`ButtonSignal::Idle`] before filtering.
#[derive(Debug, Default)]
pub struct Debouncer {
    last: ButtonSignal,
}

impl Debouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: ButtonSignal::Idle,
        }
    }

    /// Filters one raw sample, returning the code to act on, if any.
    pub fn filter(&mut self, raw: ButtonSignal) -> Option<ButtonSignal> {
        let raw = if raw == ButtonSignal::WakeCancel {
            ButtonSignal::Idle
        } else {
            raw
        };
        if raw != self.last {
            self.last = raw;
            return None;
        }
        Some(raw)
    }
}
