//! Alarm tone output: a fixed bit-toggle loop on the piezo pin.

use embassy_rp::gpio::Output;
use embassy_time::Timer;

use crate::shared_constants::{TONE_HALF_PERIOD, TONE_TOGGLE_COUNT};

/// The piezo/tone output.
pub struct Buzzer {
    pin: Output<'static>,
}

impl Buzzer {
    #[must_use]
    pub const fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }

    /// One burst of the repeating alarm tone. The main loop calls this once
    /// per pass while the alarm is sounding and unacknowledged.
    pub async fn beep(&mut self) {
        for _ in 0..TONE_TOGGLE_COUNT {
            self.pin.toggle();
            Timer::after(TONE_HALF_PERIOD).await;
        }
        self.pin.set_low();
    }
}
