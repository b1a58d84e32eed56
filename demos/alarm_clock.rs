//! Four-digit LED alarm clock firmware.
//!
//! Wake the display with the wake/cancel button. While the display is on,
//! the hour-tens strobe button toggles between clock and alarm, and the
//! minute-units / minute-tens strobe buttons fast- and slow-set whichever
//! is selected. The display sleeps on its own after 21 ticks of inactivity.
#![no_std]
#![no_main]

use clock_kit::{AlarmClock, AlarmClockStatic, Hardware};
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    let hardware = Hardware::default();

    static ALARM_CLOCK_STATIC: AlarmClockStatic = AlarmClock::new_static();
    let mut alarm_clock = match AlarmClock::new(&ALARM_CLOCK_STATIC, hardware, spawner) {
        Ok(alarm_clock) => alarm_clock,
        Err(err) => core::panic!("{err}"),
    };

    info!("alarm clock running");
    let err = alarm_clock.run().await.unwrap_err();
    core::panic!("{err}");
}
