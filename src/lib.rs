//! Firmware building blocks for a battery-powered, crystal-timed 4-digit
//! LED alarm clock whose pin-starved I/O bus is time-shared between the
//! digit-select lines, the segment-select lines, and button-sense duty.
//!
//! The pure logic (digit codec, BCD time, debounce, the shared
//! [`ClockContext`]) compiles and tests on the host with no features
//! enabled. The `pico1` feature adds the hardware bindings: the multiplexed
//! display driver, the buzzer, the pin map, and the [`AlarmClock`] device
//! that ties them to a 2 Hz tick task and the cooperative main loop.
#![cfg_attr(not(test), no_std)]

mod button;
mod context;
mod error;
mod never;
mod segment;
mod shared_constants;
mod time_digits;

#[cfg(feature = "pico1")]
mod alarm_clock;
#[cfg(feature = "pico1")]
mod buzzer;
#[cfg(feature = "pico1")]
mod display;
#[cfg(feature = "pico1")]
mod hardware;
#[cfg(feature = "pico1")]
mod output_array;

// Re-export commonly used items
pub use button::{ButtonSignal, Debouncer};
pub use context::{AlarmStatus, ClockContext, LoopAction};
pub use error::{Error, Result};
pub use never::Never;
pub use segment::{SegmentFrame, Segments};
pub use shared_constants::*;
pub use time_digits::TimeDigits;

#[cfg(feature = "pico1")]
pub use alarm_clock::{AlarmClock, AlarmClockStatic};
#[cfg(feature = "pico1")]
pub use buzzer::Buzzer;
#[cfg(feature = "pico1")]
pub use display::SegmentDisplay;
#[cfg(feature = "pico1")]
pub use hardware::Hardware;
#[cfg(feature = "pico1")]
pub use output_array::OutputArray;
