use embassy_time::Duration;

/// Number of digit cells in the display.
pub const CELL_COUNT: usize = 4;
pub const CELL_COUNT_U8: u8 = CELL_COUNT as u8;

/// Segments A..G, bits 0..6 of a segment mask.
pub const SEGMENT_COUNT_U8: u8 = 7;

/// Segment-select output lines; the segment number is binary-coded onto them.
pub const SEGMENT_SELECT_COUNT: usize = 3;

/// The base tick is 2 Hz.
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Ticks per clock minute at the 2 Hz tick rate.
pub const TICKS_PER_MINUTE: u8 = 120;

/// Ticks of inactivity before the display goes back to sleep.
pub const DISPLAY_AUTO_OFF_TICKS: u8 = 21;

/// Slow set advances the digits once per this many loop passes.
pub const SLOW_SET_DIVISOR: u8 = 50;

/// Dwell per segment strobe. Tune to trade flicker against average current.
pub const SEGMENT_DWELL: Duration = Duration::from_micros(1000);

/// Tone output toggles per beep burst, and the half-period between toggles.
pub const TONE_TOGGLE_COUNT: u16 = 100;
pub const TONE_HALF_PERIOD: Duration = Duration::from_micros(750);

// Strobe slot roles: the button sampled during a digit's strobe slot is
// attributed to that slot.
/// Advances the selected digit set one minute per loop pass.
pub const FAST_SET_SLOT: u8 = 0;
/// Advances the selected digit set once per [`SLOW_SET_DIVISOR`] passes.
pub const SLOW_SET_SLOT: u8 = 1;
/// Toggles between showing/setting the clock and the alarm.
pub const ALARM_SELECT_SLOT: u8 = 3;
