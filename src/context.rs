//! The shared firmware state and the per-tick / per-pass logic.
//!
//! All mutable state lives in one explicit [`ClockContext`] so the contract
//! between the tick source and the cooperative main loop is visible and
//! testable without hardware: the tick task calls [`ClockContext::on_tick`],
//! the main loop calls [`ClockContext::loop_pass`] once per display sweep.

use crate::button::{ButtonSignal, Debouncer};
use crate::shared_constants::{
    ALARM_SELECT_SLOT, DISPLAY_AUTO_OFF_TICKS, FAST_SET_SLOT, SLOW_SET_DIVISOR, SLOW_SET_SLOT,
    TICKS_PER_MINUTE,
};
use crate::time_digits::TimeDigits;

/// Alarm match state.
///
/// `sounding` is recomputed on every tick as exact equality of the clock and
/// alarm digits. `silenced` only suppresses the current match: the instant
/// the match breaks, both bits clear, so a later match sounds again.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmStatus {
    pub sounding: bool,
    pub silenced: bool,
}

/// What the main loop should do after one pass.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Render `digits` for one sweep. `lit` is false during the blink-off
    /// phase of alarm-set mode; the sweep then strobes only the dash.
    Show { digits: TimeDigits, lit: bool },
    /// The countdown expired: blank the display and idle until the next
    /// tick or the wake-button edge.
    Sleep,
}

/// Process-wide state: clock and alarm digits, alarm match bits, display
/// power, and the raw/debounced button signal.
#[derive(Debug)]
pub struct ClockContext {
    time: TimeDigits,
    alarm: TimeDigits,
    status: AlarmStatus,
    blink_on: bool,
    auto_off: u8,
    setting_alarm: bool,
    tick_in_minute: u8,
    set_divider: u8,
    raw_button: ButtonSignal,
    debouncer: Debouncer,
}

impl ClockContext {
    /// Power-on state: clock at midnight, alarm at the 07:00 default,
    /// display off. The device layer applies the boot increment so the
    /// first thing shown is 00:01.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time: TimeDigits::MIDNIGHT,
            alarm: TimeDigits::DEFAULT_ALARM,
            status: AlarmStatus {
                sounding: false,
                silenced: false,
            },
            blink_on: false,
            auto_off: 0,
            setting_alarm: false,
            tick_in_minute: 0,
            set_divider: 0,
            raw_button: ButtonSignal::Idle,
            debouncer: Debouncer::new(),
        }
    }

    #[must_use]
    pub const fn time(&self) -> TimeDigits {
        self.time
    }

    #[must_use]
    pub const fn alarm(&self) -> TimeDigits {
        self.alarm
    }

    #[must_use]
    pub const fn status(&self) -> AlarmStatus {
        self.status
    }

    #[must_use]
    pub const fn blink_on(&self) -> bool {
        self.blink_on
    }

    #[must_use]
    pub const fn is_setting_alarm(&self) -> bool {
        self.setting_alarm
    }

    /// Overwrites the clock digits. Intended for bring-up and tests; normal
    /// operation sets the time through the strobed buttons.
    pub fn set_time(&mut self, time: TimeDigits) {
        debug_assert!(time.is_valid());
        self.time = time;
    }

    /// Overwrites the alarm digits. Intended for bring-up and tests.
    pub fn set_alarm_time(&mut self, alarm: TimeDigits) {
        debug_assert!(alarm.is_valid());
        self.alarm = alarm;
    }

    /// Stores the raw sample from the last display sweep (or the wake
    /// sentinel). Consumed by the next [`Self::loop_pass`].
    pub fn set_raw_button(&mut self, raw: ButtonSignal) {
        self.raw_button = raw;
    }

    /// True while the alarm matches and has not been acknowledged.
    #[must_use]
    pub const fn should_beep(&self) -> bool {
        self.status.sounding && !self.status.silenced
    }

    /// One firing of the 2 Hz tick.
    ///
    /// Order matters and callers must not reorder it: the blink phase flips
    /// first, the clock advances, the alarm is evaluated against the minute
    /// that just advanced, and only then does the auto-off countdown drop.
    pub fn on_tick(&mut self) {
        if self.setting_alarm {
            self.blink_on = !self.blink_on;
        } else {
            self.blink_on = true;
        }
        self.tick_in_minute += 1;
        if self.tick_in_minute == TICKS_PER_MINUTE {
            self.tick_in_minute = 0;
            self.advance_minute();
        }
        self.evaluate_alarm();
        if self.auto_off > 0 {
            self.auto_off -= 1;
        }
    }

    /// Advances the clock one minute. Also resets the slow-set sub-counter,
    /// which is shared with the manual set path.
    pub fn advance_minute(&mut self) {
        self.set_divider = 0;
        self.time.increment();
    }

    /// Recomputes the alarm match. A mismatch clears both `sounding` and
    /// `silenced` regardless of prior state: silencing has no memory of a
    /// just-passed match.
    pub fn evaluate_alarm(&mut self) -> AlarmStatus {
        if self.time == self.alarm {
            self.status.sounding = true;
        } else {
            self.status = AlarmStatus::default();
        }
        self.status
    }

    /// The wake-button edge fired while sleeping.
    pub fn wake(&mut self) {
        self.raw_button = ButtonSignal::WakeCancel;
    }

    /// One pass of the cooperative main loop.
    ///
    /// Consumes the raw button sample. Any activity, sentinel included,
    /// restarts the auto-off countdown and acknowledges a sounding alarm.
    /// An unstable reading is discarded and re-sampled on the next pass; a
    /// stable code is applied only while the display is awake.
    pub fn loop_pass(&mut self) -> LoopAction {
        let raw = core::mem::take(&mut self.raw_button);
        if raw != ButtonSignal::Idle {
            self.auto_off = DISPLAY_AUTO_OFF_TICKS;
            if self.status.sounding {
                self.status.silenced = true;
            }
        }
        let Some(code) = self.debouncer.filter(raw) else {
            // Unstable: act on nothing this pass, render so the next sweep
            // re-samples.
            return LoopAction::Show {
                digits: self.shown_digits(),
                lit: self.blink_on,
            };
        };
        if self.auto_off == 0 {
            self.setting_alarm = false;
            return LoopAction::Sleep;
        }
        self.apply(code);
        LoopAction::Show {
            digits: self.shown_digits(),
            lit: self.blink_on,
        }
    }

    /// Manual set: advances the selected digit set (alarm while alarm-set
    /// mode is active, otherwise the clock) one minute per call in fast
    /// mode, once per [`SLOW_SET_DIVISOR`] calls in slow mode.
    pub fn nudge(&mut self, fast: bool) {
        if !fast {
            self.set_divider += 1;
            if self.set_divider < SLOW_SET_DIVISOR {
                return;
            }
        }
        self.set_divider = 0;
        if self.setting_alarm {
            self.alarm.increment();
        } else {
            self.time.increment();
        }
    }

    fn apply(&mut self, code: ButtonSignal) {
        match code {
            ButtonSignal::Strobe(ALARM_SELECT_SLOT) => self.setting_alarm = !self.setting_alarm,
            ButtonSignal::Strobe(FAST_SET_SLOT) => self.nudge(true),
            ButtonSignal::Strobe(SLOW_SET_SLOT) => self.nudge(false),
            _ => {}
        }
    }

    const fn shown_digits(&self) -> TimeDigits {
        if self.setting_alarm { self.alarm } else { self.time }
    }
}

impl Default for ClockContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    const SELECT: ButtonSignal = ButtonSignal::Strobe(ALARM_SELECT_SLOT);
    const FAST: ButtonSignal = ButtonSignal::Strobe(FAST_SET_SLOT);
    const SLOW: ButtonSignal = ButtonSignal::Strobe(SLOW_SET_SLOT);

    /// Two passes with the same code so the stability filter accepts it on
    /// the second, then consume the trailing passes the caller asked for.
    fn press(context: &mut ClockContext, code: ButtonSignal) {
        context.set_raw_button(code);
        let _ = context.loop_pass();
        context.set_raw_button(code);
        let _ = context.loop_pass();
    }

    /// Release the button and let the filter settle back to Idle.
    fn release(context: &mut ClockContext) {
        let _ = context.loop_pass();
        let _ = context.loop_pass();
    }

    fn awake_context() -> ClockContext {
        let mut context = ClockContext::new();
        context.wake();
        let _ = context.loop_pass();
        context
    }

    #[test]
    fn power_on_defaults() {
        let context = ClockContext::new();
        assert_eq!(context.time(), TimeDigits::MIDNIGHT);
        assert_eq!(context.alarm(), TimeDigits::new(7, 0));
        assert!(!context.should_beep());
        assert!(!context.is_setting_alarm());
    }

    #[test]
    fn display_starts_asleep() {
        let mut context = ClockContext::new();
        assert_eq!(context.loop_pass(), LoopAction::Sleep);
    }

    #[test]
    fn minute_advances_every_120_ticks() {
        let mut context = ClockContext::new();
        context.set_time(TimeDigits::new(6, 58));
        for _ in 0..TICKS_PER_MINUTE - 1 {
            context.on_tick();
        }
        assert_eq!(context.time(), TimeDigits::new(6, 58));
        context.on_tick();
        assert_eq!(context.time(), TimeDigits::new(6, 59));
    }

    #[test]
    fn alarm_fires_on_the_tick_that_advances_into_the_match() {
        let mut context = ClockContext::new();
        context.set_time(TimeDigits::new(6, 59));
        for _ in 0..TICKS_PER_MINUTE - 1 {
            context.on_tick();
            assert!(!context.status().sounding);
        }
        context.on_tick();
        assert_eq!(context.time(), TimeDigits::new(7, 0));
        assert!(context.status().sounding);
        assert!(context.should_beep());
    }

    #[test]
    fn alarm_match_is_not_sticky() {
        let mut context = ClockContext::new();
        context.set_time(TimeDigits::new(7, 0));
        context.evaluate_alarm();
        assert!(context.status().sounding);
        context.status.silenced = true;

        context.set_time(TimeDigits::new(7, 1));
        let status = context.evaluate_alarm();
        assert_eq!(
            status,
            AlarmStatus {
                sounding: false,
                silenced: false
            }
        );
    }

    #[test]
    fn silence_does_not_persist_across_matches() {
        let mut context = ClockContext::new();
        context.set_time(TimeDigits::new(7, 0));
        context.evaluate_alarm();
        context.status.silenced = true;
        assert!(!context.should_beep());

        // The match breaks, then recurs a day later.
        context.set_time(TimeDigits::new(7, 1));
        context.evaluate_alarm();
        context.set_time(TimeDigits::new(7, 0));
        context.evaluate_alarm();
        assert!(context.should_beep());
    }

    #[test]
    fn any_button_silences_a_sounding_alarm() {
        let mut context = ClockContext::new();
        context.set_time(TimeDigits::new(7, 0));
        context.evaluate_alarm();
        assert!(context.should_beep());

        context.wake();
        let action = context.loop_pass();
        assert!(matches!(action, LoopAction::Show { .. }));
        assert!(context.status().silenced);
        assert!(!context.should_beep());
    }

    #[test]
    fn display_sleeps_exactly_21_ticks_after_activity() {
        let mut context = awake_context();
        for tick in 0..DISPLAY_AUTO_OFF_TICKS - 1 {
            context.on_tick();
            assert!(
                matches!(context.loop_pass(), LoopAction::Show { .. }),
                "slept early, after {} ticks",
                tick + 1
            );
        }
        context.on_tick();
        assert_eq!(context.loop_pass(), LoopAction::Sleep);
    }

    #[test]
    fn activity_restarts_the_countdown() {
        let mut context = awake_context();
        for _ in 0..DISPLAY_AUTO_OFF_TICKS - 1 {
            context.on_tick();
        }
        context.wake();
        let _ = context.loop_pass();
        for _ in 0..DISPLAY_AUTO_OFF_TICKS - 1 {
            context.on_tick();
            assert!(matches!(context.loop_pass(), LoopAction::Show { .. }));
        }
        context.on_tick();
        assert_eq!(context.loop_pass(), LoopAction::Sleep);
    }

    #[test]
    fn sleep_clears_alarm_set_mode() {
        let mut context = awake_context();
        press(&mut context, SELECT);
        assert!(context.is_setting_alarm());
        for _ in 0..DISPLAY_AUTO_OFF_TICKS {
            context.on_tick();
        }
        release(&mut context);
        assert_eq!(context.loop_pass(), LoopAction::Sleep);
        assert!(!context.is_setting_alarm());
    }

    #[test]
    fn blink_toggles_every_tick_only_in_alarm_set_mode() {
        let mut context = awake_context();
        context.on_tick();
        assert!(context.blink_on());
        context.on_tick();
        assert!(context.blink_on());

        press(&mut context, SELECT);
        release(&mut context);
        assert!(context.is_setting_alarm());
        let mut phases = [false; 4];
        for phase in &mut phases {
            context.on_tick();
            *phase = context.blink_on();
        }
        assert!(phases[0] != phases[1] && phases[1] != phases[2] && phases[2] != phases[3]);

        press(&mut context, SELECT);
        release(&mut context);
        assert!(!context.is_setting_alarm());
        context.on_tick();
        assert!(context.blink_on());
        context.on_tick();
        assert!(context.blink_on());
    }

    #[test]
    fn select_slot_switches_between_clock_and_alarm_digits() {
        let mut context = awake_context();
        let LoopAction::Show { digits, .. } = context.loop_pass() else {
            panic!("display should be awake");
        };
        assert_eq!(digits, context.time());

        press(&mut context, SELECT);
        let LoopAction::Show { digits, .. } = context.loop_pass() else {
            panic!("display should be awake");
        };
        assert_eq!(digits, context.alarm());
    }

    #[test]
    fn fast_set_adjusts_the_clock_outside_alarm_set_mode() {
        let mut context = awake_context();
        let before = context.time();
        press(&mut context, FAST);
        let mut expected = before;
        expected.increment();
        assert_eq!(context.time(), expected);
        assert_eq!(context.alarm(), TimeDigits::DEFAULT_ALARM);
    }

    #[test]
    fn slow_set_advances_once_per_divisor_calls() {
        let mut context = awake_context();
        press(&mut context, SELECT);
        release(&mut context);
        assert!(context.is_setting_alarm());

        // The first SLOW pass is discarded by the stability filter; the
        // stable passes feed the shared sub-counter.
        context.set_raw_button(SLOW);
        let _ = context.loop_pass();
        for pass in 1..SLOW_SET_DIVISOR {
            context.set_raw_button(SLOW);
            let _ = context.loop_pass();
            assert_eq!(
                context.alarm(),
                TimeDigits::DEFAULT_ALARM,
                "advanced early, after {pass} stable passes"
            );
        }
        context.set_raw_button(SLOW);
        let _ = context.loop_pass();
        assert_eq!(context.alarm(), TimeDigits::new(7, 1));
    }

    #[test]
    fn sentinel_never_triggers_set_actions() {
        let mut context = awake_context();
        let time = context.time();
        let alarm = context.alarm();
        for _ in 0..10 {
            context.set_raw_button(ButtonSignal::WakeCancel);
            let _ = context.loop_pass();
        }
        assert_eq!(context.time(), time);
        assert_eq!(context.alarm(), alarm);
        assert!(!context.is_setting_alarm());
    }

    #[test]
    fn countdown_drops_after_the_alarm_is_evaluated() {
        // Both effects land on the same tick: the minute advance that breaks
        // the match and the final countdown decrement.
        let mut context = ClockContext::new();
        context.set_time(TimeDigits::new(7, 0));
        context.evaluate_alarm();
        context.wake();
        let _ = context.loop_pass();
        for _ in 0..DISPLAY_AUTO_OFF_TICKS {
            context.on_tick();
        }
        release(&mut context);
        assert_eq!(context.loop_pass(), LoopAction::Sleep);
        assert!(context.status().sounding);
    }
}
