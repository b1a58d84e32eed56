//! The alarm clock device: a spawned 2 Hz tick task plus the cooperative
//! main loop that renders, debounces buttons, sounds the alarm, and sleeps.

use core::cell::RefCell;

use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Ticker;

use crate::Result;
use crate::button::ButtonSignal;
use crate::buzzer::Buzzer;
use crate::context::{ClockContext, LoopAction};
use crate::display::SegmentDisplay;
use crate::hardware::Hardware;
use crate::never::Never;
use crate::segment::SegmentFrame;
use crate::shared_constants::TICK_PERIOD;

/// State shared between the tick task and the main loop. Every access is a
/// short critical section; neither side ever blocks the other for more
/// than a few field updates.
type SharedContext = Mutex<CriticalSectionRawMutex, RefCell<ClockContext>>;
type TickSignal = Signal<CriticalSectionRawMutex, ()>;

/// Static for the [`AlarmClock`] device.
pub struct AlarmClockStatic {
    context: SharedContext,
    tick: TickSignal,
}

impl AlarmClockStatic {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            context: Mutex::new(RefCell::new(ClockContext::new())),
            tick: Signal::new(),
        }
    }
}

impl Default for AlarmClockStatic {
    fn default() -> Self {
        Self::new()
    }
}

/// A device abstraction for the whole alarm clock: display, strobed
/// buttons, wake/cancel button, and buzzer.
pub struct AlarmClock<'a> {
    statics: &'a AlarmClockStatic,
    display: SegmentDisplay,
    buzzer: Buzzer,
    wake_button: Input<'static>,
}

impl AlarmClock<'_> {
    /// Creates static resources for the device.
    #[must_use]
    pub const fn new_static() -> AlarmClockStatic {
        AlarmClockStatic::new()
    }

    /// Creates the device, which entails starting the tick task.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick task cannot be spawned.
    #[must_use = "Must be used to manage the spawned task"]
    pub fn new(
        statics: &'static AlarmClockStatic,
        hardware: Hardware,
        spawner: Spawner,
    ) -> Result<AlarmClock<'static>> {
        // The clock boots at 00:00 plus one increment, so the first thing
        // shown is 00:01.
        statics
            .context
            .lock(|context| context.borrow_mut().advance_minute());
        spawner.spawn(tick_loop(statics))?;
        info!("alarm clock device started");
        Ok(AlarmClock {
            statics,
            display: SegmentDisplay::new(hardware.cells, hardware.segment_select, hardware.sense),
            buzzer: Buzzer::new(hardware.tone),
            wake_button: hardware.wake_button,
        })
    }

    /// Runs the clock forever.
    ///
    /// Each pass: beep if the alarm is sounding and unacknowledged, take one
    /// loop pass over the shared context, then either render a sweep (which
    /// samples the strobed buttons) or blank the display and idle until the
    /// next tick or the wake-button edge.
    ///
    /// # Errors
    ///
    /// Returns an error only on a display index fault, which is a
    /// programming error.
    pub async fn run(&mut self) -> Result<Never> {
        loop {
            if self.lock(|context| context.should_beep()) {
                self.buzzer.beep().await;
            }
            match self.lock(ClockContext::loop_pass) {
                LoopAction::Show { digits, lit } => {
                    let frame = SegmentFrame::from_digits(&digits);
                    let mut raw = self.display.sweep(&frame, lit).await?;
                    // The wake/cancel button is sampled once per sweep,
                    // after all select lines are released; it overrides any
                    // strobed sample.
                    if self.wake_button.is_high() {
                        raw = ButtonSignal::WakeCancel;
                    }
                    self.lock(|context| context.set_raw_button(raw));
                }
                LoopAction::Sleep => {
                    self.display.blank();
                    self.statics.tick.reset();
                    // Idle until the wake edge or the next tick. Dropping
                    // the edge future on a tick wake leaves the wake
                    // interrupt disarmed, so only the sleep path re-arms it.
                    match select(
                        self.wake_button.wait_for_rising_edge(),
                        self.statics.tick.wait(),
                    )
                    .await
                    {
                        Either::First(()) => {
                            info!("wake/cancel button");
                            self.lock(ClockContext::wake);
                        }
                        Either::Second(()) => {}
                    }
                }
            }
        }
    }

    fn lock<T>(&self, operation: impl FnOnce(&mut ClockContext) -> T) -> T {
        self.statics
            .context
            .lock(|context| operation(&mut context.borrow_mut()))
    }
}

#[embassy_executor::task]
async fn tick_loop(statics: &'static AlarmClockStatic) -> ! {
    let mut ticker = Ticker::every(TICK_PERIOD);
    loop {
        ticker.next().await;
        statics.context.lock(|context| context.borrow_mut().on_tick());
        // The tick is itself a wake source for the idling main loop.
        statics.tick.signal(());
    }
}
