use embassy_rp::gpio::{self, Level, Pull};

use crate::output_array::OutputArray;
use crate::shared_constants::{CELL_COUNT, SEGMENT_SELECT_COUNT};

/// Pin roles for the alarm clock.
///
/// Digit-select outputs are active high. Both button inputs are pulled down
/// and read high when pressed: the strobed buttons connect the shared sense
/// line to whichever digit-select line is currently driven, while the
/// wake/cancel button connects it straight to the supply rail on its own
/// edge-capable input.
pub struct Hardware {
    pub cells: OutputArray<'static, CELL_COUNT>,
    pub segment_select: OutputArray<'static, SEGMENT_SELECT_COUNT>,
    pub sense: gpio::Input<'static>,
    pub wake_button: gpio::Input<'static>,
    pub tone: gpio::Output<'static>,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let cells = OutputArray::new([
            gpio::Output::new(peripherals.PIN_1, Level::Low),
            gpio::Output::new(peripherals.PIN_2, Level::Low),
            gpio::Output::new(peripherals.PIN_3, Level::Low),
            gpio::Output::new(peripherals.PIN_4, Level::Low),
        ]);

        let segment_select = OutputArray::new([
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_7, Level::Low),
        ]);

        let sense = gpio::Input::new(peripherals.PIN_13, Pull::Down);
        let wake_button = gpio::Input::new(peripherals.PIN_14, Pull::Down);
        let tone = gpio::Output::new(peripherals.PIN_15, Level::Low);

        Self {
            cells,
            segment_select,
            sense,
            wake_button,
            tone,
        }
    }
}
