//! The multiplexed display driver.
//!
//! One digit-select line and one segment are driven at a time; the 3-bit
//! segment-select bus picks the segment, the digit line picks the cell.
//! Because the strobed buttons share wiring with the digit-select lines,
//! every strobe doubles as a button sample for that slot.

use embassy_rp::gpio::{Input, Level};
use embassy_time::Timer;

use crate::Result;
use crate::button::ButtonSignal;
use crate::output_array::OutputArray;
use crate::segment::{SegmentFrame, Segments};
use crate::shared_constants::{
    CELL_COUNT, CELL_COUNT_U8, SEGMENT_COUNT_U8, SEGMENT_DWELL, SEGMENT_SELECT_COUNT,
};

/// The 4-digit 7-segment display plus the shared button-sense line.
pub struct SegmentDisplay {
    cells: OutputArray<'static, CELL_COUNT>,
    segment_select: OutputArray<'static, SEGMENT_SELECT_COUNT>,
    sense: Input<'static>,
}

impl SegmentDisplay {
    #[must_use]
    pub const fn new(
        cells: OutputArray<'static, CELL_COUNT>,
        segment_select: OutputArray<'static, SEGMENT_SELECT_COUNT>,
        sense: Input<'static>,
    ) -> Self {
        Self {
            cells,
            segment_select,
            sense,
        }
    }

    /// Renders one full 4-digit sweep and reports the raw button sample.
    ///
    /// While `lit` is false only the central dash is strobed per slot, the
    /// low-power placeholder used during the blink-off phase. The sample
    /// taken while slot `i` is active is attributed to button `i`; the last
    /// asserted slot wins. All select lines are released before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if a digit-select index is out of bounds.
    pub async fn sweep(&mut self, frame: &SegmentFrame, lit: bool) -> Result<ButtonSignal> {
        let mut raw = ButtonSignal::Idle;
        for slot in 0..CELL_COUNT_U8 {
            let segments = frame[slot as usize];
            if lit {
                for segment in 0..SEGMENT_COUNT_U8 {
                    if segments & (1 << segment) != 0 {
                        self.strobe(slot, segment, &mut raw).await?;
                    }
                }
            } else {
                self.strobe(slot, Segments::DASH_SEGMENT, &mut raw).await?;
            }
        }
        self.cells.set_all(Level::Low);
        Ok(raw)
    }

    /// Turns every select line off (sleep).
    pub fn blank(&mut self) {
        self.cells.set_all(Level::Low);
        self.segment_select.set_bits(0);
    }

    /// Lights a single segment of a single digit for one dwell period and
    /// samples the shared sense line while the digit's select line is high.
    async fn strobe(&mut self, slot: u8, segment: u8, raw: &mut ButtonSignal) -> Result<()> {
        self.segment_select.set_bits(segment);
        self.cells.set_level_at_index(slot, Level::High)?;
        Timer::after(SEGMENT_DWELL).await;
        let sample = ButtonSignal::from_strobe(slot, self.sense.is_high());
        if sample != ButtonSignal::Idle {
            *raw = sample;
        }
        self.cells.set_level_at_index(slot, Level::Low)?;
        Ok(())
    }
}
