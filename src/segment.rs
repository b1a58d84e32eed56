//! Digit-to-segment encoding for 4-digit 7-segment LED displays.

use core::ops::Index;

use crate::shared_constants::CELL_COUNT;
use crate::time_digits::TimeDigits;

/// Constants for 7-segment LED displays, segments A..G on bits 0..6.
pub struct Segments;

impl Segments {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;

    /// Segment masks for the decimal digits 0-9.
    pub const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];

    /// The central dash, shown as the low-power placeholder while the
    /// display is strobing but not lit.
    pub const DASH: u8 = Self::SEG_G;

    /// 3-bit segment-select code for the central dash (segment G).
    pub const DASH_SEGMENT: u8 = 6;

    /// Looks up the segment mask for one BCD digit.
    ///
    /// # Panics
    ///
    /// Panics on a digit above 9. The BCD invariants make that unreachable,
    /// so a hit here is a programming error with no recovery short of a
    /// restart.
    #[must_use]
    pub const fn for_digit(digit: u8) -> u8 {
        assert!(digit <= 9, "BCD digit out of range");
        Self::DIGITS[digit as usize]
    }
}

/// Segment masks for one full 4-digit render, indexed by digit slot.
///
/// Purely a projection of whichever digit set is currently shown; recomputed
/// every sweep and never persisted.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentFrame([u8; CELL_COUNT]);

impl SegmentFrame {
    #[must_use]
    pub fn from_digits(digits: &TimeDigits) -> Self {
        Self(digits.to_array().map(Segments::for_digit))
    }

    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.0.iter()
    }
}

impl Index<usize> for SegmentFrame {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a SegmentFrame {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
