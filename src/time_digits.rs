//! BCD time digits and minute arithmetic.

/// A time of day HH:MM held as four BCD digits,
/// `[minute units, minute tens, hour units, hour tens]`.
///
/// The digits never represent 24:00 or later; the minute advance wraps
/// straight to 00:00 the instant it would reach 24:00.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeDigits([u8; 4]);

impl TimeDigits {
    pub const MIDNIGHT: Self = Self([0, 0, 0, 0]);

    /// Factory default alarm time, 07:00.
    pub const DEFAULT_ALARM: Self = Self([0, 0, 7, 0]);

    /// Builds digits from binary hours and minutes.
    #[must_use]
    pub const fn new(hours: u8, minutes: u8) -> Self {
        assert!(hours < 24, "hours out of range");
        assert!(minutes < 60, "minutes out of range");
        Self([minutes % 10, minutes / 10, hours % 10, hours / 10])
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        self.0
    }

    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.0[3] * 10 + self.0[2]
    }

    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.0[1] * 10 + self.0[0]
    }

    /// Advances by one minute using BCD carry rules.
    ///
    /// Minute units carry at >9 into minute tens, minute tens at >5 into
    /// hour units, hour units at >9 into hour tens. A result of 24:00 is
    /// never observed: all four digits reset to zero instead.
    pub fn increment(&mut self) {
        self.0[0] += 1;
        if self.0[0] > 9 {
            self.0[0] = 0;
            self.0[1] += 1;
        }
        if self.0[1] > 5 {
            self.0[1] = 0;
            self.0[2] += 1;
        }
        if self.0[2] > 9 {
            self.0[2] = 0;
            self.0[3] += 1;
        }
        if self.0[3] == 2 && self.0[2] == 4 {
            self.0 = [0; 4];
        }
    }

    /// True when every digit is within its BCD range and the combined value
    /// is below 24:00.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0[0] <= 9 && self.0[1] <= 5 && self.0[2] <= 9 && self.0[3] <= 2 && self.hours() < 24
    }
}
