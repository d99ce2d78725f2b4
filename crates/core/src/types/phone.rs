//! Phone numbers stored as plain integers.
//!
//! Customer phone numbers are persisted as an `INTEGER` column, so any
//! formatting (and any leading zero) is lost in storage. [`PhoneNumber`]
//! restores the display form used on the customer screens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A phone number as stored in the `customer.phone` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(i64);

impl PhoneNumber {
    /// Wrap a stored phone value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw stored value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Hyphenated display form.
    ///
    /// Everything but the final digit is grouped in threes from the right,
    /// the groups are joined with `-`, and the final digit is appended to
    /// the last group. A ten digit number therefore renders as
    /// `XXX-XXX-XXXX` and a seven digit number as `XXX-XXXX`.
    #[must_use]
    pub fn formatted(&self) -> String {
        if self.0 < 0 {
            return self.0.to_string();
        }

        let digits = self.0.to_string();
        let Some((head, last)) = digits.split_at_checked(digits.len() - 1) else {
            return digits;
        };
        if head.is_empty() {
            return digits;
        }

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in head.chars().enumerate() {
            if i > 0 && (head.len() - i) % 3 == 0 {
                grouped.push('-');
            }
            grouped.push(c);
        }
        grouped.push_str(last);
        grouped
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl From<i64> for PhoneNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digit_number() {
        assert_eq!(PhoneNumber::new(7_015_551_234).formatted(), "701-555-1234");
        assert_eq!(PhoneNumber::new(2_187_770_123).formatted(), "218-777-0123");
    }

    #[test]
    fn test_seven_digit_number() {
        assert_eq!(PhoneNumber::new(5_551_234).formatted(), "555-1234");
    }

    #[test]
    fn test_leading_zero_is_dropped_by_storage() {
        // "0123456789" comes back from the database as 123456789.
        assert_eq!(PhoneNumber::new(123_456_789).formatted(), "12-345-6789");
    }

    #[test]
    fn test_eleven_digit_number() {
        assert_eq!(PhoneNumber::new(17_015_551_234).formatted(), "1-701-555-1234");
    }

    #[test]
    fn test_short_numbers() {
        assert_eq!(PhoneNumber::new(0).formatted(), "0");
        assert_eq!(PhoneNumber::new(7).formatted(), "7");
        assert_eq!(PhoneNumber::new(42).formatted(), "42");
        assert_eq!(PhoneNumber::new(1234).formatted(), "1234");
        assert_eq!(PhoneNumber::new(12345).formatted(), "1-2345");
    }

    #[test]
    fn test_negative_is_left_alone() {
        assert_eq!(PhoneNumber::new(-5).formatted(), "-5");
    }

    #[test]
    fn test_display_matches_formatted() {
        assert_eq!(PhoneNumber::new(7_015_551_234).to_string(), "701-555-1234");
    }
}
