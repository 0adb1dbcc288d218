use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MAX_DAY, MAX_MONTH, MAX_YEAR, MONTH_NAMES,
};
use crate::{CalendarDate, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A civil year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Checked constructor.
    ///
    /// # Errors
    /// `ParseError::InvalidYear` outside `1..=MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Ok(Self(year)),
            _ => Err(ParseError::InvalidYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month number in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Checked constructor.
    ///
    /// # Errors
    /// `ParseError::InvalidMonth` outside `1..=12`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(ParseError::InvalidMonth(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Turkish month name ("Ocak" .. "Aralık")
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[(self.get() - 1) as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of month. `Day::new` checks it against a concrete year and month;
/// the year-independent conversions only check `1..=MAX_DAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day valid for the given year and month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            year,
            month,
            day: value,
        };
        if month == 0 || month > MAX_MONTH || value > days_in_month(year, month) {
            return Err(invalid);
        }
        NonZeroU8::new(value).map(Self).ok_or(invalid)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match NonZeroU8::new(value) {
            Some(day) if value <= MAX_DAY => Ok(Self(day)),
            _ => Err(ParseError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
            }),
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recurring (month, day) anniversary with no year.
///
/// February 29 is accepted; in common years it lands on March 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthDay", into = "RawMonthDay")]
pub struct MonthDay {
    month: Month,
    day:   Day,
}

#[derive(Serialize, Deserialize)]
struct RawMonthDay {
    month: u8,
    day:   u8,
}

impl MonthDay {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` if the pair
    /// never occurs on the calendar (`4/31`, `2/30`).
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        let month = Month::new(month)?;
        let max = if month.get() == FEBRUARY {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[month.get() as usize]
        };
        let invalid = ParseError::InvalidDay {
            year: 0,
            month: month.get(),
            day,
        };
        if day > max {
            return Err(invalid);
        }
        let day = NonZeroU8::new(day).map(Day).ok_or(invalid)?;
        Ok(Self { month, day })
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    pub const fn day(self) -> u8 {
        self.day.get()
    }

    /// The concrete date of this anniversary in `year`.
    /// Returns `None` if `year` is outside the supported range.
    pub fn in_year(self, year: u16) -> Option<CalendarDate> {
        let (month, day) = (self.month(), self.day());
        let max = days_in_month(year, month);
        if day <= max {
            return CalendarDate::new(year, month, day).ok();
        }
        // Only Feb 29 in a common year gets here.
        let (year, month) = next_month(year, month)?;
        CalendarDate::new(year, month, day - max).ok()
    }
}

impl TryFrom<RawMonthDay> for MonthDay {
    type Error = ParseError;

    fn try_from(raw: RawMonthDay) -> Result<Self, Self::Error> {
        Self::new(raw.month, raw.day)
    }
}

impl From<MonthDay> for RawMonthDay {
    fn from(md: MonthDay) -> Self {
        Self {
            month: md.month(),
            day:   md.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.month.name())
    }
}

// Calendar helpers

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

const fn next_month(year: u16, month: u8) -> Option<(u16, u8)> {
    if month == DECEMBER {
        if year >= MAX_YEAR {
            None
        } else {
            Some((year + 1, JANUARY))
        }
    } else {
        Some((year, month + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2026).expect("valid year");
        let json = serde_json::to_string(&year).expect("serialize year");
        assert_eq!(json, "2026");
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_bounds_and_names() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));

        assert_eq!(Month::new(1).expect("january").name(), "Ocak");
        assert_eq!(Month::new(2).expect("february").name(), "Şubat");
        assert_eq!(Month::new(12).expect("december").name(), "Aralık");
    }

    #[test]
    fn test_day_against_month() {
        assert!(Day::new(31, 2025, 1).is_ok());
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(29, 2025, 2).is_err());
        assert!(Day::new(31, 2025, 4).is_err());
        assert!(matches!(
            Day::new(0, 2025, 1),
            Err(ParseError::InvalidDay {
                year: 2025,
                month: 1,
                day: 0
            })
        ));
    }

    #[test]
    fn test_day_year_independent() {
        let day = Day::try_from(31u8).expect("31 is a valid day of some month");
        assert_eq!(day.get(), 31);
        assert!(Day::try_from(0u8).is_err());
        assert!(Day::try_from(32u8).is_err());
    }

    #[test]
    fn test_month_day_validation() {
        struct TestCase {
            month: u8,
            day:   u8,
            valid: bool,
        }

        let cases = [
            TestCase { month: 1, day: 1, valid: true },
            TestCase { month: 2, day: 29, valid: true },
            TestCase { month: 2, day: 30, valid: false },
            TestCase { month: 4, day: 31, valid: false },
            TestCase { month: 12, day: 31, valid: true },
            TestCase { month: 13, day: 1, valid: false },
            TestCase { month: 6, day: 0, valid: false },
        ];

        for case in &cases {
            assert_eq!(
                MonthDay::new(case.month, case.day).is_ok(),
                case.valid,
                "{}/{}",
                case.month,
                case.day
            );
        }
    }

    #[test]
    fn test_month_day_in_year() {
        let new_year = MonthDay::new(1, 1).expect("valid month/day");
        assert_eq!(new_year.in_year(2026).map(|d| d.to_string()), Some("2026-01-01".to_owned()));
        assert_eq!(new_year.in_year(0), None);
        assert_eq!(new_year.in_year(10000), None);
    }

    #[test]
    fn test_month_day_leap_rollover() {
        let leap_day = MonthDay::new(2, 29).expect("valid month/day");
        assert_eq!(leap_day.in_year(2024).map(|d| d.to_string()), Some("2024-02-29".to_owned()));
        assert_eq!(leap_day.in_year(2025).map(|d| d.to_string()), Some("2025-03-01".to_owned()));
    }

    #[test]
    fn test_month_day_serde() {
        let md: MonthDay = serde_json::from_str(r#"{"month":10,"day":29}"#).expect("parse month/day");
        assert_eq!((md.month(), md.day()), (10, 29));
        assert_eq!(md.to_string(), "29 Ekim");
        assert!(serde_json::from_str::<MonthDay>(r#"{"month":2,"day":30}"#).is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        for (year, leap) in [(2020, true), (2023, false), (1900, false), (2000, true), (2100, false)] {
            assert_eq!(is_leap_year(year), leap, "year {year}");
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(days_in_month(2025, month), expected[month as usize]);
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }
}
