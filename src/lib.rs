//! Calendar and countdown core for a Turkish "what day is it / how many days
//! left" site.
//!
//! Everything here is pure: callers read the host clock once with
//! [`CalendarDate::today`] and thread that value through every call.

mod consts;
mod countdown;
mod dataset;
mod day;
mod holiday;
mod lunar;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use countdown::{
    CountdownCatalog, CountdownDefinition, CountdownKind, CountdownResult, TemporalStatus,
    compute_countdown, describe_countdown,
};
pub use dataset::{COUNTDOWNS_FILE, Dataset, HOLIDAYS_FILE, LUNAR_FILE, LoadError};
pub use day::DayInfo;
pub use holiday::{HolidayEntry, HolidayTable, LunarObservance};
pub use lunar::{EventKey, LunarTargetTable};
pub use range::{DateRange, DateRangeIter, RangeError, enumerate_range};
pub use types::{Day, Month, MonthDay, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, Days, Local, NaiveDate};
use std::str::FromStr;

/// A civil (Gregorian) date with no time of day.
///
/// The year always lies in `1..=MAX_YEAR`; every constructor checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "_0.year()", "_0.month()", "_0.day()")]
pub struct CalendarDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Builds a date from its components.
    ///
    /// # Errors
    /// Returns the `ParseError` variant for the first component that is out of
    /// range, or `InvalidDay` when the day does not exist in that month.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year.get(), month.get())?;
        NaiveDate::from_ymd_opt(
            i32::from(year.get()),
            u32::from(month.get()),
            u32::from(day.get()),
        )
        .map(Self)
        .ok_or(ParseError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: day.get(),
        })
    }

    /// Current local civil date from the host clock.
    ///
    /// Read this once per request and pass it down; nothing else in the crate
    /// touches the clock.
    pub fn today() -> Self {
        Self::clamped(Local::now().date_naive())
    }

    fn clamped(date: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
        let last = NaiveDate::from_ymd_opt(i32::from(MAX_YEAR), 12, 31).unwrap_or(NaiveDate::MAX);
        Self(date.clamp(first, last))
    }

    // The year is kept within 1..=MAX_YEAR and month/day are small, so the
    // narrowing casts below are exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(self) -> u16 {
        self.0.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    /// Long Turkish form, e.g. "29 Ekim 2026".
    pub fn format_long(self) -> String {
        format!("{} {} {}", self.day(), MONTH_NAMES[usize::from(self.month() - 1)], self.year())
    }

    /// Turkish weekday name ("Pazar" .. "Cumartesi").
    pub fn weekday_name(self) -> &'static str {
        WEEKDAY_NAMES[self.0.weekday().num_days_from_sunday() as usize]
    }

    /// Shifts the date by `n` days (negative goes back).
    /// Returns `None` if the result falls outside the supported years.
    pub fn add_days(self, n: i64) -> Option<Self> {
        let step = Days::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            self.0.checked_add_days(step)
        } else {
            self.0.checked_sub_days(step)
        }?;
        Self::try_from(shifted).ok()
    }

    /// Signed day count from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        days_between(self, other)
    }
}

/// Whole days from `from` to `to`; positive when `to` is later.
pub fn days_between(from: CalendarDate, to: CalendarDate) -> i64 {
    to.0.signed_duration_since(from.0).num_days()
}

/// Year of the next occurrence of `month_day`, counting `today` itself as
/// not yet past.
pub fn resolve_recurrence_year(today: CalendarDate, month_day: MonthDay) -> u16 {
    let year = today.year();
    match month_day.in_year(year) {
        Some(candidate) if candidate < today => year + 1,
        _ => year,
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let bytes = trimmed.as_bytes();
        let well_formed = bytes.len() == SERIALIZED_DATE_LEN
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => char::from(*b) == DATE_SEPARATOR,
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year = parse_component::<u16>(&trimmed[0..4])?;
        let month = parse_component::<u8>(&trimmed[5..7])?;
        let day = parse_component::<u8>(&trimmed[8..10])?;
        Self::new(year, month, day)
    }
}

fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
    s.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        match u16::try_from(date.year()) {
            Ok(year) if (1..=MAX_YEAR).contains(&year) => Ok(Self(date)),
            Ok(year) => Err(ParseError::InvalidYear(year)),
            Err(_) => Err(ParseError::InvalidYear(0)),
        }
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
