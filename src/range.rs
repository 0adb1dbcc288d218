use std::{iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ParseError, RANGE_SEPARATOR, days_between, prelude::*};

/// An inclusive span of civil dates.
///
/// A range whose start is after its end is simply empty. Iterating never
/// consumes the range, so it can be walked as many times as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

/// All dates from `start` to `end` inclusive, as `YYYY-MM-DD` strings.
/// Empty when `start > end`.
pub const fn enumerate_range(start: CalendarDate, end: CalendarDate) -> DateRange {
    DateRange::new(start, end)
}

impl DateRange {
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// Like [`DateRange::new`] but refuses a reversed range.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn checked(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Jan 1 of `today.year - years_before` through Dec 31 of
    /// `today.year + years_after`; the window static day pages are built for.
    /// Returns `None` if either end leaves the supported years.
    pub fn around(today: CalendarDate, years_before: u16, years_after: u16) -> Option<Self> {
        let first = today.year().checked_sub(years_before)?;
        let last = today.year().checked_add(years_after)?;
        let start = CalendarDate::new(first, 1, 1).ok()?;
        let end = CalendarDate::new(last, 12, 31).ok()?;
        Some(Self { start, end })
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of dates the range yields.
    pub fn len_days(&self) -> u64 {
        u64::try_from(days_between(self.start, self.end) + 1).unwrap_or(0)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Walks the range from the start, yielding serialized dates.
    pub const fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: Some(self.start),
            end:  self.end,
        }
    }
}

/// Iterator over a [`DateRange`], yielding `YYYY-MM-DD` strings.
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<CalendarDate>,
    end:  CalendarDate,
}

impl Iterator for DateRangeIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.add_days(1);
        Some(current.to_string())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |d| days_between(d, self.end) + 1)
            .max(0);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl FusedIterator for DateRangeIter {}

impl IntoIterator for DateRange {
    type Item = String;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = String;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found: {s}"))
                })?;
                let start = start_str.parse::<CalendarDate>()?;
                let end = end_str.parse::<CalendarDate>()?;
                Self::checked(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
