//! Precomputed Gregorian dates of lunar-calendar events, keyed by event and
//! civil year.
//!
//! Nothing is computed astronomically. The table covers the years a maintainer
//! has entered; asking for any other year is a miss.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, prelude::*};

/// Stable identifier of a recurring lunar event, e.g. `ramazan` or `kurban`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Deref, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventKey(String);

impl EventKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl Borrow<str> for EventKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Event key → civil year → date of that year's occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LunarTargetTable {
    events: BTreeMap<EventKey, BTreeMap<u16, CalendarDate>>,
}

impl LunarTargetTable {
    /// Date of `event` recorded under `year`, if the table has one.
    pub fn resolve(&self, event: &str, year: u16) -> Option<CalendarDate> {
        self.events.get(event)?.get(&year).copied()
    }

    /// First and last year with an entry for `event`.
    pub fn coverage(&self, event: &str) -> Option<(u16, u16)> {
        let years = self.events.get(event)?;
        let first = years.keys().next()?;
        let last = years.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn keys(&self) -> impl Iterator<Item = &EventKey> {
        self.events.keys()
    }

    pub fn contains_key(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of (event, year) entries.
    pub fn len(&self) -> usize {
        self.events.values().map(BTreeMap::len).sum()
    }
}

impl FromIterator<(EventKey, u16, CalendarDate)> for LunarTargetTable {
    /// Later entries for the same (event, year) replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (EventKey, u16, CalendarDate)>>(iter: I) -> Self {
        let mut events: BTreeMap<EventKey, BTreeMap<u16, CalendarDate>> = BTreeMap::new();
        for (event, year, date) in iter {
            events.entry(event).or_default().insert(year, date);
        }
        Self { events }
    }
}
