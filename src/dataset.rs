//! Loading the static tables.
//!
//! The tables are plain JSON. Copies ship inside the binary; a deployment can
//! point [`Dataset::load_dir`] at its own directory instead. Once loaded,
//! nothing mutates them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{
    CalendarDate, CountdownCatalog, CountdownDefinition, CountdownKind, CountdownResult, DayInfo,
    HolidayTable, LunarTargetTable, compute_countdown, prelude::*,
};

pub const HOLIDAYS_FILE: &str = "holidays.json";
pub const LUNAR_FILE: &str = "lunar.json";
pub const COUNTDOWNS_FILE: &str = "countdowns.json";

const EMBEDDED_HOLIDAYS: &str = include_str!("../data/holidays.json");
const EMBEDDED_LUNAR: &str = include_str!("../data/lunar.json");
const EMBEDDED_COUNTDOWNS: &str = include_str!("../data/countdowns.json");

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {table} data")]
    Parse {
        table:  &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The holiday, lunar and countdown tables, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    holidays:   HolidayTable,
    lunar:      LunarTargetTable,
    countdowns: CountdownCatalog,
}

impl Dataset {
    /// Tables compiled into the crate.
    ///
    /// # Errors
    /// Returns `LoadError::Parse` if the bundled JSON is malformed.
    pub fn embedded() -> Result<Self, LoadError> {
        Self::from_json(EMBEDDED_HOLIDAYS, EMBEDDED_LUNAR, EMBEDDED_COUNTDOWNS)
    }

    /// # Errors
    /// Returns `LoadError::Parse` naming the first table that fails to parse.
    pub fn from_json(holidays: &str, lunar: &str, countdowns: &str) -> Result<Self, LoadError> {
        let holidays: HolidayTable = parse(HOLIDAYS_FILE, holidays)?;
        let lunar: LunarTargetTable = parse(LUNAR_FILE, lunar)?;
        let countdowns: CountdownCatalog = parse(COUNTDOWNS_FILE, countdowns)?;
        Ok(Self::new(holidays, lunar, countdowns))
    }

    /// Reads `holidays.json`, `lunar.json` and `countdowns.json` from `dir`.
    ///
    /// # Errors
    /// Returns `LoadError::Io` for unreadable files and `LoadError::Parse` for
    /// malformed ones.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
        };
        Self::from_json(
            &read(HOLIDAYS_FILE)?,
            &read(LUNAR_FILE)?,
            &read(COUNTDOWNS_FILE)?,
        )
    }

    pub fn new(holidays: HolidayTable, lunar: LunarTargetTable, countdowns: CountdownCatalog) -> Self {
        holidays.report_duplicates();
        countdowns.report_inconsistencies();
        for definition in countdowns.iter() {
            if let CountdownKind::Lunar { event } = &definition.kind {
                if !lunar.contains_key(event) {
                    warn!(slug = %definition.slug, %event, "countdown refers to unknown lunar event");
                }
            }
        }

        info!(
            holidays = holidays.holidays().len(),
            observances = holidays.observances().len(),
            lunar_dates = lunar.len(),
            countdowns = countdowns.len(),
            "loaded calendar dataset"
        );

        Self {
            holidays,
            lunar,
            countdowns,
        }
    }

    pub const fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    pub const fn lunar(&self) -> &LunarTargetTable {
        &self.lunar
    }

    pub const fn countdowns(&self) -> &CountdownCatalog {
        &self.countdowns
    }

    /// Looks up `slug` and resolves it against `today`.
    ///
    /// The outer `None` means the slug is unknown (a not-found page); an inner
    /// `None` means the countdown exists but has nothing to count towards.
    pub fn countdown(
        &self,
        slug: &str,
        today: CalendarDate,
    ) -> Option<(&CountdownDefinition, Option<CountdownResult>)> {
        let definition = self.countdowns.by_slug(slug)?;
        Some((definition, compute_countdown(definition, today, &self.lunar)))
    }

    pub fn day_info(&self, date: CalendarDate) -> DayInfo<'_> {
        DayInfo::new(date, &self.holidays)
    }
}

fn parse<T: DeserializeOwned>(table: &'static str, json: &str) -> Result<T, LoadError> {
    serde_json::from_str(json).map_err(|source| LoadError::Parse { table, source })
}
