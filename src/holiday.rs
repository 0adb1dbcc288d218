//! Official holidays, observances and lunar-calendar religious days.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateRange, MonthDay, prelude::*};

/// A day that recurs on the same (month, day) every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    #[serde(flatten)]
    pub date: MonthDay,
    pub name: String,
    /// Legally a non-working day.
    #[serde(alias = "isHoliday")]
    pub is_official_holiday: bool,
    #[serde(default)]
    pub is_kandil: bool,
}

/// A religious day tied to the lunar calendar, valid only for its exact date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarObservance {
    pub name: String,
    pub date: CalendarDate,
    #[serde(default)]
    pub is_kandil: bool,
}

/// Read-only holiday and observance tables.
///
/// Lookups return the first match in table order. Duplicate rows are a data
/// mistake; they are logged when the table is built and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayTable {
    holidays:    Vec<HolidayEntry>,
    #[serde(default)]
    observances: Vec<LunarObservance>,
}

impl HolidayTable {
    pub fn new(holidays: Vec<HolidayEntry>, observances: Vec<LunarObservance>) -> Self {
        let table = Self {
            holidays,
            observances,
        };
        table.report_duplicates();
        table
    }

    pub(crate) fn report_duplicates(&self) {
        let mut seen = HashSet::new();
        for entry in &self.holidays {
            if !seen.insert(entry.date) {
                warn!(
                    date = %entry.date,
                    name = %entry.name,
                    "duplicate holiday entry; the earlier one wins"
                );
            }
        }

        let mut seen = HashSet::new();
        for observance in &self.observances {
            if !seen.insert(observance.date) {
                warn!(
                    date = %observance.date,
                    name = %observance.name,
                    "duplicate lunar observance; the earlier one wins"
                );
            }
        }
    }

    pub fn holidays(&self) -> &[HolidayEntry] {
        &self.holidays
    }

    pub fn observances(&self) -> &[LunarObservance] {
        &self.observances
    }

    pub fn lookup_by_month_day(&self, month: u8, day: u8) -> Option<&HolidayEntry> {
        self.holidays
            .iter()
            .find(|h| h.date.month() == month && h.date.day() == day)
    }

    /// Holiday falling on `date`, ignoring its year.
    pub fn lookup_date(&self, date: CalendarDate) -> Option<&HolidayEntry> {
        self.lookup_by_month_day(date.month(), date.day())
    }

    pub fn is_official_non_working_day(&self, month: u8, day: u8) -> bool {
        self.lookup_by_month_day(month, day)
            .is_some_and(|h| h.is_official_holiday)
    }

    pub fn lookup_lunar_observance(&self, date: CalendarDate) -> Option<&LunarObservance> {
        self.observances.iter().find(|o| o.date == date)
    }

    /// Earliest through latest observance date; outside it every lunar lookup misses.
    pub fn observance_window(&self) -> Option<DateRange> {
        let first = self.observances.iter().map(|o| o.date).min()?;
        let last = self.observances.iter().map(|o| o.date).max()?;
        Some(DateRange::new(first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn entry(month: u8, day: u8, name: &str, official: bool) -> HolidayEntry {
        HolidayEntry {
            date: MonthDay::new(month, day).expect("valid month/day"),
            name: name.to_owned(),
            is_official_holiday: official,
            is_kandil: false,
        }
    }

    fn observance(name: &str, d: &str, kandil: bool) -> LunarObservance {
        LunarObservance {
            name:      name.to_owned(),
            date:      date(d),
            is_kandil: kandil,
        }
    }

    fn table() -> HolidayTable {
        HolidayTable::new(
            vec![
                entry(1, 1, "Yılbaşı", true),
                entry(10, 29, "Cumhuriyet Bayramı", true),
                entry(2, 14, "Sevgililer Günü", false),
            ],
            vec![
                observance("Regaip Kandili", "2026-01-22", true),
                observance("Ramazan Başlangıcı", "2026-02-19", false),
            ],
        )
    }

    #[test]
    fn test_lookup_by_month_day() {
        let table = table();
        let new_year = table.lookup_by_month_day(1, 1).expect("new year entry");
        assert_eq!(new_year.name, "Yılbaşı");
        assert!(new_year.is_official_holiday);

        let valentine = table.lookup_by_month_day(2, 14).expect("valentine entry");
        assert!(!valentine.is_official_holiday);

        assert!(table.lookup_by_month_day(3, 3).is_none());
    }

    #[test]
    fn test_lookup_ignores_year() {
        let table = table();
        for d in ["2024-10-29", "2025-10-29", "2031-10-29"] {
            assert_eq!(
                table.lookup_date(date(d)).map(|h| h.name.as_str()),
                Some("Cumhuriyet Bayramı")
            );
        }
    }

    #[test]
    fn test_is_official_non_working_day() {
        let table = table();
        assert!(table.is_official_non_working_day(1, 1));
        assert!(table.is_official_non_working_day(10, 29));
        assert!(!table.is_official_non_working_day(2, 14));
        assert!(!table.is_official_non_working_day(7, 7));
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let table = HolidayTable::new(
            vec![entry(5, 1, "Emek ve Dayanışma Günü", true), entry(5, 1, "Bahar", false)],
            vec![],
        );
        let hit = table.lookup_by_month_day(5, 1).expect("first entry");
        assert_eq!(hit.name, "Emek ve Dayanışma Günü");
        assert!(table.is_official_non_working_day(5, 1));
    }

    #[test]
    fn test_lookup_lunar_observance_exact_date() {
        let table = table();
        let hit = table
            .lookup_lunar_observance(date("2026-01-22"))
            .expect("kandil on that date");
        assert_eq!(hit.name, "Regaip Kandili");
        assert!(hit.is_kandil);

        // Same month/day a year later is a different lunar date.
        assert!(table.lookup_lunar_observance(date("2027-01-22")).is_none());
        assert!(table.lookup_lunar_observance(date("2026-01-23")).is_none());
    }

    #[test]
    fn test_observance_window() {
        let window = table().observance_window().expect("non-empty observances");
        assert_eq!(window.start(), date("2026-01-22"));
        assert_eq!(window.end(), date("2026-02-19"));
        assert!(HolidayTable::default().observance_window().is_none());
    }

    #[test]
    fn test_serde_entry_shape() {
        let json = r#"{"month":4,"day":23,"name":"Ulusal Egemenlik ve Çocuk Bayramı","isOfficialHoliday":true}"#;
        let parsed: HolidayEntry = serde_json::from_str(json).expect("parse holiday entry");
        assert_eq!(parsed, entry(4, 23, "Ulusal Egemenlik ve Çocuk Bayramı", true));

        let legacy = r#"{"month":2,"day":14,"name":"Sevgililer Günü","isHoliday":false}"#;
        let parsed: HolidayEntry = serde_json::from_str(legacy).expect("parse legacy field name");
        assert!(!parsed.is_official_holiday);
    }

    #[test]
    fn test_serde_rejects_impossible_day() {
        let json = r#"{"month":4,"day":31,"name":"Yok","isOfficialHoliday":false}"#;
        assert!(serde_json::from_str::<HolidayEntry>(json).is_err());
    }

    #[test]
    fn test_serde_observance_default_kandil() {
        let json = r#"{"name":"Kurban Bayramı 1. Gün","date":"2026-05-27"}"#;
        let parsed: LunarObservance = serde_json::from_str(json).expect("parse observance");
        assert_eq!(parsed, observance("Kurban Bayramı 1. Gün", "2026-05-27", false));
    }
}
