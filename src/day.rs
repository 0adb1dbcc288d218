use serde::Serialize;

use crate::{CalendarDate, HolidayEntry, HolidayTable, LunarObservance};

/// Everything the "what day is it" pages show about one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayInfo<'a> {
    pub date:                CalendarDate,
    pub formatted:           String,
    pub weekday:             &'static str,
    pub holiday:             Option<&'a HolidayEntry>,
    pub observance:          Option<&'a LunarObservance>,
    pub is_official_holiday: bool,
}

impl<'a> DayInfo<'a> {
    pub fn new(date: CalendarDate, table: &'a HolidayTable) -> Self {
        Self {
            date,
            formatted: date.format_long(),
            weekday: date.weekday_name(),
            holiday: table.lookup_date(date),
            observance: table.lookup_lunar_observance(date),
            is_official_holiday: table.is_official_non_working_day(date.month(), date.day()),
        }
    }

    pub fn is_kandil(&self) -> bool {
        self.observance.is_some_and(|o| o.is_kandil)
    }

    /// "1 Ocak 2026 Perşembe."
    pub fn weekday_answer(&self) -> String {
        format!("{} {}.", self.formatted, self.weekday)
    }

    pub fn official_holiday_answer(&self) -> String {
        match self.holiday.filter(|h| h.is_official_holiday) {
            Some(h) => format!("Evet. {} {} resmi tatil.", self.formatted, h.name),
            None => format!("Hayır. {} resmi tatil değil.", self.formatted),
        }
    }

    pub fn observance_answer(&self) -> String {
        match self.observance {
            Some(o) if o.is_kandil => format!("Evet. {} {}.", self.formatted, o.name),
            Some(o) => format!("{} {}.", self.formatted, o.name),
            None => format!("{} kandil değil.", self.formatted),
        }
    }

    /// Date plus any special day and religious day on it.
    pub fn summary(&self) -> String {
        let mut out = format!("{}.", self.formatted);
        if let Some(h) = self.holiday {
            out.push_str(&format!(" Özel/tatil: {}.", h.name));
        }
        if let Some(o) = self.observance {
            out.push_str(&format!(" Dini gün: {}.", o.name));
        }
        out
    }
}
