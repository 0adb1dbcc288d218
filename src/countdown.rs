//! Countdown definitions and the resolver that turns one into "N days left".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, EventKey, LunarTargetTable, MonthDay, days_between, prelude::*,
    resolve_recurrence_year,
};

/// How a countdown finds its target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CountdownKind {
    /// One exact, non-recurring date.
    Fixed { date: CalendarDate },
    /// Same month and day every year.
    Yearly(MonthDay),
    /// Looked up per year in the lunar target table.
    #[serde(alias = "islamic")]
    Lunar {
        #[serde(alias = "yearKey")]
        event: EventKey,
    },
    /// No target; the page explains how to count instead.
    #[serde(alias = "user")]
    Open,
}

/// A countdown page: identity, copy, and how to find its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownDefinition {
    pub slug:            String,
    pub title:           String,
    pub description:     String,
    #[serde(flatten)]
    pub kind:            CountdownKind,
    #[serde(default)]
    pub search_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalStatus {
    Past,
    Today,
    Future,
}

impl TemporalStatus {
    pub const fn from_days(days: i64) -> Self {
        match days {
            0 => Self::Today,
            d if d < 0 => Self::Past,
            _ => Self::Future,
        }
    }

    pub const fn is_today(self) -> bool {
        matches!(self, Self::Today)
    }

    pub const fn is_past(self) -> bool {
        matches!(self, Self::Past)
    }

    pub const fn is_future(self) -> bool {
        matches!(self, Self::Future)
    }
}

/// Outcome of resolving a countdown against one `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResult {
    /// Days left, never negative: past events show 0.
    pub days_remaining:        u32,
    pub target_date:           CalendarDate,
    pub target_date_formatted: String,
    pub status:                TemporalStatus,
    pub label:                 String,
}

impl CountdownResult {
    pub const fn is_today(&self) -> bool {
        self.status.is_today()
    }

    pub const fn is_past(&self) -> bool {
        self.status.is_past()
    }

    pub const fn is_future(&self) -> bool {
        self.status.is_future()
    }
}

impl CountdownKind {
    /// Concrete target date relative to `today`, or `None` when there is
    /// nothing to count towards.
    pub fn resolve(&self, today: CalendarDate, lunar: &LunarTargetTable) -> Option<CalendarDate> {
        match self {
            Self::Fixed { date } => Some(*date),
            Self::Yearly(month_day) => month_day.in_year(resolve_recurrence_year(today, *month_day)),
            Self::Lunar { event } => resolve_lunar(event, today, lunar),
            Self::Open => None,
        }
    }
}

fn resolve_lunar(event: &EventKey, today: CalendarDate, lunar: &LunarTargetTable) -> Option<CalendarDate> {
    let year = today.year();
    if let Some(date) = lunar.resolve(event, year) {
        return Some(date);
    }

    debug!(%event, year, "no lunar date for current year, trying next year");
    let next = year.checked_add(1).and_then(|y| lunar.resolve(event, y));
    if next.is_none() {
        warn!(
            %event,
            year,
            coverage = ?lunar.coverage(event),
            "lunar table has no date for this or next year"
        );
    }
    next
}

/// Resolves `definition` against `today`.
///
/// Returns `None` for open countdowns and for lunar events the table does not
/// cover; both mean "show the informational page", not an error.
pub fn compute_countdown(
    definition: &CountdownDefinition,
    today: CalendarDate,
    lunar: &LunarTargetTable,
) -> Option<CountdownResult> {
    let target = definition.kind.resolve(today, lunar)?;
    let days = days_between(today, target);

    Some(CountdownResult {
        days_remaining:        u32::try_from(days.max(0)).unwrap_or(u32::MAX),
        target_date:           target,
        target_date_formatted: target.format_long(),
        status:                TemporalStatus::from_days(days),
        label:                 definition.title.clone(),
    })
}

/// One-sentence Turkish answer for a countdown result.
pub fn describe_countdown(result: &CountdownResult, title: &str) -> String {
    match (result.status, result.days_remaining) {
        (TemporalStatus::Today, _) => format!("{title} bugün."),
        (TemporalStatus::Past, _) => {
            format!("{title} {} tarihinde gerçekleşti.", result.target_date_formatted)
        },
        (TemporalStatus::Future, 1) => format!("{title} yarına. 1 gün kaldı."),
        (TemporalStatus::Future, days) => format!(
            "{title} {days} gün sonra, {} tarihinde. {days} gün kaldı.",
            result.target_date_formatted
        ),
    }
}

/// All countdown pages plus the ones promoted on the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownCatalog {
    countdowns: Vec<CountdownDefinition>,
    #[serde(default)]
    featured:   Vec<String>,
}

impl CountdownCatalog {
    pub fn new(countdowns: Vec<CountdownDefinition>, featured: Vec<String>) -> Self {
        let catalog = Self {
            countdowns,
            featured,
        };
        catalog.report_inconsistencies();
        catalog
    }

    pub(crate) fn report_inconsistencies(&self) {
        let mut seen = HashSet::new();
        for definition in &self.countdowns {
            if !seen.insert(definition.slug.as_str()) {
                warn!(slug = %definition.slug, "duplicate countdown slug; the earlier one wins");
            }
        }
        for slug in &self.featured {
            if !seen.contains(slug.as_str()) {
                warn!(%slug, "featured countdown slug not found");
            }
        }
    }

    pub fn by_slug(&self, slug: &str) -> Option<&CountdownDefinition> {
        self.countdowns.iter().find(|c| c.slug == slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.countdowns.iter().map(|c| c.slug.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountdownDefinition> {
        self.countdowns.iter()
    }

    pub fn len(&self) -> usize {
        self.countdowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }

    /// Featured definitions in promotion order; unknown slugs are skipped.
    pub fn featured(&self) -> impl Iterator<Item = &CountdownDefinition> {
        self.featured.iter().filter_map(|slug| self.by_slug(slug))
    }

    /// Featured countdowns that currently have a result.
    pub fn featured_results(
        &self,
        today: CalendarDate,
        lunar: &LunarTargetTable,
    ) -> Vec<(&CountdownDefinition, CountdownResult)> {
        self.featured()
            .filter_map(|c| compute_countdown(c, today, lunar).map(|r| (c, r)))
            .collect()
    }
}
