//! Calendar day keys, labels, and the clock they are derived from.

use std::fmt;

use chrono::{Days, Local, NaiveDate};

use crate::types::DayOffset;

/// Source of "today" in the local timezone.
pub trait Clock {
    /// Current local calendar date; time of day is not observable.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Canonical identifier of a calendar day.
///
/// Ordering follows the calendar, and the string form is the ISO date
/// (`2026-10-16`) used as the persistence partition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Key for an explicit date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Key for the day `offset` days away from `today`.
    ///
    /// Returns `None` once the offset leaves chrono's representable range.
    pub fn from_offset(today: NaiveDate, offset: DayOffset) -> Option<Self> {
        let days = Days::new(offset.unsigned_abs());
        let date = if offset >= 0 {
            today.checked_add_days(days)
        } else {
            today.checked_sub_days(days)
        }?;
        Some(Self(date))
    }

    /// Calendar date of the key.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Storage key of the day's journal text.
    pub fn journal_key(&self) -> String {
        format!("journal-{self}")
    }

    /// Storage key of the day's planted token sequence.
    pub fn garden_key(&self) -> String {
        format!("garden-{self}")
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Human label for a day: `Today` at offset zero, otherwise e.g. `Sat, Oct 17`.
pub fn label(key: &DayKey, offset: DayOffset) -> String {
    if offset == 0 {
        return "Today".to_string();
    }
    key.date().format("%a, %b %-d").to_string()
}
