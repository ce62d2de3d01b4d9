use chrono::{Duration, Local, NaiveDate};
use std::fmt;

/// Calendar-day identifier, `YYYY-MM-DD` in local time. Two keys are equal
/// iff they name the same calendar day, and string order matches date order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day before this one, for walking streaks backward.
    pub fn previous(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
