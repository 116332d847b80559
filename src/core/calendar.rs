//! Calendar-derived group keys.

use chrono::{Datelike, NaiveDate};

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar partition used to key rows by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarPeriod {
    /// Day of week, Sunday = 0 through Saturday = 6.
    Weekday,
    /// Month of year, January = 0 through December = 11.
    Month,
}

impl CalendarPeriod {
    /// Calendar index of `date`; ascending order is calendar order.
    pub fn key(self, date: NaiveDate) -> u32 {
        match self {
            CalendarPeriod::Weekday => date.weekday().num_days_from_sunday(),
            CalendarPeriod::Month => date.month0(),
        }
    }

    /// Full English name of the period containing `date`.
    pub fn label(self, date: NaiveDate) -> &'static str {
        let key = self.key(date) as usize;
        match self {
            CalendarPeriod::Weekday => WEEKDAY_NAMES[key],
            CalendarPeriod::Month => MONTH_NAMES[key],
        }
    }

    /// Number of distinct keys.
    pub fn cardinality(self) -> usize {
        match self {
            CalendarPeriod::Weekday => WEEKDAY_NAMES.len(),
            CalendarPeriod::Month => MONTH_NAMES.len(),
        }
    }
}
