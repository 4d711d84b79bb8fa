//! Closed calendar-date intervals.
//!
//! Every date-range read (booking search, schedule) goes through
//! [`DateInterval`], so a reversed or malformed range is rejected before any
//! query is issued.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::Date;

/// Wire format for dates in paths, query strings and schedule keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A closed interval `[start, end]` of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    start: Date,
    end: Date,
}

impl DateInterval {
    /// Build an interval, rejecting `start > end`.
    pub fn new(start: Date, end: Date) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidInterval(format!(
                "Start date {start} cannot be after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` strings into an interval.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// A single-day interval.
    pub fn single(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Reject intervals covering more than `max_days` days. `0` means no limit.
    pub fn ensure_max_days(self, max_days: u32) -> Result<Self, CoreError> {
        if max_days > 0 && self.num_days() > i64::from(max_days) {
            return Err(CoreError::InvalidInterval(format!(
                "Interval {} to {} covers {} days, at most {max_days} allowed",
                self.start,
                self.end,
                self.num_days()
            )));
        }
        Ok(self)
    }

    /// Iterate every date from `start` to `end` inclusive.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// Malformed input is an [`CoreError::InvalidInterval`] because dates only
/// ever arrive as interval bounds or as booking dates checked against one.
pub fn parse_date(value: &str) -> Result<Date, CoreError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::InvalidInterval(format!("'{value}' is not a valid YYYY-MM-DD date"))
    })
}

/// Parse a `YYYY-MM-DD` payload field, reporting failure as a validation error.
pub fn parse_date_field(name: &str, value: &str) -> Result<Date, CoreError> {
    parse_date(value).map_err(|_| {
        CoreError::Validation(format!("{name} '{value}' is not a valid YYYY-MM-DD date"))
    })
}
