//! Calendar periods and date-range filtering

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `01-MM-YYYY`, the display form used by the monthly rewards table
    pub fn display_first_day(&self) -> String {
        format!("01-{:02}-{:04}", self.month, self.year)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    /// Accepts `YYYY-MM` or `YYYY-MM-DD`; the day is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let head = s.get(..7).filter(|_| s.len() == 7 || s.len() == 10);
        let parsed = head.and_then(|ym| {
            let (year, month) = ym.split_once('-')?;
            if year.len() != 4 || month.len() != 2 {
                return None;
            }
            YearMonth::new(year.parse().ok()?, month.parse().ok()?)
        });

        match parsed {
            Some(ym) if s.len() == 7 => Ok(ym),
            Some(ym) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => Ok(ym),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

/// Records that belong to one calendar month
pub trait Periodic {
    fn period(&self) -> YearMonth;
}

/// Inclusive month range; an unset bound is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<YearMonth>,
    pub to: Option<YearMonth>,
}

impl DateRange {
    pub fn new(from: Option<YearMonth>, to: Option<YearMonth>) -> Self {
        Self { from, to }
    }

    /// Build from raw filter input, where empty strings mean "unset"
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, CoreError> {
        Ok(Self {
            from: parse_bound("from", from)?,
            to: parse_bound("to", to)?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, period: YearMonth) -> bool {
        self.from.map_or(true, |from| period >= from) && self.to.map_or(true, |to| period <= to)
    }

    pub fn description(&self) -> String {
        match (self.from, self.to) {
            (None, None) => "All Time".to_string(),
            (Some(from), None) => format!("From {}", from),
            (None, Some(to)) => format!("Until {}", to),
            (Some(from), Some(to)) => format!("{} to {}", from, to),
        }
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> Result<Option<YearMonth>, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CoreError::InvalidFilter {
                field: field.to_string(),
                value: value.to_string(),
            }),
    }
}

/// Date of purchase as written, plus an instant for ordering.
///
/// The calendar day is the `YYYY-MM-DD` prefix without any timezone
/// conversion; the instant honours offsets when the source sends them.
pub fn parse_purchase_date(raw: &str) -> Option<(NaiveDate, NaiveDateTime)> {
    let raw = raw.trim();
    let day = raw
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())?;

    let instant = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| (raw.len() == 10).then(|| day.and_time(NaiveTime::MIN)))?;

    Some((day, instant))
}
