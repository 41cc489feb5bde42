use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A calendar month: the key of the allocation ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Build a period, rejecting `year < 1` and months outside 1..=12.
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        // chrono cannot represent dates past its own max year
        if year < 1 || NaiveDate::from_ymd_opt(year, 12, 31).is_none() {
            return Err(AppError::InvalidPeriod(format!("{year}-{month:02}")));
        }
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidPeriod(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The period a date falls into.
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // (year, month) validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The twelve periods of a year, January first.
    pub fn months_of(year: i32) -> AppResult<Vec<Period>> {
        (1..=12).map(|m| Period::new(year, m)).collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = AppError;

    /// Accepts `YYYY-MM` (also `YYYY-M`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidPeriod(s.to_string());

        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;

        Period::new(year, month).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Period::new(2025, 0).is_err());
        assert!(Period::new(2025, 13).is_err());
        assert!(Period::new(0, 5).is_err());
        assert!(Period::new(-3, 5).is_err());
        assert!(Period::new(1, 1).is_ok());
    }

    #[test]
    fn parses_and_formats() {
        let p: Period = "2025-03".parse().unwrap();
        assert_eq!(p, Period::new(2025, 3).unwrap());
        assert_eq!(p.to_string(), "2025-03");

        let short: Period = "2025-3".parse().unwrap();
        assert_eq!(short, p);

        assert!("2025".parse::<Period>().is_err());
        assert!("2025-13".parse::<Period>().is_err());
        assert!("abcd-01".parse::<Period>().is_err());
    }

    #[test]
    fn month_bounds() {
        let feb = Period::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec = Period::new(2025, 12).unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert!(dec.contains(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!dec.contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(
            Period::of_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            dec
        );
    }

    #[test]
    fn ordering_follows_calendar() {
        let a = Period::new(2024, 12).unwrap();
        let b = Period::new(2025, 1).unwrap();
        assert!(a < b);
        assert_eq!(Period::months_of(2025).unwrap().len(), 12);
    }
}
