use crate::calendar::month_length;
use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A calendar month of a given year, the reference period of a
/// station-month record. The day-of-month is never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);

impl Month {
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }

    pub fn year(self) -> i32 {
        self.0
    }

    pub fn month(self) -> u32 {
        self.1
    }

    /// Number of calendar days in this month, `None` if the month number is
    /// outside `1..=12`.
    pub fn length(self) -> Option<u32> {
        month_length(self.0, self.1)
    }

    /// The concrete date for `day` of this month, if it exists.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, self.1, day)
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self(date.year(), date.month())
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_takes_month_then_year() {
        let month = Month::new(6, 2024);
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 6);
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(Month(987, 3).to_string(), "0987-03");
        assert_eq!(Month(2024, 11).to_string(), "2024-11");
    }

    #[test]
    fn from_date_drops_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Month::from(date), Month(2024, 2));
    }

    #[test]
    fn day_is_none_past_month_end() {
        assert!(Month(2023, 2).day(29).is_none());
        assert!(Month(2024, 2).day(29).is_some());
    }

    #[test]
    fn months_order_chronologically() {
        assert!(Month(2023, 12) < Month(2024, 1));
        assert!(Month(2024, 1) < Month(2024, 2));
    }
}
