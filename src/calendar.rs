//! Gregorian month lengths and the mapping between day-of-month slots and
//! the `<prefix><NN>` columns of a station-month record.

/// Number of day-of-month slots carried by every station-month record,
/// regardless of how long the month really is.
pub const DAY_SLOTS: usize = 31;

/// Proleptic Gregorian leap-year rule.
///
/// # Examples
///
/// ```
/// use hidroweb::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2000));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of calendar days in `month` of `year`, or `None` when `month` is
/// outside `1..=12`.
///
/// # Examples
///
/// ```
/// use hidroweb::month_length;
///
/// assert_eq!(month_length(2023, 2), Some(28));
/// assert_eq!(month_length(2024, 2), Some(29));
/// assert_eq!(month_length(2024, 4), Some(30));
/// assert_eq!(month_length(2024, 13), None);
/// ```
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Column name holding the value for `day` of a record measured under
/// `prefix`, e.g. `slot_column("Chuva", 5) == "Chuva05"`.
pub fn slot_column(prefix: &str, day: u32) -> String {
    format!("{prefix}{day:02}")
}

/// Inverse of [`slot_column`]. Returns the day-of-month for columns shaped
/// exactly like `<prefix>01..=<prefix>31`.
pub fn slot_day(prefix: &str, column: &str) -> Option<u32> {
    let digits = column.strip_prefix(prefix)?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = digits.parse().ok()?;
    (1..=DAY_SLOTS as u32).contains(&day).then_some(day)
}
