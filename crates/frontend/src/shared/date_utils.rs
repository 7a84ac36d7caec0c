/// Utilities for date formatting shown on the dashboard
use chrono::{Datelike, NaiveDate};

/// Week of the year as "YYYY-WW"
///
/// Weeks start on Sunday; the week containing January 1st is week 01.
/// Example: 2024-01-07 (a Sunday) -> "2024-02"
pub fn current_week(date: NaiveDate) -> String {
    let ordinal0 = date.ordinal0();
    let weekday = date.weekday().num_days_from_sunday();
    let jan1_weekday = (weekday + 7 - ordinal0 % 7) % 7;
    let week = (ordinal0 + jan1_weekday) / 7 + 1;
    format!("{}-{:02}", date.year(), week)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_week() {
        assert_eq!(current_week(date(2024, 1, 1)), "2024-01");
        assert_eq!(current_week(date(2024, 1, 6)), "2024-01");
        assert_eq!(current_week(date(2024, 1, 7)), "2024-02");
        assert_eq!(current_week(date(2024, 12, 31)), "2024-53");
    }

    #[test]
    fn test_year_starting_on_sunday() {
        assert_eq!(current_week(date(2023, 1, 1)), "2023-01");
        assert_eq!(current_week(date(2023, 1, 7)), "2023-01");
        assert_eq!(current_week(date(2023, 1, 8)), "2023-02");
    }
}
