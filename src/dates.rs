use chrono::{Datelike, NaiveDate};

/// The (year, month) the calendar is currently showing. Independent of today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayCursor {
    pub year: i32,
    /// 1 = January .. 12 = December
    pub month: u32,
}

impl DisplayCursor {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month out of range: {}", month);
        DisplayCursor { year, month }
    }

    /// Validating constructor: the month and the one after it must both fall
    /// inside chrono's supported range.
    pub fn checked(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        let cursor = DisplayCursor { year, month };
        let next = cursor.step(1);
        NaiveDate::from_ymd_opt(next.year, next.month, 1)?;
        Some(cursor)
    }

    pub fn containing(date: NaiveDate) -> Self {
        DisplayCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Moves one month forward (`direction > 0`) or backward (`direction < 0`),
    /// rolling the year over at December/January.
    pub fn step(self, direction: i32) -> Self {
        let mut year = self.year;
        let mut month = self.month as i32 + direction.signum();
        if month > 12 {
            month = 1;
            year += 1;
        } else if month < 1 {
            month = 12;
            year -= 1;
        }
        DisplayCursor {
            year,
            month: month as u32,
        }
    }

    pub fn first_day(self) -> NaiveDate {
        first_of_month(self.year, self.month)
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn first_weekday(self) -> u32 {
        first_weekday(self.year, self.month)
    }

    /// The date for `day` of this month, if such a day exists.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn title(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| panic!("invalid display month {}-{}", year, month))
}

/// Length of the month: take the first day of the following month and step
/// back one day.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    next.pred_opt().map(|d| d.day()).unwrap_or(28)
}

/// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(year: i32, month: u32) -> u32 {
    first_of_month(year, month).weekday().num_days_from_sunday()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2025, 1), 31);
    }

    #[test]
    fn month_lengths_match_chrono_for_a_century() {
        for year in 1950..2050 {
            for month in 1..=12 {
                let last = (28..=31)
                    .rev()
                    .find(|d| NaiveDate::from_ymd_opt(year, month, *d).is_some())
                    .unwrap();
                assert_eq!(days_in_month(year, month), last, "{}-{}", year, month);
            }
        }
    }

    #[test]
    fn first_weekday_is_sunday_based() {
        // 2024-09-01 was a Sunday, 2024-02-01 a Thursday.
        assert_eq!(first_weekday(2024, 9), 0);
        assert_eq!(first_weekday(2024, 2), 4);
        assert_eq!(first_weekday(2023, 7), 6);
    }

    #[test]
    fn step_rolls_over_year_boundaries() {
        assert_eq!(DisplayCursor::new(2024, 2).step(1), DisplayCursor::new(2024, 3));
        assert_eq!(DisplayCursor::new(2024, 12).step(1), DisplayCursor::new(2025, 1));
        assert_eq!(DisplayCursor::new(2024, 1).step(-1), DisplayCursor::new(2023, 12));
    }

    #[test]
    fn step_forward_then_back_is_identity() {
        for year in [1999, 2000, 2024, 2100] {
            for month in 1..=12 {
                let start = DisplayCursor::new(year, month);
                assert_eq!(start.step(1).step(-1), start);
                assert_eq!(start.step(-1).step(1), start);
            }
        }
    }

    #[test]
    fn checked_rejects_unrepresentable_months() {
        assert_eq!(DisplayCursor::checked(2024, 2), Some(DisplayCursor::new(2024, 2)));
        assert_eq!(DisplayCursor::checked(2024, 13), None);
        assert_eq!(DisplayCursor::checked(300_000, 1), None);
        assert_eq!(DisplayCursor::checked(-300_000, 1), None);
        // The 1st exists but the following month does not.
        let last = NaiveDate::MAX;
        assert_eq!(DisplayCursor::checked(last.year(), 12), None);
    }

    #[test]
    fn parses_and_formats_iso_dates() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date("2023-02-29").is_none());
        assert!(parse_date("yesterday").is_none());
    }
}
