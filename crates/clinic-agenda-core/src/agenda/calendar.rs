//! Calendar sequences for the weekly and monthly agenda views.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of working days shown in the weekly agenda.
pub const WORK_WEEK_DAYS: usize = 5;

/// Monday on or before `reference`.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()))
}

/// Monday through Friday of the week containing `reference`.
pub fn work_week(reference: NaiveDate) -> [NaiveDate; WORK_WEEK_DAYS] {
    let monday = week_start(reference);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Move `reference` by whole weeks (negative goes back).
pub fn shift_weeks(reference: NaiveDate, weeks: i64) -> NaiveDate {
    reference + Duration::weeks(weeks)
}

/// Whether the day is Monday–Friday.
pub fn is_work_day(day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One cell of the monthly grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
}

/// Full Sunday-to-Saturday weeks covering the month of `reference`.
///
/// The result length is always a multiple of 7.
pub fn month_grid(reference: NaiveDate) -> Vec<CalendarDay> {
    let first = reference - Duration::days(i64::from(reference.day0()));
    let last = first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .last()
        .unwrap_or(first);

    let grid_start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
    let grid_end = last + Duration::days(i64::from(6 - last.weekday().num_days_from_sunday()));

    grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .map(|date| CalendarDay {
            date,
            in_month: date.month() == first.month() && date.year() == first.year(),
        })
        .collect()
}
