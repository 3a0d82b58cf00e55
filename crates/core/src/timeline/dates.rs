//! Date arithmetic and labels for the timeline table.
//!
//! All functions take "today" explicitly so they stay pure.

use std::cmp::Ordering;

use chrono::{Datelike, Days, NaiveDate};

use super::types::{Category, Event};

/// Formats a date as `M/d/yyyy` (no zero padding).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

/// Builds a date the way a JavaScript `Date` does: a day past the end of the
/// month and a month outside `0..12` both roll forward (or back) into the
/// neighbouring months. `month0` is zero based.
fn rolled_date(year: i32, month0: i32, day: u32) -> Option<NaiveDate> {
    let year = year + month0.div_euclid(12);
    let month = month0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(day.max(1)) - 1))
}

fn direction(start: NaiveDate, end: NaiveDate) -> i32 {
    match end.cmp(&start) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

/// Month boundaries crossed from `start` to `end`, ignoring the day.
pub fn calendar_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32
}

/// Number of whole months from `start` to `end`, matching date-fns
/// `differenceInMonths`. Negative when `end` precedes `start`.
///
/// The last calendar month only counts once the day of month is reached
/// again. An `end` in late February is compared as if it were the 30th, and
/// an `end` on the last day of its month completes a single month
/// (Jan 31 to Feb 28 is one month, Jan 31 to Apr 30 is two).
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let sign = direction(start, end);
    let difference = calendar_months_between(start, end).abs();
    if sign == 0 || difference < 1 {
        return 0;
    }

    let anchor = if end.month() == 2 && end.day() > 27 {
        rolled_date(end.year(), 1, 30)
    } else {
        Some(end)
    };
    let Some(shifted) = anchor.and_then(|anchor| {
        rolled_date(
            anchor.year(),
            anchor.month0() as i32 - sign * difference,
            anchor.day(),
        )
    }) else {
        return sign * difference;
    };

    let mut last_month_not_full = direction(start, shifted) == -sign;
    if is_last_day_of_month(end) && difference == 1 && sign == 1 {
        last_month_not_full = false;
    }
    sign * (difference - i32::from(last_month_not_full))
}

/// Number of whole years from `start` to `end`, matching date-fns
/// `differenceInYears`. Feb 29 birthdays complete a year on Mar 1.
pub fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let sign = direction(start, end);
    let difference = (end.year() - start.year()).abs();
    let start_day = (start.month(), start.day());
    let end_day = (end.month(), end.day());
    let last_year_not_full = match sign {
        1 => end_day < start_day,
        -1 => end_day > start_day,
        _ => false,
    };
    sign * (difference - i32::from(last_year_not_full))
}

/// Whole years, plus the whole months past the last full year.
pub fn years_and_months(start: NaiveDate, end: NaiveDate) -> (i32, i32) {
    (
        whole_years_between(start, end),
        whole_months_between(start, end) % 12,
    )
}

/// Compact duration label: `2y 3m`, `2y`, `3m` or `0m`.
///
/// An absent end date means the event is ongoing and is measured to `today`.
pub fn calculate_duration(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> String {
    let (years, months) = years_and_months(start, end.unwrap_or(today));

    match (years, months) {
        (0, 0) => "0m".to_string(),
        (0, m) => format!("{m}m"),
        (y, 0) => format!("{y}y"),
        (y, m) => format!("{y}y {m}m"),
    }
}

/// Age label: `{y} years and {m} months old`.
pub fn calculate_age(birth: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> String {
    let (years, months) = years_and_months(birth, end.unwrap_or(today));
    format!("{years} years and {months} months old")
}

/// The "since" column: age for `Alive` events, duration for the rest.
pub fn since_label(event: &Event, today: NaiveDate) -> String {
    match event.category {
        // Alive rows always show the current age.
        Category::Alive => calculate_age(event.start_date, None, today),
        _ => calculate_duration(event.start_date, event.end_date, today),
    }
}

/// The "end" column: formatted end date, or `Now` for ongoing events.
pub fn end_label(event: &Event) -> String {
    event
        .end_date
        .map(format_date)
        .unwrap_or_else(|| "Now".to_string())
}
