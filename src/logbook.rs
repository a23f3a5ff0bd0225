// ABOUTME: Core exercise log logic - date-window filtering, limit bounding, parsing
// ABOUTME: Pure functions shared by the logs query and exercise append handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Exercise Log Engine
//!
//! Pure query and parsing logic for exercise logs. The query side filters a
//! user's log by an optional date window, bounds it by an optional limit,
//! and renders entry dates as calendar strings. The parsing side turns the
//! raw request strings (dates, duration, limit) into typed values or a
//! [`AppError`] naming the offending value; no silently-invalid sentinel
//! ever propagates downstream.
//!
//! The date window is strictly exclusive on both ends: an entry dated
//! exactly `from` or exactly `to` is excluded. This is the literal observed
//! contract and is covered by tests.

use chrono::{Local, NaiveDate};

use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseView, LogView, User};

/// Date format of the `YYYY-MM-DD` request parameters
const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

/// Render a date as a human-readable calendar string, e.g. `Thu Jan 05 2023`
#[must_use]
pub fn render_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Parse an optional `from`/`to` query bound.
///
/// Absent or unparsable values mean "no bound" rather than an error: the
/// contract defaults an unusable bound to negative/positive infinity.
#[must_use]
pub fn parse_date_bound(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|raw| NaiveDate::parse_from_str(raw, DATE_PARAM_FORMAT).ok())
}

/// Parse the exercise date field: absent defaults to the current date,
/// present-but-unparsable is a validation error naming the value.
///
/// # Errors
///
/// Returns [`AppError::invalid_input`] if the value is not a `YYYY-MM-DD` date.
pub fn parse_entry_date(value: Option<&str>) -> AppResult<NaiveDate> {
    match value {
        None => Ok(Local::now().date_naive()),
        Some(raw) if raw.trim().is_empty() => Ok(Local::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_PARAM_FORMAT)
            .map_err(|_| AppError::invalid_input(format!("Invalid date: {raw}"))),
    }
}

/// Parse the required duration field into a positive integer.
///
/// # Errors
///
/// Returns [`AppError::missing_field`] if absent, or
/// [`AppError::invalid_input`] if not a positive integer.
pub fn parse_duration(value: Option<&str>) -> AppResult<i64> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field("duration"))?;

    match raw.parse::<i64>() {
        Ok(duration) if duration > 0 => Ok(duration),
        Ok(_) => Err(AppError::invalid_input(format!(
            "Duration must be a positive integer, got: {raw}"
        ))),
        Err(_) => Err(AppError::invalid_input(format!("Invalid duration: {raw}"))),
    }
}

/// Parse the optional `limit` query parameter.
///
/// # Errors
///
/// Returns [`AppError::invalid_input`] if a limit is present but not a
/// non-negative integer.
pub fn parse_limit(value: Option<&str>) -> AppResult<Option<usize>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| AppError::invalid_input(format!("Invalid limit: {raw}"))),
    }
}

/// Whether an entry date falls inside the exclusive `(from, to)` window
fn in_window(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|lower| date > lower) && to.is_none_or(|upper| date < upper)
}

/// Filter, bound, and format a user's exercise log.
///
/// Entries are kept when strictly inside the `(from, to)` window, in
/// insertion order; `limit` keeps only the first `limit` survivors (a limit
/// larger than the filtered length returns all of them). The returned
/// `count` is the length of the result, not the user's lifetime count.
/// Read-only: the stored log is never re-sorted or mutated.
#[must_use]
pub fn query_log(
    user: &User,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: Option<usize>,
) -> LogView {
    let bound = limit.unwrap_or(user.log.len());

    let entries: Vec<ExerciseView> = user
        .log
        .iter()
        .filter(|entry| in_window(entry.date, from, to))
        .take(bound)
        .map(|entry| ExerciseView {
            description: entry.description.clone(),
            duration: entry.duration,
            date: render_date(entry.date),
        })
        .collect();

    LogView {
        id: user.id,
        username: user.username.clone(),
        count: entries.len(),
        log: entries,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::models::ExerciseEntry;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn user_with_log(dates: &[&str]) -> User {
        let mut user = User::new("alice".to_owned());
        for (i, d) in dates.iter().enumerate() {
            user.log.push(ExerciseEntry {
                description: format!("exercise-{i}"),
                duration: 10 + i as i64,
                date: date(d),
            });
        }
        user.count = user.log.len() as i64;
        user
    }

    #[test]
    fn test_render_date_calendar_string() {
        assert_eq!(render_date(date("2023-01-05")), "Thu Jan 05 2023");
        assert_eq!(render_date(date("2024-01-01")), "Mon Jan 01 2024");
    }

    #[test]
    fn test_parse_date_bound_absent_or_garbled_means_no_bound() {
        assert_eq!(parse_date_bound(None), None);
        assert_eq!(parse_date_bound(Some("not-a-date")), None);
        assert_eq!(parse_date_bound(Some("2023-01-05")), Some(date("2023-01-05")));
    }

    #[test]
    fn test_parse_entry_date_defaults_to_today() {
        let today = Local::now().date_naive();
        assert_eq!(parse_entry_date(None).unwrap(), today);
        assert_eq!(parse_entry_date(Some("")).unwrap(), today);
    }

    #[test]
    fn test_parse_entry_date_invalid_names_value() {
        let err = parse_entry_date(Some("05/01/2023")).unwrap_err();
        assert!(err.message.contains("05/01/2023"));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(Some("30")).unwrap(), 30);
        assert!(parse_duration(None).is_err());
        assert!(parse_duration(Some("")).is_err());
        assert!(parse_duration(Some("thirty")).is_err());
        assert!(parse_duration(Some("0")).is_err());
        assert!(parse_duration(Some("-5")).is_err());
    }

    #[test]
    fn test_parse_limit_rejects_non_numeric() {
        assert_eq!(parse_limit(None).unwrap(), None);
        assert_eq!(parse_limit(Some("3")).unwrap(), Some(3));
        let err = parse_limit(Some("many")).unwrap_err();
        assert!(err.message.contains("many"));
    }

    #[test]
    fn test_window_bounds_are_strictly_exclusive() {
        let user = user_with_log(&["2023-01-01", "2023-01-05", "2023-01-10"]);

        let view = query_log(
            &user,
            Some(date("2023-01-01")),
            Some(date("2023-01-10")),
            None,
        );
        assert_eq!(view.count, 1);
        assert_eq!(view.log[0].date, "Thu Jan 05 2023");

        // An entry dated exactly `from` is excluded
        let view = query_log(&user, Some(date("2023-01-05")), None, None);
        assert_eq!(view.count, 1);
        assert_eq!(view.log[0].date, "Tue Jan 10 2023");
    }

    #[test]
    fn test_limit_bounds_after_filtering() {
        let user = user_with_log(&["2023-01-01", "2023-01-02", "2023-01-03"]);

        let view = query_log(&user, None, None, Some(2));
        assert_eq!(view.count, 2);
        assert_eq!(view.log[0].description, "exercise-0");
        assert_eq!(view.log[1].description, "exercise-1");
    }

    #[test]
    fn test_limit_larger_than_filtered_returns_all() {
        let user = user_with_log(&["2023-01-01", "2023-01-02"]);

        let view = query_log(&user, None, None, Some(100));
        assert_eq!(view.count, 2);
    }

    #[test]
    fn test_count_is_view_local_not_lifetime() {
        let user = user_with_log(&["2023-01-01", "2023-01-05", "2023-01-10"]);
        assert_eq!(user.count, 3);

        let view = query_log(&user, Some(date("2023-01-02")), None, Some(1));
        assert_eq!(view.count, 1);
    }

    #[test]
    fn test_order_preserved_no_resort() {
        // Dates deliberately out of calendar order: insertion order wins
        let user = user_with_log(&["2023-03-01", "2023-01-01", "2023-02-01"]);

        let view = query_log(&user, None, None, None);
        let dates: Vec<&str> = view.log.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["Wed Mar 01 2023", "Sun Jan 01 2023", "Wed Feb 01 2023"]
        );
    }
}
