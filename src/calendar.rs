// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month calendar state for the date picker.
//!
//! Months are 0-indexed (0 = January) and weeks start on Sunday, matching
//! the browser client. The state is local to one picker instance and is
//! never persisted.

use chrono::{Datelike, Local, Months, NaiveDate};
use std::iter;

/// Weekday header row, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Month must be between 0 and 11, got {0}")]
    InvalidMonth(u32),

    #[error("Day {day} is not in month {month} of {year}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },
}

/// Displayed year/month plus the selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    year: i32,
    month: u32,
    selected: Option<NaiveDate>,
}

impl Calendar {
    /// Calendar showing `month` (0-11) of `year` with nothing selected.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month,
            selected: None,
        })
    }

    /// Calendar on the current local month with today selected.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month0(),
            selected: Some(today),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Replace the selection without emitting anything.
    pub fn set_selected(&mut self, date: Option<NaiveDate>) {
        self.selected = date;
    }

    /// Show the previous month, wrapping January to December of the prior year.
    pub fn prev_month(&mut self) {
        if self.month == 0 {
            self.year = self.year.saturating_sub(1);
            self.month = 11;
        } else {
            self.month -= 1;
        }
    }

    /// Show the next month, wrapping December to January of the next year.
    pub fn next_month(&mut self) {
        if self.month == 11 {
            self.year = self.year.saturating_add(1);
            self.month = 0;
        } else {
            self.month += 1;
        }
    }

    fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Number of days in the displayed month, if the year is representable.
    pub fn days_in_month(&self) -> Option<u32> {
        let first = self.first_of_month()?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(last.day())
    }

    /// Day cells for the displayed month.
    ///
    /// Leading `None` placeholders fill the weekdays before day 1, followed
    /// by `Some(1)..=Some(last)`. Empty if the year is out of range.
    pub fn day_grid(&self) -> Vec<Option<u32>> {
        let (Some(first), Some(days)) = (self.first_of_month(), self.days_in_month()) else {
            return Vec::new();
        };
        let offset = first.weekday().num_days_from_sunday() as usize;

        iter::repeat(None)
            .take(offset)
            .chain((1..=days).map(Some))
            .collect()
    }

    /// Select `day` of the displayed month and pass the formatted date to
    /// `on_select`.
    ///
    /// The callback runs exactly once on success and not at all when the day
    /// does not exist in this month.
    pub fn select_day<F>(&mut self, day: u32, on_select: F) -> Result<NaiveDate, CalendarError>
    where
        F: FnOnce(&str),
    {
        let date = NaiveDate::from_ymd_opt(self.year, self.month + 1, day).ok_or(
            CalendarError::DayOutOfRange {
                year: self.year,
                month: self.month,
                day,
            },
        )?;

        self.selected = Some(date);
        on_select(&format_date(self.year, self.month, day));
        Ok(date)
    }

    /// Whether `day` of the displayed month is the selected date.
    pub fn is_selected(&self, day: u32) -> bool {
        self.selected.is_some_and(|d| self.is_same_day(d, day))
    }

    /// Whether `day` of the displayed month is `today`.
    pub fn is_today(&self, day: u32, today: NaiveDate) -> bool {
        self.is_same_day(today, day)
    }

    fn is_same_day(&self, date: NaiveDate, day: u32) -> bool {
        date.year() == self.year && date.month0() == self.month && date.day() == day
    }

    /// Header text, e.g. "2024년 3월".
    pub fn label(&self) -> String {
        format!("{}년 {}월", self.year, self.month + 1)
    }
}

/// Format a date as `YYYY-MM-DD` from a 0-indexed month.
///
/// Month and day are zero-padded to two digits. The year is written as a
/// plain integer, so year 5 is `5-01-01` and year -5 is `-5-01-01`.
pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month + 1, day)
}
