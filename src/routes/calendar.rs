// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar routes backing the browser date picker.

use crate::calendar::{Calendar, WEEKDAY_LABELS};
use crate::error::{AppError, Result};
use crate::models::profile::CLIMBING_DATE_FORMAT;
use crate::AppState;
use axum::{
    extract::Query,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calendar", get(get_calendar))
        .route("/api/calendar/select", post(select_date))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CalendarNav {
    Prev,
    Next,
}

#[derive(Deserialize)]
struct CalendarQuery {
    year: Option<i32>,
    /// 0-indexed month
    month: Option<u32>,
    /// One navigation step applied before rendering
    nav: Option<CalendarNav>,
    /// Currently selected date (YYYY-MM-DD)
    selected: Option<String>,
}

/// Month grid response. `days` holds `null` for leading blank cells.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub weekdays: Vec<String>,
    pub days: Vec<Option<u32>>,
    /// Today's day number if today is in the displayed month
    pub today: Option<u32>,
    /// Selected day number if the selection is in the displayed month
    pub selected: Option<u32>,
}

fn parse_selected(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, CLIMBING_DATE_FORMAT).map_err(|_| {
            AppError::BadRequest("Invalid 'selected' parameter: must be YYYY-MM-DD".to_string())
        })
    })
    .transpose()
}

fn render(calendar: &Calendar, today: NaiveDate) -> CalendarResponse {
    let days = calendar.day_grid();
    let find = |pred: &dyn Fn(u32) -> bool| days.iter().flatten().copied().find(|&d| pred(d));

    CalendarResponse {
        year: calendar.year(),
        month: calendar.month(),
        label: calendar.label(),
        weekdays: WEEKDAY_LABELS.iter().map(|s| s.to_string()).collect(),
        today: find(&|d| calendar.is_today(d, today)),
        selected: find(&|d| calendar.is_selected(d)),
        days,
    }
}

/// Render one month. Defaults to the current month with today selected.
async fn get_calendar(Query(params): Query<CalendarQuery>) -> Result<Json<CalendarResponse>> {
    let mut calendar = match (params.year, params.month) {
        (Some(year), Some(month)) => Calendar::new(year, month)?,
        (None, None) => Calendar::today(),
        _ => {
            return Err(AppError::BadRequest(
                "'year' and 'month' must be given together".to_string(),
            ))
        }
    };

    if let Some(selected) = parse_selected(params.selected.as_deref())? {
        calendar.set_selected(Some(selected));
    }

    match params.nav {
        Some(CalendarNav::Prev) => calendar.prev_month(),
        Some(CalendarNav::Next) => calendar.next_month(),
        None => {}
    }

    Ok(Json(render(&calendar, Local::now().date_naive())))
}

#[derive(Deserialize)]
struct SelectBody {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SelectResponse {
    pub date: String,
}

/// Format a clicked day as the picker's output string.
async fn select_date(Json(body): Json<SelectBody>) -> Result<Json<SelectResponse>> {
    let mut calendar = Calendar::new(body.year, body.month)?;
    let mut date = String::new();
    calendar.select_day(body.day, |formatted| date = formatted.to_string())?;

    Ok(Json(SelectResponse { date }))
}
