// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Climb-Crew: member registration backend and calendar for the crew app.
//!
//! This crate provides the API used by the browser client to register
//! members after sign-in, complete their climbing profile, and render the
//! date picker month grid.

pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::MemberService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub members: MemberService,
}
