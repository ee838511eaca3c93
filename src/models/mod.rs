// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod member;
pub mod profile;

pub use member::{CreateMemberParams, Member};
pub use profile::{CreateInitInfoRequest, Profile};
