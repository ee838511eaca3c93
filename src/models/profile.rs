// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Climbing profile model and the init-info request that creates it.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Date format shared by the calendar picker and the profile.
pub const CLIMBING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Profile stored in Firestore, keyed by member ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Member ID (also used as document ID)
    pub id: String,
    pub nickname: String,
    pub crew_name: String,
    /// First day of climbing (YYYY-MM-DD)
    pub climbing_start_date: String,
    pub instagram_id: String,
    /// Profile image reference. Always empty until uploads exist.
    pub image: String,
}

/// Body of `POST /api/members/init-info`.
///
/// Field names follow snake_case; the browser client's camelCase names are
/// accepted as aliases.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInitInfoRequest {
    #[validate(length(min = 1, max = 20, message = "nickname must be 1-20 characters"))]
    pub nickname: String,
    #[serde(default, alias = "crewName")]
    #[validate(length(max = 30, message = "crew_name must be at most 30 characters"))]
    pub crew_name: String,
    #[serde(alias = "climbingStartDate")]
    #[validate(custom(function = "validate_climbing_start_date"))]
    pub climbing_start_date: String,
    #[serde(default, alias = "userInstagramId")]
    #[validate(length(max = 30, message = "user_instagram_id must be at most 30 characters"))]
    pub user_instagram_id: String,
    /// Image upload payload. Accepted but not processed.
    #[serde(default, alias = "imageFile")]
    pub image: Option<String>,
}

impl Profile {
    /// Build the profile for `member_id` from an init-info request.
    ///
    /// The image is left empty regardless of the request.
    pub fn from_init_info(member_id: &str, dto: CreateInitInfoRequest) -> Self {
        Self {
            id: member_id.to_string(),
            nickname: dto.nickname,
            crew_name: dto.crew_name,
            climbing_start_date: dto.climbing_start_date,
            instagram_id: dto.user_instagram_id,
            image: String::new(),
        }
    }
}

fn validate_climbing_start_date(value: &str) -> Result<(), ValidationError> {
    let date = NaiveDate::parse_from_str(value, CLIMBING_DATE_FORMAT).map_err(|_| {
        let mut err = ValidationError::new("date_format");
        err.message = Some("climbing_start_date must be YYYY-MM-DD".into());
        err
    })?;

    if date > Utc::now().date_naive() {
        let mut err = ValidationError::new("date_in_future");
        err.message = Some("climbing_start_date cannot be in the future".into());
        return Err(err);
    }
    Ok(())
}
