// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member registration routes (require a session).

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{CreateInitInfoRequest, CreateMemberParams, Profile};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Member routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/members", post(create_member))
        .route("/api/members/me", get(get_me))
        .route("/api/members/init-info", post(create_init_info))
}

// ─── Registration ────────────────────────────────────────────

/// Provider account details sent by the sign-in callback.
#[derive(Deserialize)]
pub struct CreateMemberBody {
    #[serde(alias = "refreshToken")]
    pub refresh_token: String,
    /// Unix seconds
    #[serde(alias = "expiresAt")]
    pub expires_at: i64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SuccessResponse {
    pub success: bool,
    pub member_id: String,
}

/// Register the session's member. Repeated calls are no-ops.
async fn create_member(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateMemberBody>,
) -> Result<(StatusCode, Json<SuccessResponse>)> {
    state
        .members
        .create_member(CreateMemberParams {
            id: user.member_id.clone(),
            provider: user.provider,
            refresh_token: body.refresh_token,
            expires_at: body.expires_at,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            member_id: user.member_id,
        }),
    ))
}

// ─── Init-info ───────────────────────────────────────────────

/// Complete the one-time profile for the session's member.
async fn create_init_info(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateInitInfoRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>)> {
    body.validate()?;

    tracing::debug!(member_id = %user.member_id, "Creating member init-info");

    state
        .members
        .create_member_init_info(body, &user.member_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            member_id: user.member_id,
        }),
    ))
}

// ─── Current Member ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub nickname: String,
    pub crew_name: String,
    pub climbing_start_date: String,
    pub instagram_id: String,
    pub image: String,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            nickname: p.nickname,
            crew_name: p.crew_name,
            climbing_start_date: p.climbing_start_date,
            instagram_id: p.instagram_id,
            image: p.image,
        }
    }
}

/// Current member response. The refresh token is never returned.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MemberResponse {
    pub id: String,
    pub provider: String,
    pub created_at: String,
    /// False until init-info has been submitted
    pub profile_completed: bool,
    pub profile: Option<ProfileResponse>,
}

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MemberResponse>> {
    let overview = state.members.get_member_overview(&user.member_id).await?;

    Ok(Json(MemberResponse {
        id: overview.member.id,
        provider: overview.member.provider,
        created_at: overview.member.created_at,
        profile_completed: overview.profile.is_some(),
        profile: overview.profile.map(ProfileResponse::from),
    }))
}
