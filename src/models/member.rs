// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Member model for storage and API.

use serde::{Deserialize, Serialize};

/// Member record stored in Firestore, one per external identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Auth provider's user ID (also used as document ID)
    pub id: String,
    /// Auth provider name (e.g. "kakao", "google")
    pub provider: String,
    /// Provider refresh token
    pub refresh_token: String,
    /// When the provider access token expires (ISO 8601)
    pub expires_at: String,
    /// When the member was first registered (ISO 8601)
    pub created_at: String,
}

/// Parameters for registering a member after first sign-in.
#[derive(Debug, Clone)]
pub struct CreateMemberParams {
    pub id: String,
    pub provider: String,
    pub refresh_token: String,
    /// Token expiry as Unix seconds, as the provider reports it
    pub expires_at: i64,
}
