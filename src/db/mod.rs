// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the member repository capability and its backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::InMemoryRepository;

use crate::error::Result;
use crate::models::{Member, Profile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const MEMBERS: &str = "members";
    /// Profiles keyed by member id
    pub const PROFILES: &str = "profiles";
}

/// Persistence for members and their profiles.
///
/// Inserts are single-document and atomic: inserting an id that is already
/// stored fails with [`AppError::Conflict`](crate::error::AppError::Conflict)
/// and leaves the stored record untouched.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Whether a member with this id has been registered.
    async fn exist_member(&self, id: &str) -> Result<bool>;

    async fn create_member(&self, member: &Member) -> Result<()>;

    /// Store the one-time profile for `profile.id`.
    async fn create_member_init_info(&self, profile: &Profile) -> Result<()>;

    async fn get_member(&self, id: &str) -> Result<Option<Member>>;

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>>;
}
