// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local repository for tests and `MEMBER_STORE=memory` runs.

use crate::db::MemberRepository;
use crate::error::{AppError, Result};
use crate::models::{Member, Profile};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    members: DashMap<String, Member>,
    profiles: DashMap<String, Profile>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[async_trait]
impl MemberRepository for InMemoryRepository {
    async fn exist_member(&self, id: &str) -> Result<bool> {
        Ok(self.members.contains_key(id))
    }

    async fn create_member(&self, member: &Member) -> Result<()> {
        match self.members.entry(member.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Member {} already exists",
                member.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(member.clone());
                Ok(())
            }
        }
    }

    async fn create_member_init_info(&self, profile: &Profile) -> Result<()> {
        match self.profiles.entry(profile.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Profile for member {} already exists",
                profile.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(())
            }
        }
    }

    async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        Ok(self.members.get(id).map(|m| m.value().clone()))
    }

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.get(id).map(|p| p.value().clone()))
    }
}
