// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member registration and profile initialization.
//!
//! Members are created from the auth provider's sign-in callback. The
//! one-time init-info step then attaches a climbing profile. The two steps
//! are independent writes with no compensation between them.

use crate::db::MemberRepository;
use crate::error::{AppError, Result};
use crate::models::{CreateInitInfoRequest, CreateMemberParams, Member, Profile};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// Member and profile as exposed to the member themselves.
#[derive(Debug, Clone)]
pub struct MemberOverview {
    pub member: Member,
    pub profile: Option<Profile>,
}

/// Registration workflow over an injected repository.
#[derive(Clone)]
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    /// Check whether a member is registered.
    pub async fn member_exists(&self, id: &str) -> Result<bool> {
        self.repo.exist_member(id).await
    }

    /// Register a member if it does not exist yet.
    ///
    /// A repeated call for the same id logs a warning and succeeds without
    /// writing, including when the repository reports the id as taken at
    /// insert time. Other repository errors are logged and returned unchanged.
    pub async fn create_member(&self, params: CreateMemberParams) -> Result<()> {
        let result = self.insert_if_absent(params).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to create member");
        }
        result
    }

    async fn insert_if_absent(&self, params: CreateMemberParams) -> Result<()> {
        if self.member_exists(&params.id).await? {
            tracing::warn!(member_id = %params.id, "Member already exists, skipping creation");
            return Ok(());
        }

        let expires_at = DateTime::<Utc>::from_timestamp(params.expires_at, 0).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid expires_at: {}", params.expires_at))
        })?;

        let member = Member {
            id: params.id,
            provider: params.provider,
            refresh_token: params.refresh_token,
            expires_at: expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        // A concurrent registration can win between the check and the insert.
        match self.repo.create_member(&member).await {
            Err(AppError::Conflict(_)) => {
                tracing::warn!(member_id = %member.id, "Member already exists, skipping creation");
                return Ok(());
            }
            result => result?,
        }

        tracing::info!(
            member_id = %member.id,
            provider = %member.provider,
            "Member created"
        );
        Ok(())
    }

    /// Create the member's profile from the init-info request.
    ///
    /// Fails with [`AppError::InvalidState`] if the member is not registered.
    /// The constructed [`Profile`] is what gets persisted; its image is
    /// always empty.
    pub async fn create_member_init_info(&self, dto: CreateInitInfoRequest, id: &str) -> Result<()> {
        if !self.member_exists(id).await? {
            return Err(AppError::InvalidState(AppError::MEMBER_NOT_FOUND.to_string()));
        }

        // TODO: upload dto.image to object storage and keep its URL in Profile::image
        if dto.image.is_some() {
            tracing::warn!(member_id = %id, "Image upload is not supported, ignoring image");
        }

        let profile = Profile::from_init_info(id, dto);
        self.repo.create_member_init_info(&profile).await?;

        tracing::info!(member_id = %id, nickname = %profile.nickname, "Member profile initialized");
        Ok(())
    }

    /// Fetch the member and its profile, if initialized.
    pub async fn get_member_overview(&self, id: &str) -> Result<MemberOverview> {
        let member = self
            .repo
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;
        let profile = self.repo.get_profile(id).await?;

        Ok(MemberOverview { member, profile })
    }
}
