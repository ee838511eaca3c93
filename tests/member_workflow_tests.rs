// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member registration workflow tests against the in-memory repository.

use async_trait::async_trait;
use climb_crew::db::{InMemoryRepository, MemberRepository};
use climb_crew::error::{AppError, Result};
use climb_crew::models::{CreateInitInfoRequest, CreateMemberParams, Member, Profile};
use climb_crew::services::MemberService;
use std::sync::Arc;
use std::time::Duration;

fn setup() -> (MemberService, Arc<InMemoryRepository>) {
    let repo = Arc::new(InMemoryRepository::new());
    (MemberService::new(repo.clone()), repo)
}

fn params(id: &str, refresh_token: &str) -> CreateMemberParams {
    CreateMemberParams {
        id: id.to_string(),
        provider: "kakao".to_string(),
        refresh_token: refresh_token.to_string(),
        expires_at: 1_767_225_600,
    }
}

/// Delays the existence check so two registrations both see "absent".
struct SlowExistRepo {
    inner: InMemoryRepository,
}

#[async_trait]
impl MemberRepository for SlowExistRepo {
    async fn exist_member(&self, id: &str) -> Result<bool> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.inner.exist_member(id).await
    }

    async fn create_member(&self, member: &Member) -> Result<()> {
        self.inner.create_member(member).await
    }

    async fn create_member_init_info(&self, profile: &Profile) -> Result<()> {
        self.inner.create_member_init_info(profile).await
    }

    async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        self.inner.get_member(id).await
    }

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        self.inner.get_profile(id).await
    }
}

/// Reports every member as absent and fails every insert.
struct FailingInsertRepo;

#[async_trait]
impl MemberRepository for FailingInsertRepo {
    async fn exist_member(&self, _id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn create_member(&self, _member: &Member) -> Result<()> {
        Err(AppError::Database("disk full".to_string()))
    }

    async fn create_member_init_info(&self, _profile: &Profile) -> Result<()> {
        Err(AppError::Database("disk full".to_string()))
    }

    async fn get_member(&self, _id: &str) -> Result<Option<Member>> {
        Ok(None)
    }

    async fn get_profile(&self, _id: &str) -> Result<Option<Profile>> {
        Ok(None)
    }
}

fn init_info() -> CreateInitInfoRequest {
    CreateInitInfoRequest {
        nickname: "crimpy".to_string(),
        crew_name: "Seoul Boulder Crew".to_string(),
        climbing_start_date: "2022-05-14".to_string(),
        user_instagram_id: "crimpy.climbs".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn test_created_member_exists() {
    let (service, _) = setup();

    for id in ["1001", "kakao-2002", "google-oauth2|3003"] {
        assert!(!service.member_exists(id).await.unwrap());
        service.create_member(params(id, "token")).await.unwrap();
        assert!(service.member_exists(id).await.unwrap());
    }
}

#[tokio::test]
async fn test_duplicate_create_is_noop() {
    let (service, repo) = setup();

    service.create_member(params("1001", "first")).await.unwrap();
    service
        .create_member(params("1001", "second"))
        .await
        .expect("second create should not fail");

    assert_eq!(repo.member_count(), 1);
    let stored = repo.get_member("1001").await.unwrap().unwrap();
    assert_eq!(stored.refresh_token, "first");
}

#[tokio::test]
async fn test_concurrent_duplicate_create_is_noop() {
    let repo = Arc::new(SlowExistRepo {
        inner: InMemoryRepository::new(),
    });
    let service = MemberService::new(repo.clone());

    let (a, b) = tokio::join!(
        service.create_member(params("1001", "first")),
        service.create_member(params("1001", "second")),
    );

    assert!(a.is_ok(), "first create failed: {a:?}");
    assert!(b.is_ok(), "second create failed: {b:?}");
    assert_eq!(repo.inner.member_count(), 1);
}

#[tokio::test]
async fn test_insert_failure_returned_unchanged() {
    let service = MemberService::new(Arc::new(FailingInsertRepo));

    let err = service
        .create_member(params("1001", "token"))
        .await
        .unwrap_err();

    assert!(
        matches!(&err, AppError::Database(msg) if msg == "disk full"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_init_info_requires_member() {
    let (service, repo) = setup();

    let err = service
        .create_member_init_info(init_info(), "never-registered")
        .await
        .unwrap_err();

    assert!(err.is_member_not_found(), "unexpected error: {err:?}");
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(repo.get_profile("never-registered").await.unwrap().is_none());
}

#[tokio::test]
async fn test_init_info_persists_constructed_profile() {
    let (service, repo) = setup();
    service.create_member(params("1001", "token")).await.unwrap();

    let mut dto = init_info();
    dto.image = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
    service.create_member_init_info(dto, "1001").await.unwrap();

    // The stored record is the Profile built by the service, not the raw
    // request: it is keyed by the member id and its image is empty.
    let profile = repo.get_profile("1001").await.unwrap().unwrap();
    assert_eq!(profile.id, "1001");
    assert_eq!(profile.nickname, "crimpy");
    assert_eq!(profile.crew_name, "Seoul Boulder Crew");
    assert_eq!(profile.climbing_start_date, "2022-05-14");
    assert_eq!(profile.instagram_id, "crimpy.climbs");
    assert_eq!(profile.image, "");
}

#[tokio::test]
async fn test_second_init_info_conflicts() {
    let (service, _) = setup();
    service.create_member(params("1001", "token")).await.unwrap();
    service.create_member_init_info(init_info(), "1001").await.unwrap();

    let err = service
        .create_member_init_info(init_info(), "1001")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_overview_includes_profile() {
    let (service, _) = setup();
    service.create_member(params("1001", "token")).await.unwrap();

    let before = service.get_member_overview("1001").await.unwrap();
    assert!(before.profile.is_none());

    service.create_member_init_info(init_info(), "1001").await.unwrap();
    let after = service.get_member_overview("1001").await.unwrap();
    assert_eq!(after.member.provider, "kakao");
    assert_eq!(after.profile.unwrap().nickname, "crimpy");
}
