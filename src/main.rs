// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Climb-Crew API Server
//!
//! Registers crew members after sign-in, stores their climbing profile,
//! and serves the calendar grid for the browser date picker.

use climb_crew::{
    config::{Config, MemberStore},
    db::{FirestoreDb, InMemoryRepository, MemberRepository},
    services::MemberService,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        member_store = ?config.member_store,
        "Starting Climb-Crew API"
    );

    // Select the repository backing the member workflow
    let repo: Arc<dyn MemberRepository> = match config.member_store {
        MemberStore::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        MemberStore::Memory => {
            tracing::warn!("Using in-memory member store; data will not survive restarts");
            Arc::new(InMemoryRepository::new())
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        members: MemberService::new(repo),
    });

    // Build router
    let app = climb_crew::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("climb_crew=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
