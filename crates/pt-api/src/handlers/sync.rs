//! Sync and remote endpoint handlers

use axum::{extract::State, Json};
use pt_services::{RemoteStatus, SyncService};
use pt_store::SyncReport;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

/// POST /api/sync
pub async fn sync(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<SyncReport>> {
    let report = SyncService::new(&state.store).sync(&user).await?;
    Ok(Json(report))
}

/// GET /api/remote
pub async fn remote_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<RemoteStatus>> {
    Ok(Json(SyncService::new(&state.store).remote_status(&user)?))
}

#[derive(Debug, Deserialize)]
pub struct RemoteUpdateDto {
    pub url: Option<String>,
}

/// PUT /api/remote
pub async fn set_remote(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<RemoteUpdateDto>,
) -> ApiResult<Json<RemoteStatus>> {
    let status = SyncService::new(&state.store).set_endpoint(&user, dto.url)?;
    Ok(Json(status))
}
