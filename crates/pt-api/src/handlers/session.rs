//! Login session handlers

use axum::{extract::State, http::StatusCode, Json};
use pt_models::PublicUser;
use pt_services::SessionService;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

/// POST /api/session
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> ApiResult<Json<PublicUser>> {
    let user = SessionService::new(&state.store).login(&dto.username, &dto.password)?;
    Ok(Json(user.public()))
}

/// GET /api/session
pub async fn current(user: AuthenticatedUser) -> Json<PublicUser> {
    Json(user.public())
}

/// DELETE /api/session
pub async fn logout(State(state): State<AppState>) -> ApiResult<StatusCode> {
    SessionService::new(&state.store).logout()?;
    Ok(StatusCode::NO_CONTENT)
}
