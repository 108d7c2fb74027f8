//! User handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pt_contracts::users::ChangePassword;
use pt_models::{NewUser, PublicUser};
use pt_services::UserService;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser, Collection};

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Collection<PublicUser>>> {
    let users = UserService::new(&state.store).list(&user)?;
    Ok(Json(Collection::new(users)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let created = UserService::new(&state.store).create(&user, dto)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    UserService::new(&state.store).delete(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<ChangePassword>,
) -> ApiResult<StatusCode> {
    UserService::new(&state.store).change_password(&user, dto)?;
    Ok(StatusCode::NO_CONTENT)
}
