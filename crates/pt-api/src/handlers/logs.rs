//! Activity log handler

use axum::{extract::State, Json};
use pt_models::ActivityLog;
use pt_services::ReportService;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser, Collection};

/// GET /api/logs
pub async fn list_logs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Collection<ActivityLog>>> {
    let logs = ReportService::new(&state.store).activity_log(&user)?;
    Ok(Json(Collection::new(logs)))
}
