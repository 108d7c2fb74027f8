//! Off-day handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pt_core::types::normalize_date;
use pt_models::OffDay;
use pt_services::OffDayService;
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser, Collection};

/// GET /api/off-days
pub async fn list_off_days(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<Json<Collection<OffDay>>> {
    let off_days = OffDayService::new(&state.store).list()?;
    Ok(Json(Collection::new(off_days)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffDayCheck {
    date: String,
    off_day: bool,
}

/// GET /api/off-days/:date
pub async fn check_off_day(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(date): Path<String>,
) -> ApiResult<Json<OffDayCheck>> {
    let off_day = OffDayService::new(&state.store).is_off_day(&date)?;
    Ok(Json(OffDayCheck {
        date: normalize_date(&date),
        off_day,
    }))
}

/// POST /api/off-days
pub async fn add_off_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<OffDay>,
) -> ApiResult<(StatusCode, Json<OffDay>)> {
    let added = OffDayService::new(&state.store).add(&user, dto)?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// DELETE /api/off-days/:date
pub async fn remove_off_day(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    OffDayService::new(&state.store).remove(&user, &date)?;
    Ok(StatusCode::NO_CONTENT)
}
