//! Production entry handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use pt_contracts::production::{EntryEdit, NewPlan, RecordActual};
use pt_core::types::RecordId;
use pt_models::ProductionEntry;
use pt_services::{
    generate_batch_no, ActualService, DeleteEntryService, EditEntryService, PlanService,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser, Collection};

#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    pub date: Option<String>,
}

impl DateParams {
    fn or_today(self, state: &AppState) -> String {
        self.date
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| state.store.options().clock.today_iso())
    }
}

/// GET /api/entries?date
pub async fn list_entries(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DateParams>,
) -> ApiResult<Json<Collection<ProductionEntry>>> {
    let date = params.or_today(&state);
    let entries = ActualService::new(&state.store).plans_for_date(&user, &date)?;
    Ok(Json(Collection::new(entries)))
}

/// POST /api/entries
pub async fn create_plan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<NewPlan>,
) -> ApiResult<(StatusCode, Json<ProductionEntry>)> {
    let entry = PlanService::new(&state.store).create(&user, dto)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/entries/:id
pub async fn edit_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(dto): Json<EntryEdit>,
) -> ApiResult<Json<ProductionEntry>> {
    let entry = EditEntryService::new(&state.store).call(&user, &id, dto)?;
    Ok(Json(entry))
}

/// PUT /api/entries/:id/actual
///
/// The plan is taken from the path; a `planId` in the body is ignored.
pub async fn record_actual(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(dto): Json<RecordActual>,
) -> ApiResult<Json<ProductionEntry>> {
    let params = RecordActual {
        plan_id: Some(RecordId::from(id)),
        ..dto
    };
    let entry = ActualService::new(&state.store).record(&user, params)?;
    Ok(Json(entry))
}

/// DELETE /api/entries/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    DeleteEntryService::new(&state.store).call(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchNumber {
    date: String,
    batch_no: String,
}

/// GET /api/batch-number?date
pub async fn batch_number(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<DateParams>,
) -> Json<BatchNumber> {
    let date = params.or_today(&state);
    Json(BatchNumber {
        batch_no: generate_batch_no(&date),
        date,
    })
}
