//! Dashboard, report download and site settings

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use pt_core::types::MonthKey;
use pt_reports::MonthlyDashboard;
use pt_services::ReportService;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub category: Option<String>,
    pub month: Option<String>,
}

impl DashboardParams {
    /// Category and month to report on; defaults to the first known
    /// category and the current site month
    fn resolve(&self, state: &AppState) -> ApiResult<(String, MonthKey)> {
        let options = state.store.options();
        let category = match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category.to_string(),
            _ => options
                .known_categories
                .first()
                .cloned()
                .ok_or_else(|| ApiError::bad_request("category is required"))?,
        };
        let month = match self.month.as_deref() {
            Some(raw) => MonthKey::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("month must be YYYY-MM, got {raw:?}")))?,
            None => options.clock.current_month(),
        };
        Ok((category, month))
    }
}

/// GET /api/dashboard?category&month
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DashboardParams>,
) -> ApiResult<Json<MonthlyDashboard>> {
    let (category, month) = params.resolve(&state)?;
    let dashboard = ReportService::new(&state.store).dashboard(&user, &category, &month)?;
    Ok(Json(dashboard))
}

/// GET /api/export?category&month
pub async fn export(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DashboardParams>,
) -> ApiResult<impl IntoResponse> {
    let (category, month) = params.resolve(&state)?;
    let report = ReportService::new(&state.store).export(&user, &category, &month)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name),
            ),
        ],
        report.body,
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    #[serde(rename = "_type")]
    type_name: &'static str,
    today: String,
    current_month: MonthKey,
    categories: Vec<String>,
    processes: Vec<String>,
}

/// GET /api/site
pub async fn site(State(state): State<AppState>, _user: AuthenticatedUser) -> Json<SiteResponse> {
    let options = state.store.options();
    Json(SiteResponse {
        type_name: "Site",
        today: options.clock.today_iso(),
        current_month: options.clock.current_month(),
        categories: options.known_categories.clone(),
        processes: options.known_processes.clone(),
    })
}
