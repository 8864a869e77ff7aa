//! Dashboard summary endpoint.

use axum::extract::State;
use axum::Json;
use shared::DashboardSummary;

use crate::io::rest::error::ApiResult;
use crate::io::rest::AppState;

/// GET /api/dashboard/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    Ok(Json(state.dashboard.summary().await?))
}
