use axum::extract::State;
use axum::Json;
use contracts::dashboards::d100_ticket_metrics::dto::MetricsResponse;

use crate::dashboards::d100_ticket_metrics;
use crate::shared::error::AppError;
use crate::shared::state::AppState;

/// GET /api/v1/metrics
pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<MetricsResponse>, AppError> {
    let report = d100_ticket_metrics::service::compute(&state.db).await?;
    Ok(Json(report))
}
