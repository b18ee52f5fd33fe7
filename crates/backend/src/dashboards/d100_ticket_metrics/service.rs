use super::repository;
use contracts::dashboards::d100_ticket_metrics::dto::MetricsResponse;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::shared::error::AppError;

/// Counts and average close time, read from a single snapshot
pub async fn compute(db: &DatabaseConnection) -> Result<MetricsResponse, AppError> {
    let txn = db.begin().await?;
    let status_counts = repository::count_by_status(&txn).await?;
    let close_durations = repository::close_durations(&txn).await?;
    txn.commit().await?;

    let report = MetricsResponse::compute(status_counts, close_durations);
    tracing::debug!("Metrics: {} ticket(s), {} done", report.total_count, report.done_count);
    Ok(report)
}
