use contracts::domain::a001_ticket::aggregate::Ticket;
use contracts::domain::common::AggregateRoot;
use contracts::enums::TicketStatus;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};

use crate::domain::a001_ticket::repository as ticket_repository;

/// Row count per stored status value
#[derive(Debug, Clone, FromQueryResult)]
struct StatusCount {
    status: Option<String>,
    cnt: i64,
}

/// Ticket counts grouped by status.
///
/// Unknown status codes come back as `None` so they still reach the total.
pub async fn count_by_status<C: ConnectionTrait>(
    db: &C,
) -> anyhow::Result<Vec<(Option<TicketStatus>, u64)>> {
    let sql = format!(
        r#"
        SELECT status, COUNT(*) AS cnt
        FROM {}
        GROUP BY status
        "#,
        Ticket::full_name()
    );
    let stmt = Statement::from_string(db.get_database_backend(), sql);
    let rows = StatusCount::find_by_statement(stmt).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let status = row.status.as_deref().and_then(TicketStatus::from_code);
            (status, row.cnt.max(0) as u64)
        })
        .collect())
}

/// Time to close of every ticket with `closed_at` set
pub async fn close_durations<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<chrono::Duration>> {
    let closed = ticket_repository::list_closed(db).await?;
    Ok(closed.iter().filter_map(Ticket::time_to_close).collect())
}
