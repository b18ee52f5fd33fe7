use super::repository;
use chrono::Utc;
use contracts::domain::a001_ticket::aggregate::{
    Ticket, TicketDto, TicketFilter, TicketId, TicketPatch,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::shared::error::AppError;

/// Create a new ticket
pub async fn create(db: &DatabaseConnection, dto: TicketDto) -> Result<Ticket, AppError> {
    dto.validate()?;

    let aggregate = Ticket::new_for_insert(dto, Utc::now());

    let txn = db.begin().await?;
    repository::insert(&txn, &aggregate).await?;
    // Re-read so the response reflects exactly what was stored
    let stored = repository::get_by_id(&txn, aggregate.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Ticket {} vanished after insert", aggregate.id))?;
    txn.commit().await?;

    tracing::info!("Created ticket {} ({})", stored.id, stored.status);
    Ok(stored)
}

pub async fn get_by_id(db: &DatabaseConnection, id: TicketId) -> Result<Ticket, AppError> {
    repository::get_by_id(db, id)
        .await?
        .ok_or_else(AppError::not_found::<Ticket>)
}

/// Tickets matching the filter
pub async fn list(db: &DatabaseConnection, filter: TicketFilter) -> Result<Vec<Ticket>, AppError> {
    Ok(repository::list(db, &filter).await?)
}

/// Apply a partial update.
///
/// The patch is validated before the ticket is looked up, so a bad body
/// against a missing id reports 422 rather than 404.
pub async fn update(
    db: &DatabaseConnection,
    id: TicketId,
    patch: TicketPatch,
) -> Result<Ticket, AppError> {
    patch.validate()?;

    let txn = db.begin().await?;
    let mut aggregate = repository::get_by_id(&txn, id)
        .await?
        .ok_or_else(AppError::not_found::<Ticket>)?;
    let previous_status = aggregate.status;

    aggregate.apply_patch(patch);
    repository::update(&txn, &mut aggregate, Utc::now()).await?;

    let stored = repository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Ticket {} vanished after update", id))?;
    txn.commit().await?;

    if previous_status != stored.status {
        tracing::info!("Ticket {} status {} -> {}", id, previous_status, stored.status);
    }
    Ok(stored)
}

/// Delete a ticket and all of its comments in one transaction
pub async fn delete(db: &DatabaseConnection, id: TicketId) -> Result<(), AppError> {
    let txn = db.begin().await?;
    let deleted = repository::delete(&txn, id).await?;
    if !deleted {
        // Nothing was removed; dropping the transaction rolls it back
        return Err(AppError::not_found::<Ticket>());
    }
    txn.commit().await?;

    tracing::info!("Deleted ticket {}", id);
    Ok(())
}
