use super::repository;
use chrono::Utc;
use contracts::domain::a001_ticket::aggregate::{Ticket, TicketId};
use contracts::domain::a002_comment::aggregate::{Comment, CommentDto, CommentId};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::domain::a001_ticket;
use crate::shared::error::AppError;

/// Attach a comment to an existing ticket
pub async fn create(
    db: &DatabaseConnection,
    ticket_id: TicketId,
    dto: CommentDto,
) -> Result<Comment, AppError> {
    dto.validate()?;

    let txn = db.begin().await?;
    if !a001_ticket::repository::exists(&txn, ticket_id).await? {
        return Err(AppError::not_found::<Ticket>());
    }

    let aggregate = Comment::new_for_insert(ticket_id, dto, Utc::now());
    repository::insert(&txn, &aggregate).await?;
    let stored = repository::get_by_id(&txn, aggregate.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Comment {} vanished after insert", aggregate.id))?;
    txn.commit().await?;

    tracing::info!("Added comment {} to ticket {}", stored.id, ticket_id);
    Ok(stored)
}

/// Comments of a ticket, oldest first.
///
/// An unknown ticket yields an empty list.
pub async fn list(db: &DatabaseConnection, ticket_id: TicketId) -> Result<Vec<Comment>, AppError> {
    Ok(repository::list_by_ticket(db, ticket_id).await?)
}

pub async fn delete(
    db: &DatabaseConnection,
    ticket_id: TicketId,
    comment_id: CommentId,
) -> Result<(), AppError> {
    let deleted = repository::delete_for_ticket(db, ticket_id, comment_id).await?;
    if !deleted {
        return Err(AppError::not_found::<Comment>());
    }
    tracing::info!("Deleted comment {} of ticket {}", comment_id, ticket_id);
    Ok(())
}
