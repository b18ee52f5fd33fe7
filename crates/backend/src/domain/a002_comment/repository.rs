use contracts::domain::a001_ticket::aggregate::TicketId;
use contracts::domain::a002_comment::aggregate::{Comment, CommentId};
use contracts::domain::common::AggregateId;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;

use sea_orm::{QueryOrder, Set};

use crate::domain::a001_ticket;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub ticket_id: String,
    pub author: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "a001_ticket::repository::Entity",
        from = "Column::TicketId",
        to = "a001_ticket::repository::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Ticket,
}

impl Related<a001_ticket::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Comment {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        Ok(Comment {
            id: CommentId::from_string(&m.id).map_err(|e| anyhow::anyhow!(e))?,
            ticket_id: TicketId::from_string(&m.ticket_id).map_err(|e| anyhow::anyhow!(e))?,
            author: m.author,
            content: m.content,
            created_at: m.created_at,
        })
    }
}

/// Comments of one ticket, oldest first
pub async fn list_by_ticket<C: ConnectionTrait>(
    db: &C,
    ticket_id: TicketId,
) -> anyhow::Result<Vec<Comment>> {
    Entity::find()
        .filter(Column::TicketId.eq(ticket_id.as_string()))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Comment::try_from)
        .collect()
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: CommentId,
) -> anyhow::Result<Option<Comment>> {
    let result = Entity::find_by_id(id.as_string()).one(db).await?;
    result.map(Comment::try_from).transpose()
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Comment) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        ticket_id: Set(aggregate.ticket_id.as_string()),
        author: Set(aggregate.author.clone()),
        content: Set(aggregate.content.clone()),
        created_at: Set(aggregate.created_at),
    };
    active.insert(db).await?;
    Ok(())
}

/// Delete a comment only if it belongs to `ticket_id`.
pub async fn delete_for_ticket<C: ConnectionTrait>(
    db: &C,
    ticket_id: TicketId,
    id: CommentId,
) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::Id.eq(id.as_string()))
        .filter(Column::TicketId.eq(ticket_id.as_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Remove every comment of a ticket; returns the number removed.
pub async fn delete_by_ticket<C: ConnectionTrait>(
    db: &C,
    ticket_id: TicketId,
) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::TicketId.eq(ticket_id.as_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
