use chrono::{DateTime, Utc};
use contracts::domain::a001_ticket::aggregate::{Ticket, TicketFilter, TicketId};
use contracts::domain::common::AggregateId;
use contracts::enums::{Priority, TicketStatus};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;

use sea_orm::{ActiveValue, QueryOrder, Set};

use crate::domain::a002_comment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_ticket")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "a002_comment::repository::Entity")]
    Comments,
}

impl Related<a002_comment::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Ticket {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        let id = TicketId::from_string(&m.id).map_err(|e| anyhow::anyhow!(e))?;
        let priority = Priority::from_code(&m.priority).ok_or_else(|| {
            anyhow::anyhow!("Unknown priority '{}' on ticket {}", m.priority, m.id)
        })?;
        let status = TicketStatus::from_code(&m.status)
            .ok_or_else(|| anyhow::anyhow!("Unknown status '{}' on ticket {}", m.status, m.id))?;

        Ok(Ticket {
            id,
            title: m.title,
            description: m.description,
            assignee: m.assignee,
            priority,
            status,
            due_date: m.due_date,
            created_at: m.created_at,
            closed_at: m.closed_at,
        })
    }
}

fn to_active(aggregate: &Ticket) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.as_string()),
        title: Set(aggregate.title.clone()),
        description: Set(aggregate.description.clone()),
        assignee: Set(aggregate.assignee.clone()),
        priority: Set(aggregate.priority.code().to_string()),
        status: Set(aggregate.status.code().to_string()),
        due_date: Set(aggregate.due_date),
        created_at: Set(aggregate.created_at),
        closed_at: Set(aggregate.closed_at),
    }
}

fn into_aggregates(models: Vec<Model>) -> anyhow::Result<Vec<Ticket>> {
    models.into_iter().map(Ticket::try_from).collect()
}

/// Tickets matching every present filter, oldest first
pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &TicketFilter,
) -> anyhow::Result<Vec<Ticket>> {
    let mut query = Entity::find();
    if let Some(assignee) = filter.assignee() {
        query = query.filter(Column::Assignee.eq(assignee));
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status.code()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(Column::Priority.eq(priority.code()));
    }
    let models = query
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    into_aggregates(models)
}

/// Tickets that carry a `closed_at` stamp, whatever their status
pub async fn list_closed<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Ticket>> {
    let models = Entity::find()
        .filter(Column::ClosedAt.is_not_null())
        .all(db)
        .await?;
    into_aggregates(models)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: TicketId) -> anyhow::Result<Option<Ticket>> {
    let result = Entity::find_by_id(id.as_string()).one(db).await?;
    result.map(Ticket::try_from).transpose()
}

pub async fn exists<C: ConnectionTrait>(db: &C, id: TicketId) -> anyhow::Result<bool> {
    let count = Entity::find_by_id(id.as_string()).count(db).await?;
    Ok(count > 0)
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Ticket) -> anyhow::Result<()> {
    to_active(aggregate).insert(db).await?;
    Ok(())
}

/// Write an existing ticket back.
///
/// Every update goes through [`Ticket::before_write`] here, so `closed_at`
/// always agrees with `status` in the stored row.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    aggregate: &mut Ticket,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    aggregate.before_write(now);
    let mut active = to_active(aggregate);
    active.created_at = ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

/// Delete a ticket together with its comments.
///
/// Must run inside the caller's transaction so both deletes commit together.
pub async fn delete<C: ConnectionTrait>(db: &C, id: TicketId) -> anyhow::Result<bool> {
    let removed_comments = a002_comment::repository::delete_by_ticket(db, id).await?;
    let result = Entity::delete_by_id(id.as_string()).exec(db).await?;
    if result.rows_affected > 0 {
        tracing::debug!("Deleted ticket {} and {} comment(s)", id, removed_comments);
    }
    Ok(result.rows_affected > 0)
}
