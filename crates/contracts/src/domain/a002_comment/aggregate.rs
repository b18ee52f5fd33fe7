use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_ticket::aggregate::TicketId;
use crate::domain::common::validation::check_required_text;
use crate::domain::common::{AggregateId, AggregateRoot, FieldError};

pub const AUTHOR_MAX_LEN: usize = 100;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for CommentId {
    fn as_string(&self) -> String {
        AggregateId::as_string(&self.0)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        <Uuid as AggregateId>::from_string(s).map(CommentId::new)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Immutable note attached to exactly one ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new_for_insert(ticket_id: TicketId, dto: CommentDto, now: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new_v4(),
            ticket_id,
            author: dto.author.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            created_at: now,
        }
    }
}

impl AggregateRoot for Comment {
    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "comment"
    }

    fn element_name() -> &'static str {
        "Comment"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentDto {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CommentDto {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_required_text(&mut errors, "author", self.author.as_deref(), AUTHOR_MAX_LEN);
        match self.content.as_deref() {
            None => errors.push(FieldError::new("content", "field required")),
            Some(c) if c.trim().is_empty() => {
                errors.push(FieldError::new("content", "content cannot be empty"))
            }
            Some(_) => {}
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
