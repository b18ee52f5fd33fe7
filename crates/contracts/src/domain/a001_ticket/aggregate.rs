use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::validation::{check_max_len, check_required_text};
use crate::domain::common::{nullable, AggregateId, AggregateRoot, FieldError};
use crate::enums::{Priority, TicketStatus};

pub const TITLE_MAX_LEN: usize = 255;
pub const ASSIGNEE_MAX_LEN: usize = 100;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub Uuid);

impl TicketId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for TicketId {
    fn as_string(&self) -> String {
        AggregateId::as_string(&self.0)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        <Uuid as AggregateId>::from_string(s).map(TicketId::new)
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A trackable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Priority,
    pub status: TicketStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Derived from `status`, see [`Ticket::before_write`]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Build a new ticket from a validated create request.
    ///
    /// The status rule is not applied on insert, so a ticket created as
    /// DONE starts with `closed_at` unset.
    pub fn new_for_insert(dto: TicketDto, now: DateTime<Utc>) -> Self {
        Self {
            id: TicketId::new_v4(),
            title: dto.title.unwrap_or_default(),
            description: dto.description,
            assignee: dto.assignee,
            priority: dto.priority,
            status: dto.status,
            due_date: dto.due_date,
            created_at: now,
            closed_at: None,
        }
    }

    /// Merge a validated patch over the current state, field by field.
    pub fn apply_patch(&mut self, patch: TicketPatch) {
        if let Some(Some(title)) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(Some(priority)) = patch.priority {
            self.priority = priority;
        }
        if let Some(Some(status)) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }

    /// Hook run before every persisted update: couples `closed_at` to `status`.
    ///
    /// DONE with no `closed_at` gets stamped with `now`; any other status
    /// clears it.
    pub fn before_write(&mut self, now: DateTime<Utc>) {
        if self.status.is_done() {
            if self.closed_at.is_none() {
                self.closed_at = Some(now);
            }
        } else {
            self.closed_at = None;
        }
    }

    /// `closed_at - created_at`, once the ticket has been closed
    pub fn time_to_close(&self) -> Option<chrono::Duration> {
        self.closed_at.map(|closed| closed - self.created_at)
    }
}

impl AggregateRoot for Ticket {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "ticket"
    }

    fn element_name() -> &'static str {
        "Ticket"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketDto {
    /// Optional here so a missing title is reported by `validate`
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TicketDto {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_required_text(&mut errors, "title", self.title.as_deref(), TITLE_MAX_LEN);
        if let Some(assignee) = &self.assignee {
            check_max_len(&mut errors, "assignee", assignee, ASSIGNEE_MAX_LEN);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Partial update request; absent keys leave the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPatch {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub assignee: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub status: Option<Option<TicketStatus>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TicketPatch {
    /// Checks every present field; explicit null is only allowed on nullable columns.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        match &self.title {
            None => {}
            Some(None) => errors.push(FieldError::new("title", "must not be null")),
            Some(Some(title)) => {
                check_required_text(&mut errors, "title", Some(title), TITLE_MAX_LEN)
            }
        }
        if let Some(Some(assignee)) = &self.assignee {
            check_max_len(&mut errors, "assignee", assignee, ASSIGNEE_MAX_LEN);
        }
        if let Some(None) = self.priority {
            errors.push(FieldError::new("priority", "must not be null"));
        }
        if let Some(None) = self.status {
            errors.push(FieldError::new("status", "must not be null"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Query filters for the ticket list; all present filters must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFilter {
    pub assignee: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
}

impl TicketFilter {
    /// An empty assignee string filters nothing
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref().filter(|a| !a.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(status: TicketStatus) -> Ticket {
        let dto = TicketDto {
            title: Some("Fix login".into()),
            status,
            ..Default::default()
        };
        Ticket::new_for_insert(dto, Utc::now())
    }

    #[test]
    fn test_create_defaults() {
        let dto: TicketDto = serde_json::from_str(r#"{"title": "Test ticket"}"#).unwrap();
        assert!(dto.validate().is_ok());
        let ticket = Ticket::new_for_insert(dto, Utc::now());
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.status, TicketStatus::Todo);
        assert!(ticket.closed_at.is_none());
    }

    #[test]
    fn test_create_done_leaves_closed_at_unset() {
        let ticket = sample(TicketStatus::Done);
        assert!(ticket.closed_at.is_none());
    }

    #[test]
    fn test_create_validation_lists_fields() {
        let dto = TicketDto {
            title: None,
            assignee: Some("x".repeat(ASSIGNEE_MAX_LEN + 1)),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "assignee"]);
    }

    #[test]
    fn test_title_length_limit() {
        let ok = TicketDto {
            title: Some("t".repeat(TITLE_MAX_LEN)),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
        let too_long = TicketDto {
            title: Some("t".repeat(TITLE_MAX_LEN + 1)),
            ..Default::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_before_write_sets_closed_at_on_done() {
        let mut ticket = sample(TicketStatus::InProgress);
        let now = Utc::now();
        ticket.status = TicketStatus::Done;
        ticket.before_write(now);
        assert_eq!(ticket.closed_at, Some(now));
    }

    #[test]
    fn test_before_write_keeps_existing_closed_at() {
        let mut ticket = sample(TicketStatus::Done);
        let first = Utc::now() - Duration::hours(2);
        ticket.before_write(first);
        ticket.title = "Renamed".into();
        ticket.before_write(Utc::now());
        assert_eq!(ticket.closed_at, Some(first));
    }

    #[test]
    fn test_before_write_clears_closed_at_when_reopened() {
        let mut ticket = sample(TicketStatus::Done);
        ticket.before_write(Utc::now());
        ticket.status = TicketStatus::Todo;
        ticket.before_write(Utc::now());
        assert!(ticket.closed_at.is_none());
    }

    #[test]
    fn test_time_to_close() {
        let mut ticket = sample(TicketStatus::Todo);
        assert_eq!(ticket.time_to_close(), None);
        ticket.status = TicketStatus::Done;
        ticket.before_write(ticket.created_at + Duration::hours(3));
        assert_eq!(ticket.time_to_close(), Some(Duration::hours(3)));
    }

    #[test]
    fn test_id_text_round_trip() {
        let id = TicketId::new_v4();
        assert_eq!(TicketId::from_string(&id.as_string()), Ok(id));
        assert!(TicketId::from_string("42").is_err());
    }

    #[test]
    fn test_patch_absent_fields_untouched() {
        let mut ticket = sample(TicketStatus::Todo);
        ticket.assignee = Some("Alice".into());
        let patch: TicketPatch = serde_json::from_str(r#"{"title": "New title"}"#).unwrap();
        assert!(patch.validate().is_ok());
        ticket.apply_patch(patch);
        assert_eq!(ticket.title, "New title");
        assert_eq!(ticket.assignee.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_patch_null_clears_nullable_fields() {
        let mut ticket = sample(TicketStatus::Todo);
        ticket.assignee = Some("Alice".into());
        ticket.due_date = NaiveDate::from_ymd_opt(2025, 12, 31);
        let patch: TicketPatch =
            serde_json::from_str(r#"{"assignee": null, "due_date": null}"#).unwrap();
        assert!(patch.validate().is_ok());
        ticket.apply_patch(patch);
        assert!(ticket.assignee.is_none());
        assert!(ticket.due_date.is_none());
    }

    #[test]
    fn test_patch_null_rejected_on_required_fields() {
        let patch: TicketPatch =
            serde_json::from_str(r#"{"title": null, "status": null, "priority": null}"#).unwrap();
        let errors = patch.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "priority", "status"]);
    }

    #[test]
    fn test_patch_ignores_client_closed_at() {
        let patch: TicketPatch =
            serde_json::from_str(r#"{"closed_at": "2025-01-01T00:00:00Z"}"#).unwrap();
        let mut ticket = sample(TicketStatus::Todo);
        let before = ticket.clone();
        ticket.apply_patch(patch);
        assert_eq!(ticket, before);
    }

    #[test]
    fn test_ticket_wire_format() {
        let mut ticket = sample(TicketStatus::InProgress);
        ticket.due_date = NaiveDate::from_ymd_opt(2025, 12, 31);
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["due_date"], "2025-12-31");
        assert_eq!(json["id"], ticket.id.as_string());
        assert!(json["closed_at"].is_null());
    }

    #[test]
    fn test_filter_empty_assignee_is_ignored() {
        let filter = TicketFilter {
            assignee: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.assignee(), None);
    }

    #[test]
    fn test_table_name() {
        assert_eq!(Ticket::full_name(), "a001_ticket");
    }
}
