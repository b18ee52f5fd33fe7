use serde::{Deserialize, Serialize};

/// Ticket workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TicketStatus {
    /// Stored and wire representation
    pub fn code(&self) -> &'static str {
        match self {
            TicketStatus::Todo => "TODO",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Done => "DONE",
        }
    }

    pub fn all() -> Vec<TicketStatus> {
        vec![TicketStatus::Todo, TicketStatus::InProgress, TicketStatus::Done]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TODO" => Some(TicketStatus::Todo),
            "IN_PROGRESS" => Some(TicketStatus::InProgress),
            "DONE" => Some(TicketStatus::Done),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TicketStatus::Done)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
