pub mod a001_ticket;
pub mod a002_comment;
pub mod d100_ticket_metrics;
pub mod health;
