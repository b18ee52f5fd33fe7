pub mod a001_ticket;
pub mod a002_comment;
pub mod common;
