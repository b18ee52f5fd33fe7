pub mod priority;
pub mod ticket_status;

pub use priority::Priority;
pub use ticket_status::TicketStatus;
