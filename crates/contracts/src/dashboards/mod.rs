pub mod d100_ticket_metrics;
