//! Types shared between the tracker backend and its clients.

pub mod dashboards;
pub mod domain;
pub mod enums;
