//! Port contracts for ticket lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by ticket services.

pub mod history;
pub mod repository;

pub use history::{TicketHistoryRepository, TicketHistoryRepositoryError, TicketHistoryResult};
pub use repository::{TicketRepository, TicketRepositoryError, TicketRepositoryResult};
