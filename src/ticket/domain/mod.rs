//! Domain model for ticket lifecycle management.
//!
//! The ticket domain models client-filed support requests, their due
//! timestamps, technician assignment, and the immutable history entries the
//! audit trail is built from, while keeping infrastructure concerns outside
//! the domain boundary.

mod error;
mod history;
mod ids;
mod ticket;

pub use error::{ParseTicketStatusError, TicketDomainError};
pub use history::TicketHistoryEntry;
pub use ids::{Actor, HistoryEntryId, TicketId};
pub use ticket::{PersistedTicketData, Ticket, TicketStatus};
