//! In-memory adapters for ticket ports.

mod history;
mod ticket;

pub use history::InMemoryTicketHistoryRepository;
pub use ticket::InMemoryTicketRepository;
