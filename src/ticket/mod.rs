//! Ticket lifecycle management.
//!
//! Tickets are the unit of work a client files against the support desk.
//! This module owns the ticket aggregate and its two-state status machine,
//! the SLA due timestamp fixed at creation, technician assignment and
//! unassignment, the least-loaded-qualified assignment selector, and the
//! append-only audit trail that records every ticket-affecting change. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
