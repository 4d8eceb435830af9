//! Appointment scheduling and interval conflict detection.
//!
//! Appointments book a technician against a ticket for a half-open time
//! interval. This module owns the validated time slot, the six-state
//! appointment status machine, and the scheduling service whose conflict
//! rule forbids two non-cancelled, non-no-show appointments for one
//! technician from overlapping. The module follows hexagonal architecture:
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
