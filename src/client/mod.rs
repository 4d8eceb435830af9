//! Client account management.
//!
//! Clients file tickets against the support desk. This module owns the
//! client aggregate, its three-state status machine (active, inactive,
//! suspended), the directory service that registers accounts and applies
//! validated status changes, and the removal guard that forbids deleting an
//! active client. The module follows hexagonal architecture:
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
