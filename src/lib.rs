//! Opsdesk: tech-support operations core.
//!
//! This crate provides the scheduling and assignment core of a tech-support
//! backend: clients file tickets, tickets are assigned to technicians,
//! technicians hold appointments against tickets, and every ticket-affecting
//! change lands in an append-only audit trail.
//!
//! # Architecture
//!
//! Opsdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`category`]: Service categories and SLA due-date offsets
//! - [`contact`]: Contact scalars shared by the directories
//! - [`client`]: Client accounts and their status lifecycle
//! - [`technician`]: Technician directory, skills, and status lifecycle
//! - [`ticket`]: Ticket lifecycle, assignment selection, and audit trail
//! - [`appointment`]: Appointment scheduling and interval conflict detection

pub mod appointment;
pub mod category;
pub mod client;
pub mod contact;
pub mod technician;
pub mod ticket;
