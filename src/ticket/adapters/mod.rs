//! Adapter implementations of the ticket ports.

pub mod memory;
