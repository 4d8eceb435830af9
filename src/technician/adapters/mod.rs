//! Adapter implementations of the technician ports.

pub mod memory;
