//! Adapter implementations of the appointment ports.

pub mod memory;
