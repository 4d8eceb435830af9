//! Adapter implementations of the client ports.

pub mod memory;
