//! In-memory adapters for client ports.

mod client;

pub use client::InMemoryClientRepository;
