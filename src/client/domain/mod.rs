//! Domain model for client accounts.

mod client;
mod error;

pub use client::{Client, ClientId, ClientStatus, PersistedClientData};
pub use error::{ClientDomainError, ParseClientStatusError};
