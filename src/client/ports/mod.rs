//! Port contracts for client account management.

pub mod repository;

pub use repository::{ClientRepository, ClientRepositoryError, ClientRepositoryResult};
