//! Port contracts for the technician directory.

pub mod repository;
pub mod workload;

pub use repository::{TechnicianRepository, TechnicianRepositoryError, TechnicianRepositoryResult};
pub use workload::{OpenTicketCounter, WorkloadQueryError, WorkloadQueryResult};
