//! Domain model for the technician directory.

mod error;
mod technician;

pub use error::{ParseTechnicianStatusError, TechnicianDomainError};
pub use technician::{PersistedTechnicianData, Technician, TechnicianId, TechnicianStatus};
