//! Application services for the technician directory.

mod directory;

pub use directory::{
    RegisterTechnicianRequest, TechnicianDirectoryError, TechnicianDirectoryResult,
    TechnicianDirectoryService,
};
