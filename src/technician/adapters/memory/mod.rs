//! In-memory adapters for technician ports.

mod technician;

pub use technician::InMemoryTechnicianRepository;
