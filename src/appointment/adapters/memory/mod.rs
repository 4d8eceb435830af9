//! In-memory adapters for appointment ports.

mod appointment;

pub use appointment::InMemoryAppointmentRepository;
