//! Technician directory and availability management.
//!
//! Technicians take ticket assignments and hold appointments. This module
//! owns the technician aggregate, its five-state status machine (only
//! active technicians may receive work; terminated is terminal), the
//! qualification skill set matched against ticket categories, and the
//! directory service whose removal rule requires a terminated technician
//! with zero open tickets. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
