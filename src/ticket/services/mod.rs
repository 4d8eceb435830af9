//! Application services for ticket lifecycle orchestration.

mod assignment;
mod lifecycle;

pub use assignment::{AssignmentError, AssignmentResult, AssignmentSelector};
pub use lifecycle::{
    CreateTicketRequest, TicketLifecycleError, TicketLifecycleResult, TicketLifecycleService,
};
