//! Unit tests for the ticket module.

mod assignment_selector_tests;
mod lifecycle_service_tests;
