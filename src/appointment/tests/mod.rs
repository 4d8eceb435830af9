//! Unit tests for the appointment module.
