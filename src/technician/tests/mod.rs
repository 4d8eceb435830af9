//! Unit tests for the technician module.
