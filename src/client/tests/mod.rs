//! Unit tests for the client module.
