//! Application services for client account management.

mod directory;

pub use directory::{ClientDirectoryError, ClientDirectoryResult, ClientDirectoryService};
