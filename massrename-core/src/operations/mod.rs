//! High-level operations that correspond to CLI commands
//!
//! These hold the end-to-end pipeline of each massrename command, separated
//! from CLI concerns like argument parsing and output formatting.

pub mod plan;
pub mod rename;

pub use plan::plan_operation;
pub use rename::{execute_operation, rename_operation, RenameRun};
