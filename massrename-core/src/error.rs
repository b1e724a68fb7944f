//! Fatal errors of a renaming run.
//!
//! Everything here is raised before the first rename is attempted. Failures of
//! individual renames are recorded as [`crate::Status::Failed`] instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = RenameError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RenameError {
    /// The target directory does not exist or is not a directory.
    #[error("folder not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The target directory exists but could not be enumerated.
    #[error("failed to list files in folder {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The name source has no rows, or no first column.
    #[error("name source {source_name} is empty or has no columns")]
    SourceEmpty { source_name: String },

    /// The name source could not be read or parsed.
    #[error("failed to read name source {source_name}: {reason}")]
    SourceUnreadable { source_name: String, reason: String },

    /// The configuration file could not be read or parsed.
    #[error("invalid config file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl RenameError {
    /// True for errors caused by the inputs of a run (directory or name
    /// source), as opposed to the tool's own configuration.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Config { .. })
    }

    pub(crate) fn unreadable_source(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnreadable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
