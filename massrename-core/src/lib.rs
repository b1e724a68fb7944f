#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod executor;
pub mod lister;
pub mod natural_sort;
pub mod operations;
pub mod output;
pub mod planner;
pub mod preview;
pub mod report;
pub mod source;

pub use config::Config;
pub use error::{RenameError, Result};
pub use executor::{
    execute_plan, ExecuteOptions, FailureHook, FsRenamer, RenameOutcome, Renamer, SkipReason,
    Status,
};
pub use lister::{list_files, FileEntry};
pub use natural_sort::{natural_cmp, NaturalSortKey};
pub use operations::{execute_operation, plan_operation, rename_operation, RenameRun};
pub use output::{OutputFormat, OutputFormatter, VersionResult};
pub use planner::{
    plan_renames, CountMismatch, Decision, RenameOperation, RenamePlan, RESERVED_CHARS,
};
pub use preview::{render_plan, should_use_color, Preview};
pub use report::{FailureDetail, RenameCounts, RenameReport};
pub use source::{
    open_source, JsonSource, LineSource, ListSource, NameSource, SpreadsheetSource,
};
