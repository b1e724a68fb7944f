use crate::error::Result;
use crate::lister::list_files;
use crate::planner::{plan_renames, RenamePlan};
use crate::source::NameSource;
use std::path::Path;

/// Plan operation - reads the names, lists the folder and builds the plan
///
/// Nothing on disk is modified. Names are read before the folder is listed so
/// a bad name source fails without touching the directory at all.
pub fn plan_operation(directory: &Path, source: &mut dyn NameSource) -> Result<RenamePlan> {
    let names = source.read_names()?;
    tracing::debug!(source = %source.describe(), names = names.len(), "read names");

    let files = list_files(directory)?;
    Ok(plan_renames(directory, &files, &names))
}
