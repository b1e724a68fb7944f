use crate::error::Result;
use crate::executor::{execute_plan, ExecuteOptions, RenameOutcome, Renamer};
use crate::operations::plan_operation;
use crate::planner::RenamePlan;
use crate::report::RenameReport;
use crate::source::NameSource;
use serde::Serialize;
use std::path::Path;

/// Everything one rename run produced
#[derive(Debug, Clone, Serialize)]
pub struct RenameRun {
    pub plan: RenamePlan,
    pub outcomes: Vec<RenameOutcome>,
    pub report: RenameReport,
}

/// Rename operation - plan, then execute the plan through `renamer`
///
/// Fatal input errors are returned before anything is renamed. Once execution
/// starts, per-file failures end up in the outcomes and the report instead.
pub fn rename_operation(
    directory: &Path,
    source: &mut dyn NameSource,
    renamer: &dyn Renamer,
    options: &mut ExecuteOptions<'_>,
) -> Result<RenameRun> {
    let plan = plan_operation(directory, source)?;
    Ok(execute_operation(plan, renamer, options))
}

/// Execute an already computed plan and summarize the results
pub fn execute_operation(
    plan: RenamePlan,
    renamer: &dyn Renamer,
    options: &mut ExecuteOptions<'_>,
) -> RenameRun {
    let outcomes = execute_plan(&plan, renamer, options);
    let report = RenameReport::from_outcomes(&plan, &outcomes, options.dry_run);

    tracing::debug!(
        renamed = report.counts.renamed,
        skipped = report.counts.skipped(),
        failed = report.counts.failed,
        "rename run finished"
    );

    RenameRun {
        plan,
        outcomes,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{FsRenamer, Status};
    use crate::source::ListSource;
    use std::fs;
    use tempfile::TempDir;

    fn folder(names: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in names {
            fs::write(temp_dir.path().join(name), name).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_renames_files_on_disk() {
        let temp_dir = folder(&["b.txt", "a.txt"]);
        let mut source = ListSource::new(["first.txt", "second.txt"]);

        let run = rename_operation(
            temp_dir.path(),
            &mut source,
            &FsRenamer,
            &mut ExecuteOptions::default(),
        )
        .unwrap();

        assert_eq!(run.report.counts.renamed, 2);
        assert_eq!(fs::read_to_string(temp_dir.path().join("first.txt")).unwrap(), "a.txt");
        assert_eq!(fs::read_to_string(temp_dir.path().join("second.txt")).unwrap(), "b.txt");
        assert!(!temp_dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_dry_run_leaves_folder_untouched() {
        let temp_dir = folder(&["a.txt"]);
        let mut source = ListSource::new(["z.txt"]);
        let mut options = ExecuteOptions {
            dry_run: true,
            ..ExecuteOptions::default()
        };

        let run = rename_operation(temp_dir.path(), &mut source, &FsRenamer, &mut options).unwrap();

        assert!(run.report.dry_run);
        assert_eq!(run.outcomes[0].status, Status::Renamed);
        assert!(temp_dir.path().join("a.txt").exists());
        assert!(!temp_dir.path().join("z.txt").exists());
    }
}
