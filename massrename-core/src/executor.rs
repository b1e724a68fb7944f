use crate::planner::{same_entry, Decision, RenameOperation, RenamePlan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Why an operation was skipped without touching the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyName,
    InvalidChars,
    Conflict,
}

impl SkipReason {
    pub fn from_decision(decision: Decision) -> Option<Self> {
        match decision {
            Decision::SkippedEmptyName => Some(Self::EmptyName),
            Decision::SkippedInvalidChars => Some(Self::InvalidChars),
            Decision::SkippedConflict => Some(Self::Conflict),
            Decision::Accepted | Decision::SkippedNoOp => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Status {
    Renamed,
    /// The file already had the target name; counted as renamed
    Unchanged,
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub operation: RenameOperation,
    pub status: Status,
}

impl RenameOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, Status::Failed(_))
    }
}

/// The atomic rename primitive used by the executor.
pub trait Renamer {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Renames on the local file system without ever replacing an existing entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRenamer;

impl Renamer for FsRenamer {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if is_case_only_change(from, to) && same_entry(from, to) {
            return rename_via_temp(from, to);
        }
        rename_no_replace(from, to)
    }
}

fn is_case_only_change(from: &Path, to: &Path) -> bool {
    from != to && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let from_c = CString::new(from.as_os_str().as_bytes())?;
    let to_c = CString::new(to.as_os_str().as_bytes())?;

    let ret = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            from_c.as_ptr(),
            libc::AT_FDCWD,
            to_c.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if ret == 0 {
        return Ok(());
    }

    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        // File system or kernel without RENAME_NOREPLACE
        Some(libc::EINVAL | libc::ENOSYS) => rename_checked(from, to),
        _ => Err(err),
    }
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    rename_checked(from, to)
}

fn rename_checked(from: &Path, to: &Path) -> io::Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }
    fs::rename(from, to)
}

/// Two-step rename for case-only changes on case-insensitive file systems.
fn rename_via_temp(from: &Path, to: &Path) -> io::Result<()> {
    let file_name = from
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = from.with_file_name(format!(
        ".{}.{}.massrename.tmp",
        file_name,
        std::process::id()
    ));

    rename_checked(from, &temp)?;
    finish_from_temp(&temp, from, to, |a, b| fs::rename(a, b))
}

/// Second step of [`rename_via_temp`]. On failure the file is moved back to
/// `from`; if that fails too, both errors and the temporary name are reported.
fn finish_from_temp<F>(temp: &Path, from: &Path, to: &Path, rename: F) -> io::Result<()>
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    let Err(e) = rename(temp, to) else {
        return Ok(());
    };

    match rename(temp, from) {
        Ok(()) => Err(e),
        Err(restore) => Err(io::Error::new(
            e.kind(),
            format!(
                "{e}; moving it back to {} also failed ({restore}), the file is now {}",
                from.display(),
                temp.display()
            ),
        )),
    }
}

/// Callback receiving the first failed outcome of a run.
pub type FailureHook<'a> = Box<dyn FnMut(&RenameOutcome) + 'a>;

#[derive(Default)]
pub struct ExecuteOptions<'a> {
    /// Report what would happen without renaming anything
    pub dry_run: bool,
    /// Called once, for the first failure only
    pub on_first_failure: Option<FailureHook<'a>>,
}

/// Apply `plan` in index order, one rename at a time.
///
/// A failed rename is recorded and the run continues with the next item.
pub fn execute_plan(
    plan: &RenamePlan,
    renamer: &dyn Renamer,
    options: &mut ExecuteOptions<'_>,
) -> Vec<RenameOutcome> {
    let mut outcomes = Vec::with_capacity(plan.operations.len());
    let mut first_failure_seen = false;

    for operation in &plan.operations {
        let status = if let Some(reason) = SkipReason::from_decision(operation.decision) {
            Status::Skipped(reason)
        } else if operation.decision == Decision::SkippedNoOp {
            Status::Unchanged
        } else if let Some(target) = &operation.target_path {
            apply_one(operation, target, renamer, options.dry_run)
        } else {
            Status::Failed("no target path was planned".to_string())
        };

        let outcome = RenameOutcome {
            operation: operation.clone(),
            status,
        };

        if outcome.is_failure() && !first_failure_seen {
            first_failure_seen = true;
            if let Some(hook) = options.on_first_failure.as_mut() {
                hook(&outcome);
            }
        }

        outcomes.push(outcome);
    }

    outcomes
}

fn apply_one(
    operation: &RenameOperation,
    target: &Path,
    renamer: &dyn Renamer,
    dry_run: bool,
) -> Status {
    let from = &operation.source.path;

    if dry_run {
        tracing::info!(
            from = %from.display(),
            to = %target.display(),
            "would rename"
        );
        return Status::Renamed;
    }

    match renamer.rename(from, target) {
        Ok(()) => {
            tracing::info!(
                from = %operation.source.name,
                to = %operation.target_name,
                "renamed"
            );
            Status::Renamed
        },
        Err(e) => {
            tracing::warn!(
                from = %operation.source.name,
                to = %operation.target_name,
                error = %e,
                "rename failed"
            );
            Status::Failed(e.to_string())
        },
    }
}
