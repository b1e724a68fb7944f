use crate::lister::FileEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Characters that are refused in a target name.
pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// What the planner decided for one file/name pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    /// The name is empty or whitespace only
    SkippedEmptyName,
    /// The name contains one of [`RESERVED_CHARS`]
    SkippedInvalidChars,
    /// The file already has this name
    SkippedNoOp,
    /// Something already exists at the target path
    SkippedConflict,
}

impl Decision {
    pub fn label(self) -> &'static str {
        match self {
            Self::Accepted => "rename",
            Self::SkippedEmptyName => "skip: empty name",
            Self::SkippedInvalidChars => "skip: invalid characters",
            Self::SkippedNoOp => "unchanged",
            Self::SkippedConflict => "skip: target exists",
        }
    }
}

/// One planned pairing of an existing file with a candidate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    /// Position in both the sorted file list and the name list
    pub index: usize,
    pub source: FileEntry,
    /// Candidate name with surrounding whitespace removed
    pub target_name: String,
    /// Target path, absent when the name failed validation
    pub target_path: Option<PathBuf>,
    pub decision: Decision,
}

/// The file and name counts of a plan whose inputs had different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    pub files: usize,
    pub names: usize,
}

/// Ordered decisions for one directory, computed before anything is renamed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub operations: Vec<RenameOperation>,
    pub files_found: usize,
    pub names_found: usize,
}

impl RenamePlan {
    pub fn count_mismatch(&self) -> Option<CountMismatch> {
        (self.files_found != self.names_found).then_some(CountMismatch {
            files: self.files_found,
            names: self.names_found,
        })
    }

    pub fn accepted(&self) -> impl Iterator<Item = &RenameOperation> {
        self.operations
            .iter()
            .filter(|op| op.decision == Decision::Accepted)
    }

    pub fn count(&self, decision: Decision) -> usize {
        self.operations
            .iter()
            .filter(|op| op.decision == decision)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Pair `files` (already in natural order) with `names` (in source order).
///
/// Only reads the file system. Conflict checks take the earlier accepted
/// operations of the same plan into account: a path vacated by an earlier
/// rename is free, a path claimed by an earlier rename is taken.
pub fn plan_renames(directory: &Path, files: &[FileEntry], names: &[String]) -> RenamePlan {
    let mut vacated: HashSet<PathBuf> = HashSet::new();
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut operations = Vec::with_capacity(files.len().min(names.len()));

    for (index, (source, raw_name)) in files.iter().zip(names).enumerate() {
        let target_name = raw_name.trim().to_string();
        let row = index + 1;

        let (decision, target_path) = if target_name.is_empty() {
            tracing::warn!(row, file = %source.name, "skipping empty new name");
            (Decision::SkippedEmptyName, None)
        } else if target_name.contains(RESERVED_CHARS) {
            tracing::warn!(
                row,
                file = %source.name,
                name = %target_name,
                "skipping new name with forbidden characters"
            );
            (Decision::SkippedInvalidChars, None)
        } else {
            let target_path = directory.join(&target_name);
            let target = normalize_path(&target_path);
            let from = normalize_path(&source.path);

            let decision = if target == from {
                Decision::SkippedNoOp
            } else if claimed.contains(&target)
                || (entry_exists(&target)
                    && !vacated.contains(&target)
                    && !is_case_only_rename(source, &target_name, &target))
            {
                tracing::warn!(
                    row,
                    file = %source.name,
                    name = %target_name,
                    "skipping rename, target already exists"
                );
                Decision::SkippedConflict
            } else {
                vacated.insert(from);
                claimed.insert(target);
                Decision::Accepted
            };
            (decision, Some(target_path))
        };

        operations.push(RenameOperation {
            index,
            source: source.clone(),
            target_name,
            target_path,
            decision,
        });
    }

    if files.len() != names.len() {
        tracing::warn!(
            files = files.len(),
            names = names.len(),
            "number of files and names differ, only matching pairs are planned"
        );
    }
    tracing::debug!(
        dir = %directory.display(),
        planned = operations.len(),
        "planned renames"
    );

    RenamePlan {
        directory: directory.to_path_buf(),
        operations,
        files_found: files.len(),
        names_found: names.len(),
    }
}

/// Lexically resolve `.` and `..` without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Existence without following a final symlink, so dangling links count.
fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// A name that only changes letter case, on a file system where the
/// existing entry at the target is the source file itself.
fn is_case_only_rename(source: &FileEntry, target_name: &str, target: &Path) -> bool {
    source.name != target_name
        && source.name.to_lowercase() == target_name.to_lowercase()
        && same_entry(&source.path, target)
}

#[cfg(unix)]
pub(crate) fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
pub(crate) fn same_entry(a: &Path, b: &Path) -> bool {
    // Names differing only by case resolve to the same entry here
    fs::symlink_metadata(a).is_ok()
        && fs::symlink_metadata(b).is_ok()
        && a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lister::list_files;
    use tempfile::TempDir;

    fn setup(files: &[&str]) -> (TempDir, Vec<FileEntry>) {
        let temp_dir = TempDir::new().unwrap();
        for name in files {
            fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }
        let entries = list_files(temp_dir.path()).unwrap();
        (temp_dir, entries)
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn decisions(plan: &RenamePlan) -> Vec<Decision> {
        plan.operations.iter().map(|op| op.decision).collect()
    }

    #[test]
    fn test_pairs_by_index() {
        let (temp_dir, files) = setup(&["img2.png", "img10.png", "img1.png"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["Alpha", "Beta", "Gamma"]));

        let pairs: Vec<(&str, &str)> = plan
            .operations
            .iter()
            .map(|op| (op.source.name.as_str(), op.target_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("img1.png", "Alpha"), ("img2.png", "Beta"), ("img10.png", "Gamma")]
        );
        assert!(plan.operations.iter().enumerate().all(|(i, op)| op.index == i));
        assert_eq!(decisions(&plan), vec![Decision::Accepted; 3]);
        assert_eq!(plan.count_mismatch(), None);
    }

    #[test]
    fn test_whitespace_only_name_is_empty() {
        let (temp_dir, files) = setup(&["a.txt", "b.txt"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["  ", ""]));
        assert_eq!(
            decisions(&plan),
            vec![Decision::SkippedEmptyName, Decision::SkippedEmptyName]
        );
        assert_eq!(plan.operations[0].target_path, None);
    }

    #[test]
    fn test_reserved_characters_are_invalid() {
        for c in RESERVED_CHARS {
            let (temp_dir, files) = setup(&["a.txt"]);
            let name = format!("bad{c}name");
            let plan = plan_renames(temp_dir.path(), &files, &[name]);
            assert_eq!(decisions(&plan), vec![Decision::SkippedInvalidChars], "char {c:?}");
        }

        let (temp_dir, files) = setup(&["a.txt"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["a/b"]));
        assert_eq!(decisions(&plan), vec![Decision::SkippedInvalidChars]);
    }

    #[test]
    fn test_name_is_trimmed() {
        let (temp_dir, files) = setup(&["a.txt"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["  new.txt \t"]));
        assert_eq!(plan.operations[0].target_name, "new.txt");
        assert_eq!(
            plan.operations[0].target_path,
            Some(temp_dir.path().join("new.txt"))
        );
        assert_eq!(decisions(&plan), vec![Decision::Accepted]);
    }

    #[test]
    fn test_same_name_is_noop() {
        let (temp_dir, files) = setup(&["keep.txt"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&[" keep.txt "]));
        assert_eq!(decisions(&plan), vec![Decision::SkippedNoOp]);
    }

    #[test]
    fn test_existing_target_is_conflict() {
        let (temp_dir, files) = setup(&["a.txt", "taken.txt"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["taken.txt"]));
        assert_eq!(decisions(&plan), vec![Decision::SkippedConflict]);
    }

    #[test]
    fn test_existing_directory_is_conflict() {
        let (temp_dir, files) = setup(&["a.txt"]);
        fs::create_dir(temp_dir.path().join("folder")).unwrap();
        let plan = plan_renames(temp_dir.path(), &files, &names(&["folder"]));
        assert_eq!(decisions(&plan), vec![Decision::SkippedConflict]);
    }

    #[test]
    fn test_dot_names_conflict() {
        let (temp_dir, files) = setup(&["a.txt", "b.txt"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&[".", ".."]));
        assert_eq!(
            decisions(&plan),
            vec![Decision::SkippedConflict, Decision::SkippedConflict]
        );
    }

    #[test]
    fn test_duplicate_names_conflict_after_first() {
        let (temp_dir, files) = setup(&["a", "b", "c"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["x", "x", "y"]));
        assert_eq!(
            decisions(&plan),
            vec![Decision::Accepted, Decision::SkippedConflict, Decision::Accepted]
        );
    }

    #[test]
    fn test_name_of_later_file_conflicts() {
        let (temp_dir, files) = setup(&["a", "b"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["b", "c"]));
        assert_eq!(
            decisions(&plan),
            vec![Decision::SkippedConflict, Decision::Accepted]
        );
    }

    #[test]
    fn test_name_vacated_by_earlier_rename_is_free() {
        let (temp_dir, files) = setup(&["a", "b"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["x", "a"]));
        assert_eq!(decisions(&plan), vec![Decision::Accepted, Decision::Accepted]);
    }

    #[test]
    fn test_skipped_rename_does_not_vacate() {
        let (temp_dir, files) = setup(&["a", "b"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["  ", "a"]));
        assert_eq!(
            decisions(&plan),
            vec![Decision::SkippedEmptyName, Decision::SkippedConflict]
        );
    }

    #[test]
    fn test_more_files_than_names() {
        let (temp_dir, files) = setup(&["f1", "f2", "f3", "f4", "f5"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["a", "b", "c"]));
        assert_eq!(plan.operations.len(), 3);
        assert_eq!(plan.count_mismatch(), Some(CountMismatch { files: 5, names: 3 }));
        assert_eq!(plan.operations[2].source.name, "f3");
    }

    #[test]
    fn test_more_names_than_files() {
        let (temp_dir, files) = setup(&["f1"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["a", "b", "c"]));
        assert_eq!(plan.operations.len(), 1);
        assert_eq!(plan.count_mismatch(), Some(CountMismatch { files: 1, names: 3 }));
    }

    #[test]
    fn test_planning_does_not_touch_files() {
        let (temp_dir, files) = setup(&["a", "b"]);
        let before = list_files(temp_dir.path()).unwrap();
        let plan = plan_renames(temp_dir.path(), &files, &names(&["x", "y"]));
        assert_eq!(plan.accepted().count(), 2);
        assert_eq!(list_files(temp_dir.path()).unwrap(), before);
    }

    #[test]
    fn test_case_change_of_same_file_is_accepted() {
        let (temp_dir, files) = setup(&["photo.jpg"]);
        let plan = plan_renames(temp_dir.path(), &files, &names(&["PHOTO.jpg"]));
        assert_eq!(decisions(&plan), vec![Decision::Accepted]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_target_is_conflict() {
        let (temp_dir, files) = setup(&["a"]);
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), temp_dir.path().join("link"))
            .unwrap();
        let plan = plan_renames(temp_dir.path(), &files, &names(&["link"]));
        assert_eq!(decisions(&plan), vec![Decision::SkippedConflict]);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::new());
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize_path(Path::new("/a/b/.")), PathBuf::from("/a/b"));
    }
}
