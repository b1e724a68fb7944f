use crate::error::{RenameError, Result};
use crate::natural_sort::NaturalSortKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A regular file found directly inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name, lossily converted to UTF-8 for display and ordering
    pub name: String,
    /// Exact path of the file, used for the rename itself
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }
}

/// List the regular files of `dir` (not recursive), in natural order.
///
/// Symlinks count as files when they resolve to a regular file. Links to
/// directories and dangling links are left out.
pub fn list_files(dir: &Path) -> Result<Vec<FileEntry>> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {},
        Ok(_) => {
            return Err(RenameError::DirectoryNotFound {
                path: dir.to_path_buf(),
            })
        },
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Err(RenameError::DirectoryNotFound {
                path: dir.to_path_buf(),
            })
        },
        Err(e) => {
            return Err(RenameError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source: e,
            })
        },
    }

    let mut keyed = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| RenameError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source: io::Error::from(e),
        })?;

        if !is_regular_file(&entry) {
            continue;
        }

        let key = NaturalSortKey::from_os_str(entry.file_name());
        let file = FileEntry {
            name: key.as_str().to_string(),
            path: entry.into_path(),
        };
        keyed.push((key, file));
    }

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    tracing::debug!(dir = %dir.display(), files = keyed.len(), "listed files");

    Ok(keyed.into_iter().map(|(_, file)| file).collect())
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return fs::metadata(entry.path()).is_ok_and(|m| m.is_file());
    }
    false
}
