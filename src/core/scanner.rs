//! Directory selection: turns a directory on disk into `FileHandle`s, the way
//! a directory picker would hand them over.

use super::error::CoreError;
use super::{build_globset_from_patterns, FileHandle};
use globset::GlobSet;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Everything a directory pick produces.
#[derive(Debug, Clone)]
pub struct DirectorySelection {
    /// Human-readable label, the directory's own name.
    pub label: String,
    pub root: PathBuf,
    /// Every regular file found, ordered by relative path.
    pub files: Vec<FileHandle>,
}

pub struct DirectoryScanner {
    ignore_patterns: HashSet<String>,
}

impl DirectoryScanner {
    pub fn new(ignore_patterns: HashSet<String>) -> Self {
        Self { ignore_patterns }
    }

    /// Walks `root` on the blocking pool.
    ///
    /// Hidden files and `.gitignore` rules are not special: a picker hands
    /// over everything, so only the configured ignore patterns prune.
    pub async fn select_directory(&self, root: &Path) -> Result<DirectorySelection, CoreError> {
        if !root.is_dir() {
            return Err(CoreError::NotADirectory(root.to_path_buf()));
        }

        let root = root.to_path_buf();
        let ignore_glob_set = build_globset_from_patterns(&self.ignore_patterns);
        let selection =
            tokio::task::spawn_blocking(move || Self::walk(root, &ignore_glob_set)).await?;

        tracing::info!(
            "Selected directory {:?}: {} files",
            selection.label,
            selection.files.len()
        );
        Ok(selection)
    }

    fn walk(root: PathBuf, ignore_glob_set: &GlobSet) -> DirectorySelection {
        let label = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", root, e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&root).unwrap_or(path);
            if ignore_glob_set.is_match(relative) {
                continue;
            }

            if let Some(handle) = Self::read_handle(&label, relative, path) {
                files.push(handle);
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        DirectorySelection { label, root, files }
    }

    /// A file that vanished or became unreadable after the walk saw it is
    /// left out of the selection.
    fn read_handle(label: &str, relative: &Path, path: &Path) -> Option<FileHandle> {
        match std::fs::metadata(path) {
            Ok(metadata) => Some(Self::to_handle(label, relative, path, metadata.len())),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                None
            }
        }
    }

    fn to_handle(label: &str, relative: &Path, path: &Path, byte_length: u64) -> FileHandle {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = Path::new(label)
            .join(relative)
            .to_string_lossy()
            .replace('\\', "/");
        let declared_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        FileHandle::new(name, relative_path, declared_type, byte_length, path)
    }
}
