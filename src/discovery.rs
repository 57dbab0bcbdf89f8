use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::{err_msg, GenError};

/// Order in which the files of one directory are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileOrder {
    /// Sorted by file name, so repeated runs emit identical harnesses.
    #[default]
    Sorted,
    /// Whatever the directory listing yields.
    Listing,
}

/// Finds candidate source files directly inside a list of directories.
///
/// Directories are visited in the order supplied and are not descended into.
#[derive(Debug, Clone)]
pub struct FileCollector {
    extension: String,
    order: FileOrder,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new("c", FileOrder::default())
    }
}

impl FileCollector {
    pub fn new<S: Into<String>>(extension: S, order: FileOrder) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            order,
        }
    }

    /// Collects candidate files from every directory, in argument order.
    pub fn collect<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<Vec<PathBuf>, GenError> {
        let mut files = Vec::new();
        for dir in dirs {
            files.extend(self.collect_dir(dir.as_ref())?);
        }
        Ok(files)
    }

    /// Lists the candidate files directly inside `dir`.
    pub fn collect_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, GenError> {
        let metadata = std::fs::metadata(dir).map_err(|e| {
            err_msg!(Io, "Failed to open directory '{}': {}", dir.display(), e).caused_by(e)
        })?;
        if !metadata.is_dir() {
            return Err(err_msg!(Io, "'{}' is not a directory", dir.display()));
        }

        let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
        if self.order == FileOrder::Sorted {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                err_msg!(Io, "Failed to list directory '{}': {}", dir.display(), e).caused_by(e)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.is_candidate(path) {
                continue;
            }

            debug!(path = %path.display(), "collected source file");
            files.push(path.to_path_buf());
        }
        Ok(files)
    }

    /// Returns true if the given path carries the configured extension.
    fn is_candidate(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorType;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn collects_only_matching_files_directly_inside() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "b.c");
        let a = touch(dir.path(), "a.c");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "header.h");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "deep.c");
        std::fs::create_dir(dir.path().join("dir.c")).unwrap();

        let files = FileCollector::default().collect(&[dir.path()]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn directories_keep_argument_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let x = touch(first.path(), "x.c");
        let y = touch(second.path(), "y.c");

        let collector = FileCollector::default();
        assert_eq!(
            collector.collect(&[first.path(), second.path()]).unwrap(),
            vec![x.clone(), y.clone()]
        );
        assert_eq!(
            collector.collect(&[second.path(), first.path()]).unwrap(),
            vec![y, x]
        );
    }

    #[test]
    fn listing_order_returns_the_same_set() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.c", "a.c", "b.c"] {
            touch(dir.path(), name);
        }
        let mut files = FileCollector::new("c", FileOrder::Listing)
            .collect(&[dir.path()])
            .unwrap();
        files.sort();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, ["a.c", "b.c", "c.c"]);
    }

    #[test]
    fn custom_extension_accepts_leading_dot() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.c");
        let cc = touch(dir.path(), "b.cc");
        let files = FileCollector::new(".cc", FileOrder::Sorted)
            .collect(&[dir.path()])
            .unwrap();
        assert_eq!(files, vec![cc]);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCollector::default()
            .collect(&[dir.path().join("nope")])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Io);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn file_argument_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = touch(dir.path(), "a.c");
        let err = FileCollector::default().collect(&[file]).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Io);
    }
}
