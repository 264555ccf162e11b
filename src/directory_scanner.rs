// SPDX-License-Identifier: MPL-2.0
//! Expands command-line inputs into the list of candidate files.
//!
//! No extension filtering happens here: every regular file is a candidate and
//! the signature check decides whether it is a JPEG.

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Candidate files for one report run, in alphabetical order per directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileList {
    files: Vec<PathBuf>,
}

impl FileList {
    /// Collects files from `inputs`.
    ///
    /// File inputs are kept as given. Directory inputs are listed, and
    /// descended into when `scan.recursive` is set.
    pub fn collect<P: AsRef<Path>>(inputs: &[P], scan: &ScanConfig) -> Result<Self> {
        let mut files = Vec::new();
        let mut visited = HashSet::new();
        for input in inputs {
            let input = input.as_ref();
            let metadata = fs::metadata(input).map_err(|e| Error::io(input, e))?;
            if metadata.is_dir() {
                scan_directory(input, scan, &mut visited, &mut files)?;
            } else {
                files.push(input.to_path_buf());
            }
        }
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

impl IntoIterator for FileList {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

fn scan_directory(
    directory: &Path,
    scan: &ScanConfig,
    visited: &mut HashSet<PathBuf>,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    let canonical = fs::canonicalize(directory).map_err(|e| Error::io(directory, e))?;
    if !visited.insert(canonical) {
        debug!(path = %directory.display(), "directory already scanned");
        return Ok(());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(directory).map_err(|e| Error::io(directory, e))? {
        let entry = entry.map_err(|e| Error::io(directory, e))?;
        entries.push(entry.path());
    }
    entries.sort();

    for path in entries {
        let link = fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if link.file_type().is_symlink() && !scan.follow_symlinks {
            debug!(path = %path.display(), "skipping symlink");
            continue;
        }
        if path.is_dir() {
            if scan.recursive {
                scan_directory(&path, scan, visited, out)?;
            }
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"\xFF\xD8\xFF\xE0").expect("failed to write file");
        path
    }

    fn recursive() -> ScanConfig {
        ScanConfig {
            recursive: true,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn collect_lists_directory_alphabetically() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let c = create_file(temp_dir.path(), "c.jpg");
        let a = create_file(temp_dir.path(), "a.jpg");
        let b = create_file(temp_dir.path(), "b.txt");

        let list = FileList::collect(&[temp_dir.path()], &ScanConfig::default())
            .expect("scan should succeed");
        let files: Vec<&Path> = list.iter().collect();
        assert_eq!(files, [a.as_path(), b.as_path(), c.as_path()]);
    }

    #[test]
    fn collect_skips_subdirectories_unless_recursive() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let top = create_file(temp_dir.path(), "top.jpg");
        let nested_dir = temp_dir.path().join("nested");
        fs::create_dir(&nested_dir).expect("mkdir");
        let nested = create_file(&nested_dir, "inner.jpg");

        let flat = FileList::collect(&[temp_dir.path()], &ScanConfig::default()).expect("scan");
        assert_eq!(flat.iter().collect::<Vec<_>>(), [top.as_path()]);

        let deep = FileList::collect(&[temp_dir.path()], &recursive()).expect("scan");
        assert_eq!(
            deep.iter().collect::<Vec<_>>(),
            [nested.as_path(), top.as_path()]
        );
    }

    #[test]
    fn file_inputs_are_kept_in_order() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let b = create_file(temp_dir.path(), "b.jpg");
        let a = create_file(temp_dir.path(), "a.jpg");

        let list = FileList::collect(&[&b, &a], &ScanConfig::default()).expect("scan");
        assert_eq!(list.len(), 2);
        assert_eq!(list.into_iter().collect::<Vec<_>>(), [b, a]);
    }

    #[test]
    fn missing_input_is_io_error() {
        let err = FileList::collect(&["/nonexistent/dir"], &ScanConfig::default())
            .expect_err("missing");
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn empty_directory_gives_empty_list() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let list = FileList::collect(&[temp_dir.path()], &recursive()).expect("scan");
        assert!(list.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped_by_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let real = create_file(temp_dir.path(), "real.jpg");
        std::os::unix::fs::symlink(&real, temp_dir.path().join("link.jpg")).expect("symlink");

        let list = FileList::collect(&[temp_dir.path()], &ScanConfig::default()).expect("scan");
        assert_eq!(list.iter().collect::<Vec<_>>(), [real.as_path()]);

        let follow = ScanConfig {
            follow_symlinks: true,
            ..ScanConfig::default()
        };
        let list = FileList::collect(&[temp_dir.path()], &follow).expect("scan");
        assert_eq!(list.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn followed_symlink_cycle_lists_each_file_once() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let real = create_file(temp_dir.path(), "a.jpg");
        std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("loop"))
            .expect("symlink");

        let follow = ScanConfig {
            recursive: true,
            follow_symlinks: true,
        };
        let list = FileList::collect(&[temp_dir.path()], &follow).expect("scan");
        assert_eq!(list.iter().collect::<Vec<_>>(), [real.as_path()]);
    }
}
