// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery of test files within a corpus directory.

use crate::errors::DiscoveryError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A single test file within the corpus.
///
/// Ordering is by full path, which is the order test files are run and reported in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestFile {
    path: Utf8PathBuf,
    rel_path: Utf8PathBuf,
}

impl TestFile {
    /// Creates a new `TestFile` from its path and its path relative to the corpus root.
    pub fn new(path: impl Into<Utf8PathBuf>, rel_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            rel_path: rel_path.into(),
        }
    }

    /// The path passed to the target binary.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The path relative to the corpus root, used for display.
    pub fn rel_path(&self) -> &Utf8Path {
        &self.rel_path
    }
}

impl fmt::Display for TestFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rel_path)
    }
}

/// Recursively finds every regular file under `root` whose name ends with `suffix`.
///
/// The returned list is sorted by path. Symbolic links to files are included, but directory links
/// are not descended into. Entries that cannot be read are skipped with a warning.
///
/// Returns [`DiscoveryError::DirectoryNotFound`] if `root` is not an existing directory.
pub fn discover_test_files(
    root: &Utf8Path,
    suffix: &str,
) -> Result<Vec<TestFile>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: root.to_owned(),
        });
    }

    let mut test_files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!("skipping unreadable entry under `{root}`: {error}");
                continue;
            }
        };
        if !is_file_or_file_link(&entry) {
            continue;
        }

        let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => path,
            Err(path) => {
                warn!("skipping non-UTF-8 path `{}`", path.display());
                continue;
            }
        };
        if !path.file_name().is_some_and(|name| name.ends_with(suffix)) {
            continue;
        }

        let rel_path = path.strip_prefix(root).unwrap_or(&path).to_owned();
        test_files.push(TestFile::new(path, rel_path));
    }

    test_files.sort_unstable();
    debug!("found {} test files under `{root}`", test_files.len());

    Ok(test_files)
}

fn is_file_or_file_link(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    // Dangling links fail to stat and are skipped.
    entry.path_is_symlink() && std::fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file())
}
