// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use color_eyre::{Result, eyre::Context};

/// A temporary project root holding a test corpus.
///
/// The corpus lives in `corpus/` under the project root.
pub struct TempCorpus {
    dir: Utf8TempDir,
}

impl TempCorpus {
    pub const TEST_DIR: &'static str = "corpus";

    pub fn new() -> Result<Self> {
        let dir = camino_tempfile::Builder::new()
            .prefix("slt-harness-test-")
            .tempdir()
            .wrap_err("failed to create temp dir")?;
        std::fs::create_dir_all(dir.path().join(Self::TEST_DIR))
            .wrap_err("failed to create corpus dir")?;
        Ok(Self { dir })
    }

    /// Creates a corpus containing the given files, keyed by path relative to the corpus root.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let corpus = Self::new()?;
        for (rel_path, contents) in files {
            corpus.write_test_file(rel_path, contents)?;
        }
        Ok(corpus)
    }

    pub fn project_root(&self) -> &Utf8Path {
        self.dir.path()
    }

    pub fn test_dir(&self) -> Utf8PathBuf {
        self.dir.path().join(Self::TEST_DIR)
    }

    pub fn write_test_file(&self, rel_path: &str, contents: &str) -> Result<()> {
        let path = self.test_dir().join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create `{parent}`"))?;
        }
        std::fs::write(&path, contents).wrap_err_with(|| format!("failed to write `{path}`"))
    }

    /// Writes a file relative to the project root.
    pub fn write_project_file(&self, rel_path: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create `{parent}`"))?;
        }
        std::fs::write(&path, contents).wrap_err_with(|| format!("failed to write `{path}`"))?;
        Ok(path)
    }
}
