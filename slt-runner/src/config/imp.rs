// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ConfigParseError;
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::{collections::BTreeSet, num::NonZeroUsize, time::Duration};
use tracing::warn;

/// Configuration for a harness run.
///
/// All relative paths are resolved against the project root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    project_root: Utf8PathBuf,
    test_dir: Utf8PathBuf,
    target: Utf8PathBuf,
    test_suffix: String,
    timeout: Duration,
    test_threads: NonZeroUsize,
}

impl HarnessConfig {
    /// The location of the project config, relative to the project root.
    pub const CONFIG_PATH: &'static str = ".config/slt-harness.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Custom, project-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Returns the default configuration for the given project root.
    pub fn default_config(project_root: impl Into<Utf8PathBuf>) -> Self {
        let config = Self::make_default_config()
            .build()
            .expect("embedded default config is always valid");
        let deserialized: HarnessConfigDeserialize = config
            .try_deserialize()
            .expect("embedded default config is always valid");
        Self::from_deserialized(project_root.into(), deserialized)
    }

    /// Reads the config from the given file, or if not specified from
    /// [`CONFIG_PATH`](Self::CONFIG_PATH) within the project root, layered on top of the default
    /// config.
    ///
    /// An explicitly specified file must exist. The file at `CONFIG_PATH` is optional.
    pub fn from_sources(
        project_root: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let project_root = project_root.into();

        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = project_root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let config = Self::make_default_config()
            .add_source(source)
            .build()
            .map_err(|err| ConfigParseError::new(&config_file, err))?;

        let mut unknown = BTreeSet::new();
        let deserialized: HarnessConfigDeserialize =
            serde_ignored::deserialize(config, |path: serde_ignored::Path| {
                unknown.insert(path.to_string());
            })
            .map_err(|err| ConfigParseError::new(&config_file, err))?;

        if !unknown.is_empty() {
            let unknown: Vec<_> = unknown.into_iter().collect();
            warn!(
                "ignoring unknown configuration keys in `{config_file}`: {}",
                unknown.join(", ")
            );
        }

        Ok(Self::from_deserialized(project_root, deserialized))
    }

    /// Returns the project root.
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// Returns the directory containing the test corpus.
    pub fn test_dir(&self) -> &Utf8Path {
        &self.test_dir
    }

    /// Returns the path to the target binary.
    pub fn target(&self) -> &Utf8Path {
        &self.target
    }

    /// Returns the suffix that identifies test files.
    pub fn test_suffix(&self) -> &str {
        &self.test_suffix
    }

    /// Returns the wall-clock limit for a single test file.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of test files to run simultaneously.
    pub fn test_threads(&self) -> NonZeroUsize {
        self.test_threads
    }

    /// Sets the corpus directory. Relative paths are resolved against the project root.
    pub fn set_test_dir(&mut self, test_dir: impl AsRef<Utf8Path>) -> &mut Self {
        self.test_dir = self.project_root.join(test_dir);
        self
    }

    /// Sets the target binary. Relative paths are resolved against the project root.
    pub fn set_target(&mut self, target: impl AsRef<Utf8Path>) -> &mut Self {
        self.target = self.project_root.join(target);
        self
    }

    /// Sets the test file suffix.
    pub fn set_test_suffix(&mut self, test_suffix: impl Into<String>) -> &mut Self {
        self.test_suffix = test_suffix.into();
        self
    }

    /// Sets the per-file timeout.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of test files to run simultaneously.
    pub fn set_test_threads(&mut self, test_threads: NonZeroUsize) -> &mut Self {
        self.test_threads = test_threads;
        self
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn from_deserialized(project_root: Utf8PathBuf, deserialized: HarnessConfigDeserialize) -> Self {
        let HarnessSection {
            test_dir,
            target,
            test_suffix,
            timeout,
            test_threads,
        } = deserialized.harness;

        Self {
            test_dir: project_root.join(test_dir),
            target: project_root.join(target),
            project_root,
            test_suffix,
            timeout,
            test_threads,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct HarnessConfigDeserialize {
    harness: HarnessSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct HarnessSection {
    test_dir: Utf8PathBuf,
    target: Utf8PathBuf,
    test_suffix: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    test_threads: NonZeroUsize,
}
