// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by slt-runner.

use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use std::{error, fmt};
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse harness config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    err: ConfigError,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, err: ConfigError) -> Self {
        Self {
            config_file: config_file.into(),
            err,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }
}

/// An error that occurred while discovering test files.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The corpus root does not exist or is not a directory.
    #[error("test directory not found: `{path}`")]
    DirectoryNotFound {
        /// The directory that was looked for.
        path: Utf8PathBuf,
    },
}

/// A fatal error that stops a run before any test file is executed.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum RunSetupError {
    /// The target binary does not exist at the configured path.
    #[error("target binary not found: `{path}`")]
    TargetNotFound {
        /// The configured path of the target binary.
        path: Utf8PathBuf,
    },

    /// Discovering test files failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// An error that occurred while building a [`TestRunner`](crate::runner::TestRunner).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestRunnerBuildError {
    /// An error occurred while creating the Tokio runtime.
    #[error("error creating Tokio runtime")]
    TokioRuntimeCreate(#[source] std::io::Error),
}

/// An error returned by [`TestRunner::try_execute`](crate::runner::TestRunner::try_execute).
///
/// `E` is the error type returned by the event callback.
#[derive(Debug)]
pub enum TestRunnerExecuteError<E> {
    /// The run could not be set up.
    Setup(RunSetupError),

    /// The event callback returned an error, and the run was stopped.
    Report(E),
}

impl<E: fmt::Display> fmt::Display for TestRunnerExecuteError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(_) => write!(f, "test run could not be set up"),
            Self::Report(error) => write!(f, "error reporting results: {error}"),
        }
    }
}

impl<E: error::Error + 'static> error::Error for TestRunnerExecuteError<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Setup(error) => Some(error),
            Self::Report(error) => Some(error),
        }
    }
}

/// An error that occurs while writing an event to the output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[from] std::io::Error),
}
