// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use slt_metadata::SltExitCode;
use slt_runner::errors::{
    ConfigParseError, DiscoveryError, RunSetupError, TestRunnerBuildError, WriteEventError,
};
use std::error::Error;
use thiserror::Error;
use tracing::error;

const TARGET_HINT: &str = "build the target first, for example with `make build`";
const TEST_DIR_HINT: &str = "make sure the corpus was cloned with --recurse-submodules";

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that stops the harness before or during a run.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine the current directory")]
    GetCurrentDirFailed {
        #[source]
        error: std::io::Error,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("test runner build error")]
    TestRunnerBuildError {
        #[from]
        err: TestRunnerBuildError,
    },
    #[error("run setup error")]
    RunSetupError {
        #[from]
        err: RunSetupError,
    },
    #[error("write event error")]
    WriteEventError {
        #[from]
        err: WriteEventError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::GetCurrentDirFailed { .. }
            | Self::ConfigParseError { .. }
            | Self::TestRunnerBuildError { .. }
            | Self::RunSetupError { .. } => SltExitCode::SETUP_ERROR,
            Self::WriteEventError { .. } => SltExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::GetCurrentDirFailed { error } => {
                error!("could not determine the current directory");
                Some(error as &dyn Error)
            }
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse config at `{}`",
                    err.config_file().style(styles.bold)
                );
                err.source()
            }
            Self::TestRunnerBuildError { err } => {
                error!("failed to build the test runner");
                Some(err as &dyn Error)
            }
            Self::RunSetupError { err } => match err {
                RunSetupError::TargetNotFound { path } => {
                    error!("target binary not found at `{}`", path.style(styles.bold));
                    display_hint(TARGET_HINT, styles);
                    None
                }
                RunSetupError::Discovery(DiscoveryError::DirectoryNotFound { path }) => {
                    error!("test directory not found at `{}`", path.style(styles.bold));
                    display_hint(TEST_DIR_HINT, styles);
                    None
                }
                other => {
                    error!("{other}");
                    other.source()
                }
            },
            Self::WriteEventError { err } => {
                error!("failed to write results to the output");
                err.source()
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

fn display_hint(hint: &str, styles: &StderrStyles) {
    error!(target: NO_HEADING_TARGET, "{}", format!("(hint: {hint})").style(styles.hint));
}
