// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events produced during a harness run, and the data they carry.

use crate::discovery::TestFile;
use slt_metadata::SltExitCode;
use std::{fmt, process::ExitStatus, time::Duration};

/// The diagnostic recorded for a test file whose target ran past the timeout.
pub const TIMEOUT_DIAGNOSTIC: &str = "Timeout";

/// An event produced by [`TestRunner`](crate::runner::TestRunner).
#[derive(Clone, Debug)]
pub enum HarnessEvent {
    /// Discovery finished and the run is starting.
    RunStarted {
        /// The number of test files that will be run.
        file_count: usize,
    },

    /// A test file finished running.
    FileFinished {
        /// The outcome for this file.
        outcome: ExecutionOutcome,

        /// Running totals, including this file.
        summary: RunSummary,
    },

    /// Every test file has been run.
    RunFinished {
        /// The final totals.
        summary: RunSummary,
    },
}

/// Whether a test file passed or failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExecutionResult {
    /// The test file passed.
    Pass,

    /// The test file failed.
    Fail {
        /// Why the test file failed.
        reason: FailureReason,
    },
}

impl ExecutionResult {
    /// Returns true if the test file passed.
    pub fn is_success(&self) -> bool {
        match self {
            ExecutionResult::Pass => true,
            ExecutionResult::Fail { .. } => false,
        }
    }

    /// Returns a static string representation of the result.
    pub fn as_static_str(&self) -> &'static str {
        match self {
            ExecutionResult::Pass => "pass",
            ExecutionResult::Fail { .. } => "fail",
        }
    }
}

/// The reason a test file failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FailureReason {
    /// The target exited unsuccessfully.
    NonZeroExit {
        /// The exit code, or `None` if the target was terminated by a signal.
        code: Option<i32>,
    },

    /// The target did not finish within the timeout and was killed.
    Timeout,

    /// The target could not be started (for example, it is missing or not executable).
    SpawnError,

    /// Any other problem, described by a message.
    Other {
        /// A description of the problem.
        message: String,
    },
}

impl FailureReason {
    /// Builds a `NonZeroExit` reason from a process's exit status.
    pub fn from_exit_status(exit_status: ExitStatus) -> Self {
        FailureReason::NonZeroExit {
            code: exit_status.code(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NonZeroExit { code: Some(code) } => write!(f, "exited with code {code}"),
            FailureReason::NonZeroExit { code: None } => write!(f, "terminated by a signal"),
            FailureReason::Timeout => write!(f, "timed out"),
            FailureReason::SpawnError => write!(f, "failed to start"),
            FailureReason::Other { message } => write!(f, "{message}"),
        }
    }
}

/// The outcome of running a single test file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutionOutcome {
    /// The test file that was run.
    pub test_file: TestFile,

    /// Whether the test file passed.
    pub result: ExecutionResult,

    /// Captured output or a description of what went wrong. `None` if there is nothing to show.
    pub diagnostic: Option<String>,

    /// How long the target ran for.
    pub time_taken: Duration,
}

impl ExecutionOutcome {
    /// Returns true if the test file passed.
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    /// Returns the diagnostic message, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

/// Aggregate counts for a run.
///
/// Every recorded outcome increments exactly one of the two counters, so `passed + failed` is
/// always the number of files recorded so far.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// The number of test files that passed.
    pub passed: usize,

    /// The number of test files that failed.
    pub failed: usize,
}

impl RunSummary {
    /// Records an outcome.
    pub fn record(&mut self, outcome: &ExecutionOutcome) {
        if outcome.is_success() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Returns the total number of files recorded.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Returns the percentage of files that passed, or 0 if no files were recorded.
    pub fn percentage(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.passed as f64 / total as f64 * 100.0,
        }
    }

    /// Returns true if no file failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Returns the process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        SltExitCode::for_failed_count(self.failed)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} files passed ({:.1}%)",
            self.passed,
            self.total(),
            self.percentage()
        )
    }
}
