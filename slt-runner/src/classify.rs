// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deciding whether a completed run of the target binary passed.
//!
//! The harness only knows how to spawn the target and capture what it produced. Turning that into
//! a verdict is the job of a [`Classify`] implementation. The default, [`ExitStatusClassifier`],
//! treats exit code 0 as a pass. A classifier that understands the test file format (for
//! example, one that compares query results against expected output recorded in the file) can be
//! passed to [`TestRunnerBuilder::set_classifier`](crate::runner::TestRunnerBuilder::set_classifier)
//! without changing discovery or the runner.
//!
//! Timeouts and spawn failures never reach a classifier: they are decided by the executor.

use crate::{
    discovery::TestFile,
    reporter::events::{ExecutionResult, FailureReason},
    test_output::ChildOutput,
};
use std::fmt;

/// A strategy for classifying the output of a target process as a pass or a failure.
pub trait Classify: fmt::Debug + Send + Sync {
    /// Classifies a process that ran `test_file` to completion.
    fn classify(&self, test_file: &TestFile, output: &ChildOutput) -> Classification;
}

/// The verdict produced by a [`Classify`] implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Whether the test file passed.
    pub result: ExecutionResult,

    /// A message explaining the result, if any. Empty messages are represented as `None`.
    pub diagnostic: Option<String>,
}

impl Classification {
    /// A passing classification with no diagnostic.
    pub fn pass() -> Self {
        Self {
            result: ExecutionResult::Pass,
            diagnostic: None,
        }
    }

    /// A failing classification. An empty diagnostic is normalized to `None`.
    pub fn fail(reason: FailureReason, diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            result: ExecutionResult::Fail { reason },
            diagnostic: (!diagnostic.is_empty()).then_some(diagnostic),
        }
    }
}

/// Classifies purely on exit status: exit code 0 passes, anything else fails.
///
/// Output streams are ignored on success. On failure, the diagnostic is standard error if it is
/// non-empty, and standard output otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExitStatusClassifier;

impl Classify for ExitStatusClassifier {
    fn classify(&self, _test_file: &TestFile, output: &ChildOutput) -> Classification {
        if output.exit_status.success() {
            return Classification::pass();
        }

        let diagnostic = if output.stderr.is_empty() {
            output.stdout_lossy()
        } else {
            output.stderr_lossy()
        };
        Classification::fail(
            FailureReason::from_exit_status(output.exit_status),
            diagnostic,
        )
    }
}
