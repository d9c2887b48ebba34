// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `slt-harness` runs.
///
/// A run may fail for a variety of reasons. This structure documents the exit codes that may occur
/// in case of expected failures.
///
/// CI pipelines built around the harness only distinguish zero from non-zero, so every failure
/// kind currently maps to 1. The constants are kept separate so that callers express *which*
/// condition they mean.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum SltExitCode {}

impl SltExitCode {
    /// Every discovered test file passed (this includes the case where no files were found).
    pub const OK: i32 = 0;

    /// One or more test files failed.
    pub const TEST_RUN_FAILED: i32 = 1;

    /// The run could not be set up: the target binary or the test corpus is missing, or the
    /// configuration was invalid.
    pub const SETUP_ERROR: i32 = 1;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 1;

    /// Returns the exit code for a completed run with the given number of failed files.
    pub fn for_failed_count(failed: usize) -> i32 {
        if failed == 0 {
            Self::OK
        } else {
            Self::TEST_RUN_FAILED
        }
    }
}
