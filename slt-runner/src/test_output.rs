// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw output captured from a target binary.

use std::{borrow::Cow, process::ExitStatus};

/// The exit status and captured standard streams of a target process that ran to completion.
#[derive(Clone, Debug)]
pub struct ChildOutput {
    /// The exit status of the process.
    pub exit_status: ExitStatus,

    /// Everything the process wrote to standard output.
    pub stdout: Vec<u8>,

    /// Everything the process wrote to standard error.
    pub stderr: Vec<u8>,
}

impl ChildOutput {
    /// Returns standard output, lossily converted to UTF-8.
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Returns standard error, lossily converted to UTF-8.
    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}
