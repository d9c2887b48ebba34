// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs a corpus of SQLLogicTest files against a target executable.
//!
//! Each test file is passed to the target as its only argument. A file passes if the target exits
//! with status 0. The harness prints one line per file and a summary with the pass rate, and exits
//! with 0 only if every file passed.
//!
//! For the library that does the actual work, see `slt-runner`.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
