// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `slt-harness`, a conformance harness that runs a corpus of
//! SQLLogicTest files against a target executable.
//!
//! The basic flow is:
//!
//! 1. Build a [`HarnessConfig`](config::HarnessConfig), either directly or from config files.
//! 2. Build a [`TestRunner`](runner::TestRunner) with [`TestRunnerBuilder`](runner::TestRunnerBuilder).
//! 3. Call [`TestRunner::try_execute`](runner::TestRunner::try_execute), passing events to a
//!    [`Reporter`](reporter::Reporter).

pub mod classify;
pub mod config;
pub mod discovery;
pub mod errors;
mod helpers;
pub mod reporter;
pub mod runner;
pub mod test_output;
