// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Stable, documented metadata for `slt-harness` runs.
//!
//! Outer automation (CI gating in particular) consumes the harness's exit status. The values are
//! collected here so that they can be depended on without pulling in the runner itself.

mod exit_codes;

pub use exit_codes::*;
