// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the harness.
//!
//! The main structure in this module is [`HarnessConfig`], an explicit configuration value that is
//! passed into the [`TestRunner`](crate::runner::TestRunner). It can be constructed from the
//! embedded defaults, from config files, or both, and then adjusted with setters.

mod imp;

pub use imp::*;
