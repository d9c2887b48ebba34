// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by slt-harness integration tests.

pub mod corpus;
pub mod harness_cli;
