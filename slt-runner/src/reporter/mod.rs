// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints out and aggregates test file outcomes.
//!
//! The main structure in this module is [`Reporter`].

mod displayer;
pub mod events;

pub use displayer::*;
