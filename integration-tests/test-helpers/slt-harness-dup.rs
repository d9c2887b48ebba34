// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! This is a duplicate of slt-harness's main.rs, so that integration tests can run the harness
//! without Cargo trying to rebuild the binary that is running the tests.

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    slt_harness::main_impl()
}
