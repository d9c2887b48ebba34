// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A stand-in for the executable under test.
//!
//! It takes exactly one argument, a test file, and acts out the directives in it. Each line is
//! one directive, and lines that are not directives are ignored:
//!
//! ```text
//! stdout: <text>    write <text> and a newline to standard output
//! stderr: <text>    write <text> and a newline to standard error
//! sleep: <ms>       sleep for <ms> milliseconds
//! exit: <code>      exit immediately with <code>
//! ```
//!
//! A file that runs out of directives exits with 0.

use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use std::{io::Write, time::Duration};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path] = args.as_slice() else {
        eprintln!("expected exactly one argument, got {}", args.len());
        std::process::exit(2);
    };

    let contents =
        std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read `{path}`"))?;

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    for line in contents.lines() {
        let Some((directive, value)) = line.split_once(": ") else {
            continue;
        };
        match directive {
            "stdout" => writeln!(stdout, "{value}")?,
            "stderr" => writeln!(stderr, "{value}")?,
            "sleep" => {
                let ms: u64 = value
                    .parse()
                    .wrap_err_with(|| format!("invalid sleep duration `{value}`"))?;
                stdout.flush()?;
                stderr.flush()?;
                std::thread::sleep(Duration::from_millis(ms));
            }
            "exit" => {
                let code: i32 = value
                    .parse()
                    .wrap_err_with(|| format!("invalid exit code `{value}`"))?;
                stdout.flush()?;
                stderr.flush()?;
                std::process::exit(code);
            }
            other => bail!("unknown directive `{other}`"),
        }
    }

    Ok(())
}
