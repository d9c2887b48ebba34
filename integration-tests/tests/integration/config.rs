// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FAKE_TARGET_BIN, HARNESS_BIN};
use color_eyre::Result;
use integration_tests::{corpus::TempCorpus, harness_cli::SltHarnessCli};
use pretty_assertions::assert_eq;
use slt_metadata::SltExitCode;

#[test]
fn project_config_is_used() -> Result<()> {
    let corpus = TempCorpus::with_files([("a.test", "exit: 0\n"), ("b.test", "exit: 0\n")])?;
    corpus.write_project_file(
        ".config/slt-harness.toml",
        &format!(
            "[harness]\ntest-dir = \"{}\"\ntarget = \"{}\"\n",
            TempCorpus::TEST_DIR,
            FAKE_TARGET_BIN.replace('\\', "\\\\"),
        ),
    )?;

    let output = SltHarnessCli::new(HARNESS_BIN)
        .args(["--project-root", corpus.project_root().as_str(), "--summary"])
        .output();

    assert_eq!(output.exit_code(), Some(SltExitCode::OK), "{output}");
    assert!(
        output
            .stdout_as_str()
            .contains("Results: 2/2 files passed (100.0%)"),
        "{output}"
    );
    Ok(())
}

#[test]
fn project_root_from_env() -> Result<()> {
    let corpus = TempCorpus::with_files([("a.test", "exit: 3\n")])?;

    let output = SltHarnessCli::new(HARNESS_BIN)
        .env("SLT_HARNESS_PROJECT_ROOT", corpus.project_root().as_str())
        .args([
            "--test-dir",
            TempCorpus::TEST_DIR,
            "--target",
            FAKE_TARGET_BIN,
        ])
        .output();

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert!(output.stdout_as_str().contains("FAIL: a.test"), "{output}");
    Ok(())
}

#[test]
fn command_line_overrides_config_file() -> Result<()> {
    let corpus = TempCorpus::with_files([("slow.test", "sleep: 30000\n")])?;
    let config_file = corpus.write_project_file(
        "harness.toml",
        "[harness]\ntimeout = \"10m\"\n",
    )?;

    let output = SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--config-file",
            config_file.as_str(),
            "--test-dir",
            TempCorpus::TEST_DIR,
            "--target",
            FAKE_TARGET_BIN,
            "--timeout",
            "300ms",
        ])
        .output();

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert!(
        output.stdout_as_str().contains("FAIL: slow.test\n      Timeout\n"),
        "{output}"
    );
    Ok(())
}

#[test]
fn invalid_config_file() -> Result<()> {
    let corpus = TempCorpus::new()?;
    let config_file =
        corpus.write_project_file("harness.toml", "[harness]\ntimeout = \"eventually\"\n")?;

    let output = SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--config-file",
            config_file.as_str(),
        ])
        .output();

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::SETUP_ERROR),
        "{output}"
    );
    assert!(
        output
            .stderr_as_str()
            .contains(&format!("error: failed to parse config at `{config_file}`")),
        "{output}"
    );
    assert!(
        output.stderr_as_str().contains("\nCaused by:\n  "),
        "the parse error's source is printed: {output}"
    );
    Ok(())
}

#[test]
fn unknown_config_keys_warn() -> Result<()> {
    let corpus = TempCorpus::with_files([("a.test", "exit: 0\n")])?;
    let config_file = corpus.write_project_file(
        "harness.toml",
        "[harness]\nretries = 3\n",
    )?;

    let output = SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--config-file",
            config_file.as_str(),
            "--test-dir",
            TempCorpus::TEST_DIR,
            "--target",
            FAKE_TARGET_BIN,
        ])
        .output();

    assert_eq!(output.exit_code(), Some(SltExitCode::OK), "{output}");
    assert!(output.stderr_as_str().contains("warning:"), "{output}");
    assert!(output.stderr_as_str().contains("retries"), "{output}");
    Ok(())
}
