// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for slt-harness.
//!
//! These run `slt-harness-dup`, a copy of the `slt-harness` binary, against temporary corpora
//! with `fake-target` as the executable under test. See `test-helpers/fake-target.rs` for the
//! directives test files can use.

use color_eyre::Result;
use indoc::indoc;
use integration_tests::{
    corpus::TempCorpus,
    harness_cli::{SltHarnessCli, SltHarnessOutput},
};
use pretty_assertions::assert_eq;
use slt_metadata::SltExitCode;

mod config;

const HARNESS_BIN: &str = env!("CARGO_BIN_EXE_slt-harness-dup");
const FAKE_TARGET_BIN: &str = env!("CARGO_BIN_EXE_fake-target");

fn run_harness(corpus: &TempCorpus, extra_args: &[&str]) -> SltHarnessOutput {
    SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--test-dir",
            TempCorpus::TEST_DIR,
            "--target",
            FAKE_TARGET_BIN,
        ])
        .args(extra_args.iter().copied())
        .output()
}

fn mixed_corpus() -> Result<TempCorpus> {
    TempCorpus::with_files([
        ("a.test", "stdout: ok\nexit: 0\n"),
        (
            "b.test",
            "stdout: partial results\nstderr: syntax error\nexit: 1\n",
        ),
        ("c.test", "exit: 0\n"),
    ])
}

#[test]
fn mixed_run() -> Result<()> {
    let corpus = mixed_corpus()?;
    let output = run_harness(&corpus, &[]);

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            Found 3 test files

            PASS: a.test
            FAIL: b.test
                  syntax error
            PASS: c.test

            ==================================================
            Results: 2/3 files passed (66.7%)
            ==================================================
        "}
    );
    Ok(())
}

#[test]
fn summary_only() -> Result<()> {
    let corpus = mixed_corpus()?;
    let output = run_harness(&corpus, &["--summary"]);

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            Found 3 test files


            ==================================================
            Results: 2/3 files passed (66.7%)
            ==================================================
        "}
    );
    Ok(())
}

#[test]
fn all_pass() -> Result<()> {
    let corpus = TempCorpus::with_files([
        ("select1.test", "stdout: 1\n"),
        ("index/between/1/slt_good_0.test", "exit: 0\n"),
        ("evidence/in1.test", "stderr: noisy but fine\nexit: 0\n"),
    ])?;
    let output = run_harness(&corpus, &[]);

    assert_eq!(output.exit_code(), Some(SltExitCode::OK), "{output}");
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            Found 3 test files

            PASS: evidence/in1.test
            PASS: index/between/1/slt_good_0.test
            PASS: select1.test

            ==================================================
            Results: 3/3 files passed (100.0%)
            ==================================================
        "}
    );
    Ok(())
}

#[test]
fn failure_with_empty_stderr_shows_stdout() -> Result<()> {
    let corpus = TempCorpus::with_files([("t.test", "stdout: Error: no such table: t1\nexit: 1\n")])?;
    let output = run_harness(&corpus, &[]);

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert!(
        output
            .stdout_as_str()
            .contains("FAIL: t.test\n      Error: no such table: t1\n"),
        "{output}"
    );
    Ok(())
}

#[test]
fn long_diagnostic_is_truncated() -> Result<()> {
    let message = "e".repeat(300);
    let contents = format!("stderr: {message}\nexit: 1\n");
    let corpus = TempCorpus::with_files([("long.test", contents.as_str())])?;
    let output = run_harness(&corpus, &[]);

    let expected = format!("FAIL: long.test\n      {}\n", "e".repeat(100));
    assert!(output.stdout_as_str().contains(&expected), "{output}");
    Ok(())
}

#[test]
fn timeout() -> Result<()> {
    let corpus = TempCorpus::with_files([
        ("fast.test", "exit: 0\n"),
        ("hang.test", "stdout: starting\nsleep: 30000\n"),
    ])?;
    let start = std::time::Instant::now();
    let output = run_harness(&corpus, &["--timeout", "500ms"]);

    assert!(
        start.elapsed() < std::time::Duration::from_secs(20),
        "harness was not blocked by the hanging target"
    );
    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert!(
        output
            .stdout_as_str()
            .contains("PASS: fast.test\nFAIL: hang.test\n      Timeout\n"),
        "{output}"
    );
    assert!(
        output
            .stdout_as_str()
            .contains("Results: 1/2 files passed (50.0%)"),
        "{output}"
    );
    Ok(())
}

#[test]
fn parallel_output_matches_sequential() -> Result<()> {
    let corpus = TempCorpus::with_files([
        ("a.test", "sleep: 300\nexit: 0\n"),
        ("b.test", "sleep: 200\nstderr: mismatch\nexit: 1\n"),
        ("c.test", "sleep: 100\nexit: 0\n"),
        ("d.test", "stderr: crash\nexit: 101\n"),
        ("e.test", "exit: 0\n"),
    ])?;

    let sequential = run_harness(&corpus, &[]);
    let parallel = run_harness(&corpus, &["--test-threads", "4"]);

    assert_eq!(sequential.exit_code(), parallel.exit_code());
    assert_eq!(sequential.stdout_as_str(), parallel.stdout_as_str());
    assert!(
        parallel
            .stdout_as_str()
            .contains("Results: 3/5 files passed (60.0%)"),
        "{parallel}"
    );
    Ok(())
}

#[test]
fn empty_corpus() -> Result<()> {
    let corpus = TempCorpus::with_files([("README.md", "no tests here\n")])?;
    let output = run_harness(&corpus, &[]);

    assert_eq!(output.exit_code(), Some(SltExitCode::OK), "{output}");
    assert!(
        output
            .stdout_as_str()
            .contains("Results: 0/0 files passed (0.0%)"),
        "{output}"
    );
    Ok(())
}

#[test]
fn custom_suffix() -> Result<()> {
    let corpus = TempCorpus::with_files([
        ("a.test", "exit: 1\n"),
        ("b.slt", "exit: 0\n"),
    ])?;
    let output = run_harness(&corpus, &["--suffix", ".slt"]);

    assert_eq!(output.exit_code(), Some(SltExitCode::OK), "{output}");
    assert!(output.stdout_as_str().contains("PASS: b.slt\n"), "{output}");
    assert!(!output.stdout_as_str().contains("a.test"), "{output}");
    Ok(())
}

#[test]
fn missing_target() -> Result<()> {
    let corpus = TempCorpus::with_files([("a.test", "exit: 0\n")])?;
    let missing = corpus.project_root().join("build/sql-challenge");
    let output = SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--test-dir",
            TempCorpus::TEST_DIR,
            "--target",
            missing.as_str(),
        ])
        .output();

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::SETUP_ERROR),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "", "nothing is run: {output}");
    let stderr = output.stderr_as_str();
    assert!(
        stderr.contains(&format!("error: target binary not found at `{missing}`")),
        "{output}"
    );
    assert!(
        stderr.contains("(hint: build the target first, for example with `make build`)"),
        "{output}"
    );
    Ok(())
}

#[test]
fn missing_test_dir() -> Result<()> {
    let corpus = TempCorpus::new()?;
    let missing = corpus
        .project_root()
        .join("third_party/sqllogictest/test");
    let output = SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--target",
            FAKE_TARGET_BIN,
        ])
        .output();

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::SETUP_ERROR),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "", "nothing is run: {output}");
    let stderr = output.stderr_as_str();
    assert!(
        stderr.contains(&format!("error: test directory not found at `{missing}`")),
        "{output}"
    );
    assert!(
        stderr.contains("(hint: make sure the corpus was cloned with --recurse-submodules)"),
        "{output}"
    );
    Ok(())
}

#[test]
fn target_checked_before_test_dir() -> Result<()> {
    let corpus = TempCorpus::new()?;
    let output = SltHarnessCli::new(HARNESS_BIN)
        .args([
            "--project-root",
            corpus.project_root().as_str(),
            "--test-dir",
            "missing-corpus",
            "--target",
            "missing-target",
        ])
        .output();

    assert_eq!(
        output.exit_code(),
        Some(SltExitCode::SETUP_ERROR),
        "{output}"
    );
    let stderr = output.stderr_as_str();
    assert!(stderr.contains("target binary not found"), "{output}");
    assert!(!stderr.contains("test directory not found"), "{output}");
    Ok(())
}
