// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::Utf8PathBuf;
use clap::{Args, Parser};
use slt_runner::{
    config::HarnessConfig,
    errors::TestRunnerExecuteError,
    reporter::ReporterBuilder,
    runner::TestRunnerBuilder,
};
use std::{num::NonZeroUsize, time::Duration};
use tracing::info;

/// Parses the command line, runs the harness, and exits the process.
pub fn main_impl() -> ! {
    let opts = SltHarnessApp::parse();
    let output = opts.init_output();

    match opts.exec(output, &mut OutputWriter::default()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}

/// Runs every test file in a SQLLogicTest corpus against a target executable.
///
/// Each test file is passed to the target as its only argument, and passes if the target exits
/// with status 0. The process exits with status 0 only if every test file passed.
#[derive(Debug, Parser)]
#[command(version, styles = clap_styles::style())]
pub struct SltHarnessApp {
    #[command(flatten)]
    output: OutputOpts,

    #[command(flatten)]
    config_opts: ConfigOpts,

    #[command(flatten)]
    runner_opts: RunnerOpts,

    #[command(flatten)]
    reporter_opts: ReporterOpts,
}

impl SltHarnessApp {
    /// Initializes logging and color output.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code.
    pub fn exec(
        self,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32, ExpectedError> {
        let mut config = self.config_opts.make_config()?;
        self.runner_opts.apply(&mut config);

        if output.verbose {
            info!(
                "running `{}` on test files under `{}` (timeout {}, {} test threads)",
                config.target(),
                config.test_dir(),
                humantime::format_duration(config.timeout()),
                config.test_threads(),
            );
        }

        let runner = TestRunnerBuilder::default().build(&config)?;

        let mut reporter = ReporterBuilder::default()
            .set_summary_only(self.reporter_opts.summary)
            .set_colorize(output.color.should_colorize(supports_color::Stream::Stdout))
            .build(output_writer.reporter_output());

        match runner.try_execute(|event| reporter.report_event(&event)) {
            Ok(summary) => Ok(summary.exit_code()),
            Err(TestRunnerExecuteError::Setup(err)) => Err(err.into()),
            Err(TestRunnerExecuteError::Report(err)) => Err(err.into()),
        }
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Config options")]
struct ConfigOpts {
    /// Base directory for relative paths [default: current directory]
    #[arg(long, global = true, value_name = "DIR", env = "SLT_HARNESS_PROJECT_ROOT")]
    project_root: Option<Utf8PathBuf>,

    /// Config file [default: <project-root>/.config/slt-harness.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    /// Creates a harness config with the given options.
    fn make_config(&self) -> Result<HarnessConfig, ExpectedError> {
        let project_root = match &self.project_root {
            Some(project_root) => project_root.clone(),
            None => current_dir()?,
        };
        Ok(HarnessConfig::from_sources(
            project_root,
            self.config_file.as_deref(),
        )?)
    }
}

fn current_dir() -> Result<Utf8PathBuf, ExpectedError> {
    let dir = std::env::current_dir()
        .map_err(|error| ExpectedError::GetCurrentDirFailed { error })?;
    Utf8PathBuf::try_from(dir).map_err(|err| ExpectedError::GetCurrentDirFailed {
        error: err.into_io_error(),
    })
}

#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Runner options")]
struct RunnerOpts {
    /// Directory containing the test corpus
    #[arg(long, value_name = "DIR")]
    test_dir: Option<Utf8PathBuf>,

    /// Executable to run each test file with
    #[arg(long, value_name = "PATH")]
    target: Option<Utf8PathBuf>,

    /// Only run files whose names end with this suffix
    #[arg(long, value_name = "SUFFIX")]
    suffix: Option<String>,

    /// Time limit for a single test file, for example "60s" or "2m"
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Number of test files to run simultaneously
    #[arg(long, short = 'j', value_name = "N")]
    test_threads: Option<NonZeroUsize>,
}

impl RunnerOpts {
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(test_dir) = &self.test_dir {
            config.set_test_dir(test_dir);
        }
        if let Some(target) = &self.target {
            config.set_target(target);
        }
        if let Some(suffix) = &self.suffix {
            config.set_test_suffix(suffix);
        }
        if let Some(timeout) = self.timeout {
            config.set_timeout(timeout);
        }
        if let Some(test_threads) = self.test_threads {
            config.set_test_threads(test_threads);
        }
    }
}

#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Reporter options")]
struct ReporterOpts {
    /// Only print the summary, not a line per test file
    #[arg(long)]
    summary: bool,
}
