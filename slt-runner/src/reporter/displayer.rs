// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::events::{ExecutionOutcome, HarnessEvent, RunSummary};
use crate::{
    errors::WriteEventError,
    helpers::truncate_chars,
};
use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

/// The maximum number of characters of a diagnostic shown under a failing file.
pub const DIAGNOSTIC_MAX_CHARS: usize = 100;

const SEPARATOR_WIDTH: usize = 50;
const DIAGNOSTIC_INDENT: &str = "      ";

/// Output destination for the reporter.
///
/// This is usually standard output, but can be an in-memory buffer for tests.
pub enum ReporterOutput<'a> {
    /// Write to standard output.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut Vec<u8>),
}

/// Reporter builder.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    summary_only: bool,
    should_colorize: bool,
}

impl ReporterBuilder {
    /// Set to true to suppress per-file lines. The file count and summary block are still printed.
    pub fn set_summary_only(&mut self, summary_only: bool) -> &mut Self {
        self.summary_only = summary_only;
        self
    }

    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Creates a new reporter writing to `output`.
    pub fn build<'a>(&self, output: ReporterOutput<'a>) -> Reporter<'a> {
        let mut styles = Styles::default();
        if self.should_colorize {
            styles.colorize();
        }

        Reporter {
            summary_only: self.summary_only,
            styles,
            output,
        }
    }
}

/// Writes harness events in a human-readable format.
pub struct Reporter<'a> {
    summary_only: bool,
    styles: Styles,
    output: ReporterOutput<'a>,
}

impl Reporter<'_> {
    /// Report a harness event.
    pub fn report_event(&mut self, event: &HarnessEvent) -> Result<(), WriteEventError> {
        // Render the whole event first so that lines from one event are written together.
        let mut buf = Vec::new();
        self.write_event_impl(event, &mut buf)?;

        match &mut self.output {
            ReporterOutput::Terminal => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(&buf)?;
                stdout.flush()?;
            }
            ReporterOutput::Buffer(out) => out.extend_from_slice(&buf),
        }
        Ok(())
    }

    fn write_event_impl(&self, event: &HarnessEvent, writer: &mut dyn Write) -> io::Result<()> {
        match event {
            HarnessEvent::RunStarted { file_count } => {
                writeln!(writer, "Found {} test files", file_count.style(self.styles.count))?;
                writeln!(writer)?;
            }
            HarnessEvent::FileFinished { outcome, .. } => {
                if !self.summary_only {
                    self.write_outcome(outcome, writer)?;
                }
            }
            HarnessEvent::RunFinished { summary } => {
                self.write_summary(summary, writer)?;
            }
        }
        Ok(())
    }

    fn write_outcome(&self, outcome: &ExecutionOutcome, writer: &mut dyn Write) -> io::Result<()> {
        let rel_path = outcome.test_file.rel_path();
        if outcome.is_success() {
            writeln!(writer, "{} {rel_path}", "PASS:".style(self.styles.pass))?;
            return Ok(());
        }

        writeln!(writer, "{} {rel_path}", "FAIL:".style(self.styles.fail))?;
        if let Some(diagnostic) = outcome.diagnostic() {
            let excerpt = truncate_chars(diagnostic, DIAGNOSTIC_MAX_CHARS).trim_end();
            for line in excerpt.lines() {
                writeln!(writer, "{DIAGNOSTIC_INDENT}{line}")?;
            }
        }
        Ok(())
    }

    fn write_summary(&self, summary: &RunSummary, writer: &mut dyn Write) -> io::Result<()> {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        let style = if summary.is_success() {
            self.styles.pass
        } else {
            self.styles.fail
        };

        writeln!(writer)?;
        writeln!(writer, "{separator}")?;
        writeln!(writer, "{}", format!("Results: {summary}").style(style))?;
        writeln!(writer, "{separator}")?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Styles {
    count: Style,
    pass: Style,
    fail: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.count = Style::new().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
    }
}
