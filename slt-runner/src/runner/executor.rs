// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Running a single test file against the target binary.
//!
//! Every call to [`ExecutorContext::run_test_file`] produces exactly one [`ExecutionOutcome`].
//! Spawn failures, timeouts and I/O errors while collecting output are all turned into failing
//! outcomes rather than returned as errors.

use crate::{
    classify::{Classification, Classify},
    discovery::TestFile,
    reporter::events::{ExecutionOutcome, FailureReason, TIMEOUT_DIAGNOSTIC},
    test_output::ChildOutput,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::{
    fmt, io,
    process::Stdio,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

/// Everything needed to run one test file: the target binary, the timeout, and the classifier.
#[derive(Clone)]
pub struct ExecutorContext {
    target: Utf8PathBuf,
    timeout: Duration,
    classifier: Arc<dyn Classify>,
}

impl ExecutorContext {
    /// Creates a new executor context.
    pub fn new(
        target: impl Into<Utf8PathBuf>,
        timeout: Duration,
        classifier: Arc<dyn Classify>,
    ) -> Self {
        Self {
            target: target.into(),
            timeout,
            classifier,
        }
    }

    /// The target binary.
    pub fn target(&self) -> &Utf8Path {
        &self.target
    }

    /// The per-file timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the target binary with `test_file` as its only argument and classifies the result.
    ///
    /// This must be called from within a Tokio runtime.
    pub async fn run_test_file(&self, test_file: TestFile) -> ExecutionOutcome {
        let start = Instant::now();
        let classification = self.run_inner(&test_file).await;
        let time_taken = start.elapsed();

        debug!(
            "{test_file}: {} in {time_taken:?}",
            classification.result.as_static_str(),
        );

        ExecutionOutcome {
            test_file,
            result: classification.result,
            diagnostic: classification.diagnostic,
            time_taken,
        }
    }

    async fn run_inner(&self, test_file: &TestFile) -> Classification {
        let mut cmd = std::process::Command::new(&self.target);
        cmd.arg(test_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        super::os::set_process_group(&mut cmd);

        let mut cmd = tokio::process::Command::from(cmd);
        cmd.kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(error) => {
                debug!("{test_file}: failed to spawn `{}`: {error}", self.target);
                return Classification::fail(FailureReason::SpawnError, error.to_string());
            }
        };
        // Store the pid now: once the child is reaped, `id()` returns `None`.
        let child_pid = child.id();
        debug!("{test_file}: spawned `{}` (pid {child_pid:?})", self.target);

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let collect = async {
            tokio::try_join!(child.wait(), read_all(stdout), read_all(stderr))
        };
        let res = tokio::time::timeout(self.timeout, collect).await;

        match res {
            Ok(Ok((exit_status, stdout, stderr))) => {
                let output = ChildOutput {
                    exit_status,
                    stdout,
                    stderr,
                };
                self.classifier.classify(test_file, &output)
            }
            Ok(Err(error)) => {
                debug!("{test_file}: error collecting output: {error}");
                super::os::terminate_child(&mut child, child_pid).await;
                Classification::fail(
                    FailureReason::Other {
                        message: error.to_string(),
                    },
                    error.to_string(),
                )
            }
            Err(_) => {
                debug!("{test_file}: timed out after {:?}, killing", self.timeout);
                super::os::terminate_child(&mut child, child_pid).await;
                Classification::fail(FailureReason::Timeout, TIMEOUT_DIAGNOSTIC)
            }
        }
    }
}

impl fmt::Debug for ExecutorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorContext")
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .field("classifier", &self.classifier)
            .finish()
    }
}

async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
