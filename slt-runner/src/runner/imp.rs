// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::executor::ExecutorContext;
use crate::{
    classify::{Classify, ExitStatusClassifier},
    config::HarnessConfig,
    discovery::discover_test_files,
    errors::{RunSetupError, TestRunnerBuildError, TestRunnerExecuteError},
    reporter::events::{HarnessEvent, RunSummary},
};
use camino::Utf8PathBuf;
use futures::prelude::*;
use std::{convert::Infallible, num::NonZeroUsize, sync::Arc};
use tokio::runtime::Runtime;
use tracing::debug;

/// Test runner options.
#[derive(Debug, Default)]
pub struct TestRunnerBuilder {
    classifier: Option<Arc<dyn Classify>>,
}

impl TestRunnerBuilder {
    /// Sets the classifier used to decide whether a completed target run passed.
    ///
    /// Defaults to [`ExitStatusClassifier`].
    pub fn set_classifier(&mut self, classifier: Arc<dyn Classify>) -> &mut Self {
        self.classifier = Some(classifier);
        self
    }

    /// Creates a new test runner.
    pub fn build(&self, config: &HarnessConfig) -> Result<TestRunner, TestRunnerBuildError> {
        let classifier = self
            .classifier
            .clone()
            .unwrap_or_else(|| Arc::new(ExitStatusClassifier));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("slt-runner-worker")
            .build()
            .map_err(TestRunnerBuildError::TokioRuntimeCreate)?;

        Ok(TestRunner {
            test_dir: config.test_dir().to_owned(),
            test_suffix: config.test_suffix().to_owned(),
            test_threads: config.test_threads(),
            executor: ExecutorContext::new(config.target(), config.timeout(), classifier),
            runtime,
        })
    }
}

/// Context for running a corpus of test files.
///
/// Created using [`TestRunnerBuilder::build`].
#[derive(Debug)]
pub struct TestRunner {
    test_dir: Utf8PathBuf,
    test_suffix: String,
    test_threads: NonZeroUsize,
    executor: ExecutorContext,
    runtime: Runtime,
}

impl TestRunner {
    /// Executes the run, calling the callback for each event.
    ///
    /// Returns the final summary, or an error if the run could not be set up.
    pub fn execute<F>(self, mut callback: F) -> Result<RunSummary, RunSetupError>
    where
        F: FnMut(HarnessEvent),
    {
        self.try_execute::<Infallible, _>(|event| {
            callback(event);
            Ok(())
        })
        .map_err(|error| match error {
            TestRunnerExecuteError::Setup(error) => error,
            TestRunnerExecuteError::Report(never) => match never {},
        })
    }

    /// Executes the run, calling the callback for each event.
    ///
    /// The target binary is checked and test files are discovered before any event is produced.
    /// Test files are then run in discovery order, up to `test-threads` at a time, and their
    /// outcomes are passed to the callback in that same order. If the callback returns an error,
    /// the run is stopped and any target processes still running are killed.
    pub fn try_execute<E, F>(self, mut callback: F) -> Result<RunSummary, TestRunnerExecuteError<E>>
    where
        F: FnMut(HarnessEvent) -> Result<(), E>,
    {
        let res = self.try_execute_inner(&mut callback);
        // Don't block on processes that might still be exiting.
        self.runtime.shutdown_background();
        res
    }

    fn try_execute_inner<E, F>(
        &self,
        callback: &mut F,
    ) -> Result<RunSummary, TestRunnerExecuteError<E>>
    where
        F: FnMut(HarnessEvent) -> Result<(), E>,
    {
        let target = self.executor.target();
        if !target.exists() {
            return Err(TestRunnerExecuteError::Setup(
                RunSetupError::TargetNotFound {
                    path: target.to_owned(),
                },
            ));
        }

        let test_files = discover_test_files(&self.test_dir, &self.test_suffix)
            .map_err(|error| TestRunnerExecuteError::Setup(error.into()))?;
        debug!(
            "running {} test files with {} threads",
            test_files.len(),
            self.test_threads,
        );

        callback(HarnessEvent::RunStarted {
            file_count: test_files.len(),
        })
        .map_err(TestRunnerExecuteError::Report)?;

        let executor = &self.executor;
        let mut summary = RunSummary::default();
        self.runtime.block_on(async {
            // `buffered` yields outcomes in input order, regardless of which finishes first.
            let mut outcomes = futures::stream::iter(test_files)
                .map(|test_file| executor.run_test_file(test_file))
                .buffered(self.test_threads.get());

            while let Some(outcome) = outcomes.next().await {
                summary.record(&outcome);
                callback(HarnessEvent::FileFinished { outcome, summary })
                    .map_err(TestRunnerExecuteError::Report)?;
            }
            Ok::<_, TestRunnerExecuteError<E>>(())
        })?;

        callback(HarnessEvent::RunFinished { summary }).map_err(TestRunnerExecuteError::Report)?;
        Ok(summary)
    }
}
