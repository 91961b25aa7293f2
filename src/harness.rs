//! Drives a [`Collector`] the way a test-runner listener would.
//!
//! ```ignore
//! let mut suite = TestSuite::start(collector, GuardConfig::development())?;
//! suite.run_test("creates_zone", |guards| {
//!     diagcat::api_invariant!(guards, zones_enabled, "Arez-0001: Zones are not enabled.")
//! })?;
//! suite.finish()?;
//! ```

use std::fmt::Display;

use crate::{
    collector::Collector,
    core::CollectorError,
    guards::{GuardConfig, Guards},
};

pub struct TestSuite {
    collector: Collector,
    guard_config: GuardConfig,
    tests_run: usize,
    failed_tests: usize,
}

impl TestSuite {
    /// Start a suite. Loads the catalogue unless the collector is disabled.
    pub fn start(mut collector: Collector, guard_config: GuardConfig) -> Result<Self, CollectorError> {
        if collector.config().enabled {
            collector.on_test_suite_start()?;
        }
        Ok(Self {
            collector,
            guard_config,
            tests_run: 0,
            failed_tests: 0,
        })
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn failed_tests(&self) -> usize {
        self.failed_tests
    }

    /// Tests that failed only because of catalogue mismatches do not count against the suite.
    pub fn is_successful(&self) -> bool {
        self.failed_tests <= self.collector.match_failure_count()
    }

    /// Run one test body with guards attached to the collector.
    pub fn run_test<F, E>(&mut self, name: &str, test: F) -> Result<(), E>
    where
        F: FnOnce(&mut Guards<'_>) -> Result<(), E>,
        E: Display,
    {
        let result = if self.collector.config().enabled {
            self.collector.on_test_start();
            let result = {
                let mut guards = Guards::with_listener(self.guard_config, &mut self.collector);
                test(&mut guards)
            };
            self.collector.on_test_complete();
            result
        } else {
            test(&mut Guards::new(self.guard_config))
        };

        self.tests_run += 1;
        if let Err(err) = &result {
            self.failed_tests += 1;
            tracing::warn!(test = name, error = %err, "test failed");
        }
        result
    }

    /// Complete the suite and hand back the collector.
    pub fn finish(mut self) -> Result<Collector, CollectorError> {
        if self.collector.config().enabled {
            let suite_successful = self.is_successful();
            tracing::debug!(
                tests = self.tests_run,
                failed = self.failed_tests,
                suite_successful,
                "test suite finished"
            );
            self.collector.on_test_suite_complete(suite_successful)?;
        }
        Ok(self.collector)
    }
}
