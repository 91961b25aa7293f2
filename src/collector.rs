//! Collects guard messages during a test suite and keeps the catalogue in sync.
//!
//! The collector is driven by four hooks, invoked by the test runner in order:
//!
//! 1. [`Collector::on_test_suite_start`] loads the catalogue file (if it changed since the last read).
//! 2. [`Collector::on_test_start`] starts listening for guard checks.
//! 3. [`Collector::on_test_complete`] stops listening.
//! 4. [`Collector::on_test_suite_complete`] saves the catalogue, or fails when it
//!    is out of date and saving is disabled.
//!
//! While listening, every message of the form `KEY-####: text` reported through
//! [`GuardListener`] is either recorded as a new catalogue entry or matched
//! against the existing template for its code.

use std::collections::btree_map::Entry;

use crate::{
    config::CollectorConfig,
    core::{
        CallSite, CatalogStore, Catalogue, CodeParser, CollectorError, GuardKind, MatchFailure,
        Message, SaveOptions,
    },
    guards::GuardListener,
};

pub struct Collector {
    config: CollectorConfig,
    parser: CodeParser,
    store: CatalogStore,
    messages: Catalogue,
    listening: bool,
    match_failure_count: usize,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Result<Self, CollectorError> {
        let parser = CodeParser::new(&config.key).map_err(|source| CollectorError::InvalidKey {
            key: config.key.clone(),
            source,
        })?;
        let store = CatalogStore::new(config.file.clone());
        Ok(Self {
            config,
            parser,
            store,
            messages: Catalogue::new(),
            listening: false,
            match_failure_count: 0,
        })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn key(&self) -> &str {
        self.parser.key()
    }

    /// Match failures since the last suite start.
    pub fn match_failure_count(&self) -> usize {
        self.match_failure_count
    }

    pub fn messages(&self) -> &Catalogue {
        &self.messages
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Hook invoked before any test starts.
    pub fn on_test_suite_start(&mut self) -> Result<(), CollectorError> {
        self.match_failure_count = 0;
        self.listening = false;
        self.messages = self.store.load_if_stale()?;
        Ok(())
    }

    /// Hook invoked before each test.
    pub fn on_test_start(&mut self) {
        self.listening = true;
    }

    /// Hook invoked after each test.
    pub fn on_test_complete(&mut self) {
        self.listening = false;
    }

    /// Messages whose catalogue entry is out of date, in code order.
    pub fn pending_messages(&self) -> impl Iterator<Item = &Message> {
        let record_callers = self.config.record_callers;
        self.messages
            .values()
            .filter(move |message| message.needs_save(record_callers))
    }

    /// Hook invoked after all tests completed.
    ///
    /// `suite_successful` guards unobserved entries from deletion when some
    /// tests failed and may never have reached their checks.
    pub fn on_test_suite_complete(&mut self, suite_successful: bool) -> Result<(), CollectorError> {
        let pending: Vec<String> = self
            .pending_messages()
            .map(|message| message.describe(self.key()))
            .collect();
        if pending.is_empty() {
            tracing::debug!(key = self.key(), "diagnostic message catalogue is up to date");
            return Ok(());
        }

        if self.config.save_if_changed {
            self.store.save(
                &self.messages,
                SaveOptions {
                    record_callers: self.config.record_callers,
                    delete_if_unmatched: self.config.delete_if_unmatched,
                    suite_successful,
                },
            )?;
            Ok(())
        } else {
            tracing::warn!(
                key = self.key(),
                pending = pending.len(),
                "diagnostic message catalogue is out of date"
            );
            Err(CollectorError::Drift { messages: pending })
        }
    }

    /// Record `raw_message` under its code, or check it against the existing entry.
    ///
    /// Messages that do not follow the `KEY-####: text` convention are ignored.
    /// The template is checked before the kind, so a message that disagrees on
    /// both reports a pattern failure.
    pub fn match_or_record(
        &mut self,
        kind: GuardKind,
        raw_message: &str,
        call_site: &CallSite,
    ) -> Result<(), MatchFailure> {
        let Some((code, text)) = self.parser.parse(raw_message) else {
            return Ok(());
        };

        let message = match self.messages.entry(code) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(key = self.parser.key(), code, %kind, "recording new diagnostic message");
                entry
                    .insert(Message::observed(code, kind, text))
                    .record_caller(call_site.clone());
                return Ok(());
            }
        };

        message.record_caller(call_site.clone());

        if !message.template().matches(text) {
            self.match_failure_count += 1;
            tracing::warn!(key = self.parser.key(), code, %call_site, "diagnostic message does not match template");
            return Err(MatchFailure::Pattern {
                kind,
                key: self.parser.key().to_string(),
                code,
                pattern: message.pattern().to_string(),
                actual: text.to_string(),
            });
        }

        if message.kind() != kind {
            self.match_failure_count += 1;
            tracing::warn!(key = self.parser.key(), code, %call_site, "diagnostic message kind changed");
            return Err(MatchFailure::Kind {
                key: self.parser.key().to_string(),
                code,
                expected: message.kind(),
                actual: kind,
            });
        }

        Ok(())
    }
}

impl GuardListener for Collector {
    fn on_guard(
        &mut self,
        kind: GuardKind,
        message: &str,
        call_site: &CallSite,
    ) -> Result<(), MatchFailure> {
        if !self.listening {
            return Ok(());
        }
        self.match_or_record(kind, message, call_site)
    }
}
