use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use super::{CallSite, MessageTemplate};

/// The kind of guard check that emitted a diagnostic message.
///
/// Serialized by name (`"INVARIANT"`), which is the on-disk representation
/// in catalogue files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardKind {
    /// An unconditional failure.
    Fail,
    /// An internal invariant; a violation indicates a bug in the library.
    Invariant,
    /// An api invariant; a violation indicates misuse by the library user.
    ApiInvariant,
}

impl GuardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardKind::Fail => "FAIL",
            GuardKind::Invariant => "INVARIANT",
            GuardKind::ApiInvariant => "API_INVARIANT",
        }
    }
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalogue entry: the template registered for one diagnostic code.
///
/// `original_callers` is what the catalogue file recorded when it was loaded,
/// `callers` is what has been observed since the current suite started.
#[derive(Debug, Clone)]
pub struct Message {
    code: u16,
    kind: GuardKind,
    template: MessageTemplate,
    is_new: bool,
    original_callers: BTreeSet<CallSite>,
    callers: BTreeSet<CallSite>,
}

impl Message {
    /// A message read from an existing catalogue.
    pub fn loaded(
        code: u16,
        kind: GuardKind,
        pattern: impl Into<String>,
        original_callers: BTreeSet<CallSite>,
    ) -> Self {
        Self {
            code,
            kind,
            template: MessageTemplate::compile(pattern),
            is_new: false,
            original_callers,
            callers: BTreeSet::new(),
        }
    }

    /// A message first seen during the current run. Its observed text becomes the template.
    pub fn observed(code: u16, kind: GuardKind, text: impl Into<String>) -> Self {
        Self {
            code,
            kind,
            template: MessageTemplate::compile(text),
            is_new: true,
            original_callers: BTreeSet::new(),
            callers: BTreeSet::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn kind(&self) -> GuardKind {
        self.kind
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn pattern(&self) -> &str {
        self.template.as_str()
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn original_callers(&self) -> &BTreeSet<CallSite> {
        &self.original_callers
    }

    pub fn callers(&self) -> &BTreeSet<CallSite> {
        &self.callers
    }

    /// Record an observed call site. Recording the same site twice is a no-op.
    pub fn record_caller(&mut self, caller: CallSite) {
        self.callers.insert(caller);
    }

    /// Treat every call site loaded from the catalogue as observed.
    pub fn restore_original_callers(&mut self) {
        self.callers.extend(self.original_callers.iter().cloned());
    }

    /// Whether the persisted catalogue no longer describes this message.
    ///
    /// True if the message is new, if it was never observed this run, or (when
    /// callers are recorded) if the observed call sites differ from the loaded ones.
    pub fn needs_save(&self, record_callers: bool) -> bool {
        self.is_new
            || (record_callers && self.original_callers != self.callers)
            || self.callers.is_empty()
    }

    /// Render as `KEY-####: pattern`.
    pub fn describe(&self, key: &str) -> String {
        format!("{}-{:04}: {}", key, self.code, self.pattern())
    }
}
