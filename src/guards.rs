//! Guard checks and the listener hook used to observe them.
//!
//! A [`Guards`] context evaluates invariant checks according to a
//! [`GuardConfig`]. In development mode every check is first reported to the
//! attached [`GuardListener`] (normally a
//! [`Collector`](crate::collector::Collector)) together with its message and
//! call site, before the condition itself is evaluated.
//!
//! ```ignore
//! let mut guards = Guards::with_listener(GuardConfig::development(), &mut collector);
//! diagcat::invariant!(guards, count > 0, "Arez-0012: Count {} must be positive", count)?;
//! ```

use crate::core::{CallSite, GuardKind, MatchFailure};

/// Environment variable selecting `development` or `production` behaviour.
pub const ENVIRONMENT_VAR: &str = "DIAGCAT_ENVIRONMENT";
pub const VERBOSE_ERROR_MESSAGES_VAR: &str = "DIAGCAT_VERBOSE_ERROR_MESSAGES";
pub const CHECK_INVARIANTS_VAR: &str = "DIAGCAT_CHECK_INVARIANTS";
pub const CHECK_API_INVARIANTS_VAR: &str = "DIAGCAT_CHECK_API_INVARIANTS";

/// Receives every guard check evaluated while development diagnostics are active.
pub trait GuardListener {
    fn on_guard(
        &mut self,
        kind: GuardKind,
        message: &str,
        call_site: &CallSite,
    ) -> Result<(), MatchFailure>;
}

/// How guard checks behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    /// Report checks to the attached listener.
    pub development: bool,
    /// Include the message in violations.
    pub verbose_error_messages: bool,
    /// Evaluate `invariant` conditions and `fail` calls.
    pub check_invariants: bool,
    /// Evaluate `api_invariant` conditions.
    pub check_api_invariants: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl GuardConfig {
    pub fn development() -> Self {
        Self {
            development: true,
            verbose_error_messages: true,
            check_invariants: true,
            check_api_invariants: true,
        }
    }

    pub fn production() -> Self {
        Self {
            development: false,
            verbose_error_messages: false,
            check_invariants: false,
            check_api_invariants: false,
        }
    }

    /// Read the configuration from `DIAGCAT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// The environment defaults to production; any value other than
    /// `production` selects development. Each flag is on when set to `true`,
    /// off when set to anything else, and follows the environment when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let development = lookup(ENVIRONMENT_VAR)
            .map(|value| value != "production")
            .unwrap_or(false);
        let flag = |name: &str| match lookup(name) {
            Some(value) => value == "true",
            None => development,
        };

        Self {
            development,
            verbose_error_messages: flag(VERBOSE_ERROR_MESSAGES_VAR),
            check_invariants: flag(CHECK_INVARIANTS_VAR),
            check_api_invariants: flag(CHECK_API_INVARIANTS_VAR),
        }
    }
}

/// Outcome of a failed guard check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// The checked condition was false. The message is only kept with verbose error messages.
    #[error("{}", .message.as_deref().unwrap_or("Guard check failed"))]
    Violation {
        kind: GuardKind,
        message: Option<String>,
    },

    /// The listener rejected the message against its catalogue.
    #[error(transparent)]
    Unmatched(#[from] MatchFailure),
}

/// A message supplier evaluated at most once.
struct LazyMessage<M> {
    supplier: Option<M>,
    text: Option<String>,
}

impl<M: FnOnce() -> String> LazyMessage<M> {
    fn new(supplier: M) -> Self {
        Self {
            supplier: Some(supplier),
            text: None,
        }
    }

    fn get(&mut self) -> &str {
        if self.text.is_none() {
            self.text = Some(self.supplier.take().map_or_else(String::new, |f| f()));
        }
        self.text.as_deref().unwrap_or_default()
    }

    fn into_string(mut self) -> String {
        self.get();
        self.text.unwrap_or_default()
    }
}

/// Evaluates guard checks and reports them to an optional listener.
pub struct Guards<'a> {
    config: GuardConfig,
    listener: Option<&'a mut dyn GuardListener>,
}

impl<'a> Guards<'a> {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            listener: None,
        }
    }

    pub fn with_listener(config: GuardConfig, listener: &'a mut dyn GuardListener) -> Self {
        Self {
            config,
            listener: Some(listener),
        }
    }

    pub fn config(&self) -> GuardConfig {
        self.config
    }

    /// Check an internal invariant; a false condition indicates a bug in the checked code.
    pub fn invariant<C, M>(
        &mut self,
        call_site: CallSite,
        condition: C,
        message: M,
    ) -> Result<(), GuardError>
    where
        C: FnOnce() -> bool,
        M: FnOnce() -> String,
    {
        let enabled = self.config.check_invariants;
        self.check(GuardKind::Invariant, enabled, call_site, condition, message)
    }

    /// Check an api invariant; a false condition indicates misuse by the caller.
    pub fn api_invariant<C, M>(
        &mut self,
        call_site: CallSite,
        condition: C,
        message: M,
    ) -> Result<(), GuardError>
    where
        C: FnOnce() -> bool,
        M: FnOnce() -> String,
    {
        let enabled = self.config.check_api_invariants;
        self.check(GuardKind::ApiInvariant, enabled, call_site, condition, message)
    }

    /// Fail unconditionally, unless invariant checking is disabled.
    pub fn fail<M>(&mut self, call_site: CallSite, message: M) -> Result<(), GuardError>
    where
        M: FnOnce() -> String,
    {
        let mut message = LazyMessage::new(message);
        self.notify(GuardKind::Fail, &mut message, &call_site)?;
        if self.config.check_invariants {
            return Err(self.violation(GuardKind::Fail, message));
        }
        Ok(())
    }

    fn check<C, M>(
        &mut self,
        kind: GuardKind,
        enabled: bool,
        call_site: CallSite,
        condition: C,
        message: M,
    ) -> Result<(), GuardError>
    where
        C: FnOnce() -> bool,
        M: FnOnce() -> String,
    {
        let mut message = LazyMessage::new(message);
        self.notify(kind, &mut message, &call_site)?;
        if enabled && !condition() {
            return Err(self.violation(kind, message));
        }
        Ok(())
    }

    fn notify<M: FnOnce() -> String>(
        &mut self,
        kind: GuardKind,
        message: &mut LazyMessage<M>,
        call_site: &CallSite,
    ) -> Result<(), GuardError> {
        if !self.config.development {
            return Ok(());
        }
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.on_guard(kind, message.get(), call_site)?;
        }
        Ok(())
    }

    fn violation<M: FnOnce() -> String>(
        &self,
        kind: GuardKind,
        message: LazyMessage<M>,
    ) -> GuardError {
        let message = self
            .config
            .verbose_error_messages
            .then(|| message.into_string());
        GuardError::Violation { kind, message }
    }
}

/// Check an invariant at the current call site: `invariant!(guards, condition, "format", args..)`.
#[macro_export]
macro_rules! invariant {
    ($guards:expr, $condition:expr, $($message:tt)+) => {
        $guards.invariant(
            $crate::call_site!(),
            || $condition,
            || ::std::format!($($message)+),
        )
    };
}

/// Check an api invariant at the current call site.
#[macro_export]
macro_rules! api_invariant {
    ($guards:expr, $condition:expr, $($message:tt)+) => {
        $guards.api_invariant(
            $crate::call_site!(),
            || $condition,
            || ::std::format!($($message)+),
        )
    };
}

/// Fail at the current call site.
#[macro_export]
macro_rules! fail {
    ($guards:expr, $($message:tt)+) => {
        $guards.fail($crate::call_site!(), || ::std::format!($($message)+))
    };
}
