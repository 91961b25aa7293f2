//! diagcat - diagnostic message catalogue collector
//!
//! Libraries that guard their behaviour with invariant checks emit diagnostic
//! messages of the form `KEY-####: text`. diagcat watches those messages while
//! a test suite runs, checks each one against a persisted JSON catalogue of
//! templates (with `%s` wildcards) and, when the suite is done, keeps the
//! catalogue in sync: new codes are added, unused ones can be dropped, and the
//! call sites of every message can be recorded.
//!
//! ## Module Structure
//!
//! - `core`: Catalogue model, template matching and JSON persistence
//! - `collector`: Suite lifecycle and message matching
//! - `guards`: Invariant checks that report their messages to a listener
//! - `harness`: Minimal test-suite driver wiring guards to a collector
//! - `config`: `.diagcatrc.json` loading
//! - `logging`: Tracing setup for the binary
//! - `cli`: Command-line interface (`check`, `list`, `fmt`, `init`)

pub mod cli;
pub mod collector;
pub mod config;
pub mod core;
pub mod guards;
pub mod harness;
pub mod logging;
