//! Report formatting and printing utilities.
//!
//! Kept apart from the command logic so the output can be rendered to any writer.

use std::{
    fmt,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::core::Message;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Severity level of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found in a catalogue file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub severity: Severity,
    pub text: String,
}

impl Problem {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// Print a success line to stdout.
pub fn print_success(text: &str) {
    print_success_to(text, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(text: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());
}

/// Print problems followed by a summary line to stdout.
pub fn print_problems(problems: &[Problem], file: &Path) {
    print_problems_to(problems, file, &mut io::stdout().lock());
}

pub fn print_problems_to<W: Write>(problems: &[Problem], file: &Path, writer: &mut W) {
    let mut sorted = problems.to_vec();
    sorted.sort_by_key(|problem| problem.severity);

    for problem in &sorted {
        let label = match problem.severity {
            Severity::Error => format!("{}:", problem.severity).bold().red(),
            Severity::Warning => format!("{}:", problem.severity).bold().yellow(),
        };
        let _ = writeln!(writer, "{} {}", label, problem.text);
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file.display());
    }

    let errors = sorted
        .iter()
        .filter(|p| p.severity == Severity::Error)
        .count();
    let warnings = sorted.len() - errors;
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!(
            "{} {}, {} {}",
            errors,
            if errors == 1 { "error" } else { "errors" },
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        )
        .red()
    );
}

/// Print one catalogue entry, and its callers when `verbose`.
pub fn print_message_to<W: Write>(key: &str, message: &Message, verbose: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}  {:<13}  {}",
        format!("{}-{:04}", key, message.code()).cyan(),
        message.kind().as_str(),
        message.pattern()
    );
    if verbose {
        for caller in message.original_callers() {
            let _ = writeln!(writer, "      {} {}", "at".dimmed(), caller);
        }
    }
}
