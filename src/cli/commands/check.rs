use std::{fs, path::Path};

use anyhow::Result;

use super::super::{
    args::CheckCommand,
    exit_status::ExitStatus,
    report::{Problem, Severity, print_problems, print_success},
};
use crate::core::store;

/// Codes are rendered with exactly four digits.
const MAX_CODE: u16 = 9999;

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let config = cmd.catalogue.resolve()?;
    let path = &config.file;

    let (checked, problems) = match fs::read_to_string(path) {
        Ok(content) => check_catalogue(path, &content, &config.key, config.record_callers),
        Err(err) => (
            0,
            vec![Problem::error(format!(
                "Failed to read {}: {}",
                path.display(),
                err
            ))],
        ),
    };

    if problems.is_empty() {
        print_success(&format!(
            "Checked {} {} in {}",
            checked,
            if checked == 1 { "message" } else { "messages" },
            path.display()
        ));
        return Ok(ExitStatus::Success);
    }

    print_problems(&problems, path);
    let errors = problems
        .iter()
        .filter(|p| p.severity == Severity::Error)
        .count();
    Ok(ExitStatus::from_problems(errors))
}

/// Validate catalogue content. Returns the number of entries and every problem found.
pub fn check_catalogue(
    path: &Path,
    content: &str,
    key: &str,
    record_callers: bool,
) -> (usize, Vec<Problem>) {
    let messages = match store::parse(path, content) {
        Ok(messages) => messages,
        Err(err) => return (0, vec![Problem::error(format!("{:#}", anyhow::Error::new(err)))]),
    };

    let mut problems = Vec::new();
    for message in messages.values() {
        if message.code() == 0 || message.code() > MAX_CODE {
            problems.push(Problem::error(format!(
                "{}-{}: code must be between 1 and {}",
                key,
                message.code(),
                MAX_CODE
            )));
        }
        if message.pattern().trim().is_empty() {
            problems.push(Problem::warning(format!(
                "{}-{:04}: empty message pattern",
                key,
                message.code()
            )));
        }
    }

    match store::canonicalize(path, content, record_callers) {
        Ok(canonical) if canonical != content => problems.push(Problem::warning(
            "file is not in canonical format (run `diagcat fmt --apply`)",
        )),
        _ => {}
    }

    (messages.len(), problems)
}
