use std::fs;

use anyhow::{Context, Result};

use super::super::{args::FmtCommand, exit_status::ExitStatus, report::print_success};
use crate::core::store;

pub fn fmt(cmd: FmtCommand) -> Result<ExitStatus> {
    let config = cmd.catalogue.resolve()?;
    let path = &config.file;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let canonical = store::canonicalize(path, &content, config.record_callers)?;

    if canonical == content {
        print_success(&format!("{} is already formatted", path.display()));
        return Ok(ExitStatus::Success);
    }

    if !cmd.apply {
        println!("Would reformat {}", path.display());
        println!("Run with --apply to rewrite the file.");
        return Ok(ExitStatus::Failure);
    }

    fs::write(path, canonical).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "rewrote catalogue in canonical format");
    print_success(&format!("Formatted {}", path.display()));
    Ok(ExitStatus::Success)
}
