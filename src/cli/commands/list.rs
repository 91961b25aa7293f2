use std::io::{self, Write};

use anyhow::Result;

use super::super::{args::ListCommand, exit_status::ExitStatus, report::print_message_to};
use crate::core::store;

pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let config = cmd.catalogue.resolve()?;
    if !config.file.exists() {
        anyhow::bail!("{} does not exist", config.file.display());
    }
    let messages = store::load(&config.file)?;

    let mut stdout = io::stdout().lock();
    for message in messages.values() {
        print_message_to(&config.key, message, cmd.verbose, &mut stdout);
    }
    stdout.flush()?;

    Ok(ExitStatus::Success)
}
