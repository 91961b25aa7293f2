use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, fmt::fmt, init::init, list::list},
    exit_status::ExitStatus,
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Fmt(cmd)) => fmt(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
