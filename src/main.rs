use std::process::ExitCode;

use clap::Parser;
use diagcat::{
    cli::{Arguments, ExitStatus},
    logging::init_tracing,
};

fn main() -> ExitCode {
    init_tracing();
    let args = Arguments::parse();

    match diagcat::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
