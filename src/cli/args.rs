//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Validate a catalogue file (duplicates, code width, formatting)
//! - `list`: Print the messages of a catalogue
//! - `fmt`: Rewrite a catalogue in canonical order and formatting
//! - `init`: Create a `.diagcatrc.json` configuration file

use std::{env, path::PathBuf};

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::{CollectorConfig, load_config};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Selects the catalogue a command works on.
#[derive(Debug, Clone, Args)]
pub struct CatalogueArgs {
    /// Catalogue file (overrides config file)
    pub file: Option<PathBuf>,

    /// Message key prefix (overrides config file)
    #[arg(long, env = "DIAGCAT_KEY")]
    pub key: Option<String>,
}

impl CatalogueArgs {
    /// Merge the arguments over the nearest `.diagcatrc.json`.
    pub fn resolve(&self) -> Result<CollectorConfig> {
        let mut config = load_config(&env::current_dir()?)?.config;
        if let Some(file) = &self.file {
            config.file = file.clone();
        }
        if let Some(key) = &self.key {
            config.key = key.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub catalogue: CatalogueArgs,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub catalogue: CatalogueArgs,

    /// Also print the recorded callers of each message
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct FmtCommand {
    #[command(flatten)]
    pub catalogue: CatalogueArgs,

    /// Actually rewrite the file (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a diagnostic message catalogue
    Check(CheckCommand),
    /// List the messages of a catalogue
    List(ListCommand),
    /// Rewrite a catalogue in canonical order and formatting
    Fmt(FmtCommand),
    /// Initialize a new .diagcatrc.json configuration file
    Init,
}
