//! Command line arguments
//!
//! Flags given here override the matching values from the configuration
//! file; see [`crate::app::cli::config::Settings::resolve`].

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "litcode-host")]
#[command(about = "Extension host for the Litcode editor")]
#[command(version)]
#[command(after_help = " * can be specified multiple times or as a comma-separated list")]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Storage namespace shared by all modules
    #[arg(short = 'n', long = "namespace", value_name = "NAME")]
    pub namespace: Option<String>,

    /// Persistent module storage file
    #[arg(
        short = 's',
        long = "storage-file",
        value_name = "FILE",
        conflicts_with = "in_memory"
    )]
    pub storage_file: Option<PathBuf>,

    /// Keep module storage in memory only
    #[arg(long = "in-memory")]
    pub in_memory: bool,

    /// Modules to leave disabled*
    #[arg(
        short = 'd',
        long = "disable",
        value_name = "IDS",
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    pub disable: Vec<String>,

    /// Force coloured log output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(
        short = 'o',
        long = "log-format",
        value_name = "FORMAT",
        value_parser = ["text", "ext", "json"]
    )]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub action: Option<Action>,
}

/// What to do once every enabled module is active
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List registered modules and their state
    Modules,

    /// Print sidebars, panels, status items, commands, keybindings and languages
    Contributions,

    /// Execute commands by id, in order
    Exec {
        #[arg(required = true, value_name = "COMMAND_ID")]
        ids: Vec<String>,
    },

    /// Resolve a key chord and execute the bound command
    Key {
        #[arg(value_name = "CHORD")]
        chord: String,
    },
}

impl Args {
    /// Colour override from the flags; `None` when neither flag is given
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
