//! Command-line interface for flightfinder.
//!
//! This module provides the CLI structure for the `flyfind` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FilterArgs, ListCommand, MapCommand, OutputFormat, RenderCommand, ShowCommand,
};

use crate::logging::Verbosity;

/// flyfind - Browse flight experiences
///
/// Filter, sort and map a catalog of flight experiences from the terminal,
/// or render the list view as an HTML fragment.
#[derive(Debug, Parser)]
#[command(name = "flyfind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the experiences dataset (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the experiences matching the filters
    List(ListCommand),

    /// Show the full details of one experience
    Show(ShowCommand),

    /// Show the map markers for the experiences matching the filters
    Map(MapCommand),

    /// Render the list view as an HTML fragment
    Render(RenderCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
