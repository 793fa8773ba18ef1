//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::error::ParseControlError;
use crate::experience::ExperienceId;
use crate::filter::{ControlChange, FilterState};

/// Filter and sort flags shared by every browsing command.
///
/// Values use the same tokens as the control panel. Omitted flags keep their
/// default, so no flags at all yields the default view.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Price ceiling
    #[arg(short, long, value_name = "AMOUNT")]
    pub budget: Option<u32>,

    /// Include experiences above the budget, flagged as over budget
    #[arg(long)]
    pub show_over_budget: bool,

    /// Flight time: any, under30, 30-60, 60+
    #[arg(short, long, value_name = "BUCKET")]
    pub duration: Option<String>,

    /// Aerobatics: any, yes, no
    #[arg(short, long, value_name = "CHOICE")]
    pub aerobatics: Option<String>,

    /// Aircraft type, e.g. helicopter
    #[arg(short = 't', long = "aircraft-type", value_name = "TYPE")]
    pub aircraft_type: Option<String>,

    /// Maximum drive: any, under30, under1hr, under2hr, under3hr
    #[arg(long, value_name = "CATEGORY")]
    pub drive: Option<String>,

    /// Landmark tag the experience must list
    #[arg(short, long, value_name = "TAG")]
    pub landmark: Option<String>,

    /// Sort order, e.g. price-asc, cost-per-min-asc, drive-desc
    #[arg(short, long, value_name = "KEY")]
    pub sort: Option<String>,
}

impl FilterArgs {
    /// Build the filter state these flags describe.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first flag holding an unknown token.
    pub fn to_filter_state(&self) -> Result<FilterState, ParseControlError> {
        let mut filters = FilterState::default();

        if let Some(budget) = self.budget {
            filters.apply(ControlChange::Budget(budget));
        }
        filters.apply(ControlChange::ShowOverBudget(self.show_over_budget));

        let tokens = [
            ("duration", &self.duration),
            ("aerobatics", &self.aerobatics),
            ("type", &self.aircraft_type),
            ("drive", &self.drive),
            ("landmarks", &self.landmark),
            ("sort", &self.sort),
        ];
        for (control, value) in tokens {
            if let Some(value) = value {
                filters.apply(ControlChange::parse(control, value)?);
            }
        }

        Ok(filters)
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter flags
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Experience id
    pub id: ExperienceId,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Filter flags
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Filter flags
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write the fragment to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
