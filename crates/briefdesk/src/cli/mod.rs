//! CLI command definitions.

pub mod clients;
pub mod meetings;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::SourceMode;

/// Meeting-preparation assistant for financial advisors.
#[derive(Debug, Parser)]
#[command(name = "briefdesk")]
#[command(about = "Meeting-preparation assistant for financial advisors", long_about = None)]
pub struct Cli {
    /// Advisor API base URL.
    #[arg(long, env = "BRIEFDESK_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Data source backing the session.
    #[arg(long, env = "BRIEFDESK_MODE", value_enum, default_value = "mock")]
    pub mode: SourceMode,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Advisor dashboard overview.
    Dashboard,
    /// Client directory.
    Clients(clients::ClientsCommand),
    /// Meeting schedule.
    Meetings(meetings::MeetingsCommand),
    /// Generate a meeting-preparation brief for a client.
    Brief {
        /// Client ID.
        client_id: String,
        /// Meeting date the brief prepares for (defaults to today).
        #[arg(long)]
        meeting_date: Option<NaiveDate>,
        /// Regenerate even if a cached brief is still fresh.
        #[arg(long)]
        force_refresh: bool,
    },
}
