//! Client directory CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use briefdesk_core::advisory::ClientStatus;

/// Client directory commands.
#[derive(Debug, Parser)]
pub struct ClientsCommand {
    #[command(subcommand)]
    pub action: ClientsAction,
}

/// Available client actions.
#[derive(Debug, Subcommand)]
pub enum ClientsAction {
    /// List clients with optional filters.
    List {
        /// 1-indexed page.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size.
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Filter by exact status (active, inactive, prospect).
        #[arg(long)]
        status: Option<ClientStatus>,
        /// Case-insensitive name search.
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a client by ID.
    Get {
        /// Client ID.
        id: String,
    },
    /// Top client summaries.
    Summaries {
        /// Maximum number of summaries.
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// Search a client's interaction and document history.
    History {
        /// Client ID.
        id: String,
        /// Search terms.
        #[arg(long)]
        query: String,
        /// Maximum number of hits.
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Restrict to record kinds (repeatable).
        #[arg(long)]
        types: Vec<String>,
        /// Earliest record date.
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Latest record date.
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// List a client's meetings.
    Meetings {
        /// Client ID.
        id: String,
    },
}
