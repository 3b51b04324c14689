//! Meeting CLI commands.

use clap::{Parser, Subcommand};

/// Meeting schedule commands.
#[derive(Debug, Parser)]
pub struct MeetingsCommand {
    #[command(subcommand)]
    pub action: MeetingsAction,
}

/// Available meeting actions.
#[derive(Debug, Subcommand)]
pub enum MeetingsAction {
    /// List meetings still on the calendar.
    Upcoming,
    /// Get a meeting by ID.
    Get {
        /// Meeting ID.
        id: String,
    },
}
