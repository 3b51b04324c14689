//! briefdesk CLI entry point.

mod cli;
mod config;
mod output;
mod query;
mod service;
mod source;
mod state;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use briefdesk_core::api::{BriefRequest, ClientListQuery, HistorySearchQuery};

use crate::cli::clients::ClientsAction;
use crate::cli::meetings::MeetingsAction;
use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::output::{format_output, pretty};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber: BRIEFDESK_LOG wins over RUST_LOG.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("BRIEFDESK_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| "briefdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let state = AppState::build(cli.mode, &cli.base_url, &config)?;
    let service = &state.service;

    match cli.command {
        Commands::Dashboard => {
            let dashboard = service.dashboard_overview().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&dashboard, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_dashboard(&dashboard)),
            }
        }
        Commands::Clients(clients_cmd) => match clients_cmd.action {
            ClientsAction::List {
                page,
                limit,
                status,
                search,
            } => {
                let mut query = ClientListQuery::new().with_page(page).with_limit(limit);
                if let Some(status) = status {
                    query = query.with_status(status);
                }
                if let Some(search) = search {
                    query = query.with_search(search);
                }
                let clients = service.list_clients(&query).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&clients, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_clients_page(&clients)),
                }
            }
            ClientsAction::Get { id } => {
                let client = service.get_client(&id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&client, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_client(&client)),
                }
            }
            ClientsAction::Summaries { limit } => {
                let summaries = service.client_summaries(limit).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&summaries, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_summaries(&summaries)),
                }
            }
            ClientsAction::History {
                id,
                query,
                limit,
                types,
                start_date,
                end_date,
            } => {
                let mut history_query = HistorySearchQuery::new(query).with_limit(limit);
                if !types.is_empty() {
                    history_query = history_query.with_types(types);
                }
                if let (Some(start), Some(end)) = (start_date, end_date) {
                    history_query = history_query.with_date_range(start, end);
                }
                let results = service.search_history(&id, &history_query).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&results, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_history(&results)),
                }
            }
            ClientsAction::Meetings { id } => {
                let meetings = service.meetings_for_client(&id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&meetings, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_meetings(&meetings)),
                }
            }
        },
        Commands::Meetings(meetings_cmd) => match meetings_cmd.action {
            MeetingsAction::Upcoming => {
                let meetings = service.upcoming_meetings().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&meetings, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_meetings(&meetings)),
                }
            }
            MeetingsAction::Get { id } => {
                let meeting = service.get_meeting(&id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&meeting, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_meeting(&meeting)),
                }
            }
        },
        Commands::Brief {
            client_id,
            meeting_date,
            force_refresh,
        } => {
            let date = meeting_date.unwrap_or_else(|| Utc::now().date_naive());
            let mut request = BriefRequest::new(date);
            if force_refresh {
                request = request.forced();
            }
            let brief = service.generate_brief(&client_id, &request).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&brief, cli.format)),
                OutputFormat::Pretty => {
                    if !cli.quiet && force_refresh {
                        println!("Regenerated from upstream sources.");
                    }
                    println!("{}", pretty::format_brief(&brief));
                }
            }
        }
    }

    Ok(())
}
