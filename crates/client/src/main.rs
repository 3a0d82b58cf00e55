//! lifelines CLI entry point.

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use lifelines_client::cli::events::{event_draft, event_query, EventsAction};
use lifelines_client::cli::people::{person_draft, PeopleAction};
use lifelines_client::cli::{Cli, Commands, OutputFormat};
use lifelines_client::output::{format_output, pretty};
use lifelines_client::store::open_file_store;
use lifelines_client::{GatewayClient, SyncEngine};
use lifelines_core::sync::SyncOutcome;
use lifelines_core::timeline::filter_events;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config();
    let store = open_file_store(&config)?;
    let gateway = Arc::new(GatewayClient::from_config(&config));
    let engine =
        SyncEngine::new(gateway, store).with_status_window(config.status_display_window);

    let outcome = if cli.command.syncs_on_startup(cli.offline) {
        match engine.start() {
            Some(handle) => Some(handle.await?),
            None => None,
        }
    } else {
        None
    };
    if let Some(outcome) = &outcome {
        tracing::debug!(%outcome, "startup sync finished");
        if !cli.quiet && !outcome.is_synced() && !matches!(cli.command, Commands::Sync) {
            eprintln!("Working from local cache: {}", outcome);
        }
    }

    match cli.command {
        Commands::Sync => {
            let outcome = outcome.unwrap_or(SyncOutcome::AlreadyRunning);
            let report = engine.report();
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(
                        &serde_json::json!({ "sync": outcome, "report": report }),
                        cli.format
                    )
                ),
                OutputFormat::Pretty => println!("{}", pretty::format_outcome(&outcome, &report)),
            }
        }
        Commands::Status => {
            let report = engine.report();
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_status(&report)),
            }
        }
        Commands::People(people_cmd) => match people_cmd.action {
            PeopleAction::List => {
                let people = engine.people();
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&people, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_people(&people)),
                }
            }
            PeopleAction::Add {
                name,
                birth_date,
                color,
                avatar,
            } => {
                let draft = person_draft(name, birth_date, color, avatar)?;
                let written = engine.add_person(draft).await;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&written.record, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Added:\n{}", pretty::format_person(&written.record))
                    }
                }
                if let Some(error) = &written.error {
                    eprintln!("Not saved remotely: {}", error);
                }
            }
        },
        Commands::Events(events_cmd) => match events_cmd.action {
            EventsAction::List {
                person,
                category,
                search,
            } => {
                let people = engine.people();
                let events = engine.events();
                let query = event_query(person, category, search);
                let visible = filter_events(&people, &events, &query);
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&visible, cli.format)),
                    OutputFormat::Pretty => {
                        let today = Local::now().date_naive();
                        println!("{}", pretty::format_timeline(&people, &visible, today))
                    }
                }
            }
            EventsAction::Add {
                person,
                title,
                category,
                start_date,
                end_date,
                notes,
            } => {
                let draft = event_draft(person, title, category, start_date, end_date, notes)?;
                let written = engine.add_event(draft).await;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&written.record, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Added:\n{}", pretty::format_event(&written.record))
                    }
                }
                if let Some(error) = &written.error {
                    eprintln!("Not saved remotely: {}", error);
                }
            }
        },
    }

    Ok(())
}
