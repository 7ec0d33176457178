mod app;
mod core;
mod input;
mod playback;
mod ports;
mod source;

use anyhow::Result;
use app::{replay, ConsoleNotifier};
use clap::{Parser, Subcommand};
use playback::{PlaybackConfig, SessionSupervisor};
use ports::Ports;
use source::{FileSource, LocationQuery, LocationSource, MemoryStore};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replay a group's recorded locations as a progressive trail
#[derive(Parser, Debug)]
#[command(name = "pathplay", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the groups available for playback
    Groups,

    /// Play back a group's path between two dates
    Play {
        /// Group id, as shown by `groups`
        #[arg(long)]
        group: Option<u32>,

        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,

        /// Read fixes from a JSON or CSV export instead of the built-in store
        #[arg(long)]
        file: Option<PathBuf>,

        /// Delay between two fixes, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Persist the effective settings for later runs
        #[arg(long)]
        save_settings: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = MemoryStore::sample();

    match cli.command {
        Command::Groups => {
            for group in store.groups() {
                println!("{:>3}  {}", group.id, group.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Play {
            group,
            start,
            end,
            file,
            interval_ms,
            save_settings,
        } => {
            let mut config = PlaybackConfig::load();
            if let Some(ms) = interval_ms {
                config.tick_interval_ms = ms;
            }
            if save_settings {
                config.save()?;
            }

            let query = LocationQuery {
                group_id: group,
                start_date: start,
                end_date: end,
            };
            let source: Box<dyn LocationSource> = match file {
                Some(path) => Box::new(FileSource::new(path)),
                None => Box::new(store),
            };

            Ok(play(source.as_ref(), &query, config).await)
        }
    }
}

async fn play(source: &dyn LocationSource, query: &LocationQuery, config: PlaybackConfig) -> ExitCode {
    let mut supervisor = SessionSupervisor::new(Ports::console(), config);
    // already reported to the user by the notifier
    if replay(source, query, &mut supervisor, &ConsoleNotifier).await.is_err() {
        return ExitCode::FAILURE;
    }

    let interrupted = tokio::select! {
        _ = supervisor.wait() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        info!("interrupted");
        supervisor.cancel();
    }
    info!(
        revealed = supervisor.revealed_count(),
        state = ?supervisor.state(),
        "playback finished"
    );
    ExitCode::SUCCESS
}
