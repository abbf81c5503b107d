//! timewardend - the timewarden background service
//!
//! Wires together the engine and its collaborators:
//! - Service settings (TOML)
//! - Store initialization (SQLite)
//! - Foreground signal source (line-based, on stdin)
//! - Periodic usage checks (fixed delay)
//! - Block dispatch (configured command)
//!
//! Foreground signals and the periodic timer are serialized onto this one
//! task, so the engine never sees concurrent calls.

mod dispatch;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use timewarden_config::{load_settings, Settings};
use timewarden_core::{BlockDispatcher, Engine, EngineEvent, LogDispatcher};
use timewarden_store::SqliteStore;
use timewarden_util::{default_config_path, format_duration, today, MonotonicInstant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::dispatch::CommandDispatcher;
use crate::source::parse_signal;

/// timewardend - usage tracking and limit enforcement for distracting apps and websites
#[derive(Parser, Debug)]
#[command(name = "timewardend")]
#[command(about = "Usage tracking and limit enforcement service", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/timewarden/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set TIMEWARDEN_DATA_DIR env var)
    #[arg(short, long, env = "TIMEWARDEN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let settings = if args.config.exists() {
        load_settings(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?
    } else {
        info!(config_path = %args.config.display(), "No config file, using defaults");
        Settings::default()
    };

    let data_dir = args.data_dir.clone().unwrap_or_else(|| settings.data_dir.clone());
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = data_dir.join("timewarden.db");
    let store = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );
    info!(db_path = %db_path.display(), "Store initialized");

    let dispatcher: Arc<dyn BlockDispatcher> = match settings.block_command.clone() {
        Some(command) => Arc::new(CommandDispatcher::new(command)),
        None => Arc::new(LogDispatcher),
    };
    let engine = Engine::new(&settings, store, dispatcher, today());

    run(engine, settings.check_interval).await
}

async fn run(mut engine: Engine, check_interval: Duration) -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
    let mut sighup = signal(SignalKind::hangup()).context("Failed to create SIGHUP handler")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Fixed delay, not fixed rate: the timer is re-armed only after a
    // check completes, so checks cannot pile up.
    let timer = tokio::time::sleep(check_interval);
    tokio::pin!(timer);

    info!(check_interval_secs = check_interval.as_secs(), "Service running");

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully");
                break;
            }
            _ = sighup.recv() => {
                info!("Received SIGHUP, shutting down gracefully");
                break;
            }

            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let (package, url) = parse_signal(&line);
                        let events = engine.handle_foreground(
                            package.as_deref(),
                            url.as_deref(),
                            MonotonicInstant::now(),
                            today(),
                        );
                        log_events(&events);
                    }
                    Ok(None) => {
                        info!("Foreground source closed, shutting down");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read foreground signal");
                    }
                }
            }

            () = &mut timer => {
                let events = engine.periodic_check(MonotonicInstant::now(), today());
                log_events(&events);
                timer.as_mut().reset(tokio::time::Instant::now() + check_interval);
            }
        }
    }

    // Teardown ordering: leaving the select loop cancels the timer and
    // the signal source; only then is the open session force-closed and
    // the ledger flushed.
    let events = engine.shutdown(MonotonicInstant::now());
    log_events(&events);

    Ok(())
}

fn log_events(events: &[EngineEvent]) {
    for event in events {
        match event {
            EngineEvent::SessionOpened { session_id, item } => {
                info!(session_id = %session_id, item = item.label(), "Session opened");
            }
            EngineEvent::SessionClosed { session_id, item, duration } => {
                info!(
                    session_id = %session_id,
                    item = item.label(),
                    duration = %format_duration(*duration),
                    "Session closed"
                );
            }
            EngineEvent::BlockRequested { item, group_usage_millis } => {
                warn!(
                    item = item.label(),
                    group = %item.group_id,
                    group_usage = %format_duration(Duration::from_millis(*group_usage_millis)),
                    "Block requested"
                );
            }
            EngineEvent::DayRolledOver { day } => {
                info!(day = %day, "Daily usage reset");
            }
        }
    }
}
