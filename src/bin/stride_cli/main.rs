// ABOUTME: Stride CLI - replay recorded runs and manage history and settings
// ABOUTME: Command-line front end over the file-backed stores and the tracking engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors
//!
//! Usage:
//! ```bash
//! # Replay a recorded run and save it to history
//! stride-cli replay morning_run.json
//!
//! # Replay with the battery-saving GPS profile without saving
//! stride-cli replay morning_run.json --accuracy balanced --dry-run
//!
//! # Browse history
//! stride-cli history list
//! stride-cli history show 4b0c2f0e-1d7a-4c55-9d0e-6a1f2b3c4d5e
//! stride-cli history summary
//!
//! # Change preferences
//! stride-cli settings set --distance-unit miles --pace-unit min/mile --speed-unit mph
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use stride::config::StrideConfig;
use stride::history::RunHistoryStore;
use stride::logging::LoggingConfig;
use stride::models::{DistanceUnit, GpsAccuracy, PaceUnit, SpeedUnit, Theme};
use stride::settings::SettingsStore;
use stride::storage::{FileStore, KeyValueStore};
use tracing::{debug, warn};

use commands::CliContext;

#[derive(Parser)]
#[command(
    name = "stride-cli",
    about = "Stride run tracker CLI",
    long_about = "Replay recorded GPS runs through the tracking engine and manage stored runs and preferences."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (default: platform data dir, or STRIDE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run a recorded fix/step stream through the tracking engine
    Replay {
        /// Recording file (JSON)
        recording: PathBuf,

        /// GPS profile (defaults to the stored preference)
        #[arg(long)]
        accuracy: Option<GpsAccuracy>,

        /// Print the result without saving it to history
        #[arg(long)]
        dry_run: bool,
    },

    /// Stored run commands
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Preference commands
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum HistoryCommand {
    /// List stored runs, newest first
    List,

    /// Show every stat of one run
    Show {
        /// Run id
        id: String,
    },

    /// Delete one run
    Delete {
        /// Run id
        id: String,
    },

    /// Delete every stored run
    Clear {
        /// Confirm the irreversible removal
        #[arg(long)]
        yes: bool,
    },

    /// Totals across stored runs
    Summary,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the stored preferences
    Show,

    /// Change one or more preferences
    Set {
        /// km or miles
        #[arg(long)]
        distance_unit: Option<DistanceUnit>,

        /// min/km or min/mile
        #[arg(long)]
        pace_unit: Option<PaceUnit>,

        /// kmh or mph
        #[arg(long)]
        speed_unit: Option<SpeedUnit>,

        /// light or dark
        #[arg(long)]
        theme: Option<Theme>,

        /// true or false
        #[arg(long, action = ArgAction::Set)]
        lock_rotation: Option<bool>,

        /// high or balanced
        #[arg(long)]
        gps_accuracy: Option<GpsAccuracy>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = StrideConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.storage = config.storage.with_data_dir(data_dir);
    }
    config.validate()?;
    debug!(data_dir = %config.storage.data_dir.display(), "Using data directory");

    let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.data_dir));
    let settings = Arc::new(SettingsStore::new(Arc::clone(&backend)));
    let history = Arc::new(RunHistoryStore::new(backend, config.storage.history_cap));

    let loaded = settings.load().await;
    if let Some(error) = &loaded.error {
        warn!("Stored settings unusable, using defaults: {error}");
    }

    let ctx = CliContext {
        config,
        settings,
        history,
    };

    match cli.command {
        Command::Replay {
            recording,
            accuracy,
            dry_run,
        } => commands::replay::run(&ctx, &recording, accuracy, dry_run).await?,
        Command::History { action } => match action {
            HistoryCommand::List => commands::history::list(&ctx).await?,
            HistoryCommand::Show { id } => commands::history::show(&ctx, &id).await?,
            HistoryCommand::Delete { id } => commands::history::delete(&ctx, &id).await?,
            HistoryCommand::Clear { yes } => commands::history::clear(&ctx, yes).await?,
            HistoryCommand::Summary => commands::history::summary(&ctx).await?,
        },
        Command::Settings { action } => match action {
            SettingsCommand::Show => commands::settings::show(&ctx).await,
            SettingsCommand::Set {
                distance_unit,
                pace_unit,
                speed_unit,
                theme,
                lock_rotation,
                gps_accuracy,
            } => {
                let changes = commands::settings::SettingsChanges {
                    distance_unit,
                    pace_unit,
                    speed_unit,
                    theme,
                    lock_rotation,
                    gps_accuracy,
                };
                commands::settings::set(&ctx, changes).await?;
            }
        },
    }

    Ok(())
}
