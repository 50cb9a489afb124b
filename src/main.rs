mod config;
mod flow;
mod logging;
mod matcher;
mod models;
mod playlist;
mod ports;
mod selection_tui;
mod services;
mod ukebook;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config,
    flow::{CancelHandle, FlowError, FlowOutcome, FlowSummary, SelectionFlow, cancel_channel},
    logging::setup_logging,
    playlist::read_playlist,
    selection_tui::TerminalPresenter,
    services::catalogue::UkebookHttpAdapter,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    config: PathBuf,

    /// The input list to work through, overrides `input_list` from the config
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Console log level (default: off)
    #[arg(long, default_value = "off", env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug")]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "UKEBOOK_HELPER_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Cancel the flow on Ctrl-C while no prompt holds the terminal
fn spawn_interrupt_handler(handle: CancelHandle) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Received Ctrl+C, cancelling");
                handle.cancel();
            }
            Err(e) => log::warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });
}

/// Combine the flow result with the terminal restore.
///
/// A flow error wins over a restore error, which is then only logged.
fn settle(result: Result<FlowSummary, FlowError>, restored: Result<()>) -> Result<FlowSummary> {
    match (result, restored) {
        (Ok(summary), restored) => restored.map(|()| summary),
        (Err(error), Ok(())) => Err(error.into()),
        (Err(error), Err(restore_error)) => {
            log::error!("Failed to restore the terminal: {:?}", restore_error);
            Err(error.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Ukebook helper starting");
    log::debug!("Loading configuration from {}", args.config.display());
    let config = Config::from_file(&args.config).with_context(|| "Failed to load config")?;

    let input_path = args.input.unwrap_or_else(|| config.input_list_path());
    let entries = read_playlist(&input_path)?;
    println!("Found {} entries in {}", entries.len(), input_path.display());

    let client = UkebookHttpAdapter::connect(&config).await?;
    println!("Successfully logged in!");

    let (cancel_handle, cancel_signal) = cancel_channel();
    spawn_interrupt_handler(cancel_handle);

    let mut presenter = TerminalPresenter::start()?;
    let result = SelectionFlow::new(&entries, &client, &mut presenter, cancel_signal)
        .run()
        .await;
    let summary = settle(result, presenter.restore())?;
    match summary.outcome {
        FlowOutcome::Finished => {
            log::info!("Selection flow completed");
            println!(
                "Done: opened {} of {} entries",
                summary.opened_songs(),
                entries.len()
            );
        }
        FlowOutcome::Cancelled => {
            log::info!("Selection flow cancelled at entry {}", summary.position);
            println!("Operation cancelled by user");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;
    use crate::ports::catalogue::ClientError;

    fn summary() -> FlowSummary {
        FlowSummary {
            outcome: FlowOutcome::Finished,
            resolutions: Vec::new(),
            position: 0,
        }
    }

    fn home_page_error() -> FlowError {
        FlowError::HomePage(ClientError::InvalidReference {
            reference: "::home".to_string(),
        })
    }

    #[test]
    fn test_settle_keeps_flow_error_over_restore_error() {
        let error = settle(Err(home_page_error()), Err(eyre!("terminal gone"))).unwrap_err();

        assert!(error.downcast_ref::<FlowError>().is_some());
        assert!(error.to_string().contains("home page"));
    }

    #[test]
    fn test_settle_reports_restore_error_after_success() {
        let error = settle(Ok(summary()), Err(eyre!("terminal gone"))).unwrap_err();
        assert_eq!(error.to_string(), "terminal gone");
    }

    #[test]
    fn test_settle_success() {
        assert_eq!(settle(Ok(summary()), Ok(())).unwrap(), summary());
        assert!(settle(Err(home_page_error()), Ok(())).is_err());
    }
}
