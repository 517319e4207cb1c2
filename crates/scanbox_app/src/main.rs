//! scanbox - headless driver for the scan page
//!
//! - `run` plays a JSON scenario against the page and prints the report
//! - `check` validates a page config

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use scanbox_app::headless_runtime::HeadlessRunConfig;
use scanbox_app::headless_scenario::HeadlessScenario;
use scanbox_app::{run_loaded_scenario, PageConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless driver for the scroll-linked gift-box scan
#[derive(Parser, Debug)]
#[command(name = "scanbox")]
#[command(about = "Headless driver for the scroll-linked gift-box scan")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scenario and report the outcome
    Run {
        /// Scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Page config (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the JSON report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,
    },
    /// Validate a page config
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    match Args::parse().command {
        Command::Run {
            scenario,
            config,
            report,
            tick_ms,
        } => {
            let page_config = match config {
                Some(path) => PageConfig::load(&path)?,
                None => PageConfig::default(),
            };
            let scenario = HeadlessScenario::from_path(&scenario)?;
            if !scenario.has_assertions() {
                tracing::warn!(steps = scenario.steps.len(), "scenario has no assertions");
            }
            let runtime_cfg = HeadlessRunConfig {
                tick_ms,
                ..Default::default()
            };

            let outcome = run_loaded_scenario(&page_config, &scenario, runtime_cfg)?;
            outcome.report().write_to_writer(&mut std::io::stdout().lock())?;
            if let Some(path) = report {
                outcome.report().write_to_path(&path)?;
            }
            if outcome.is_failed() {
                bail!("scenario failed");
            }
            Ok(())
        }
        Command::Check { config } => {
            let page_config = PageConfig::load(&config)?;
            if page_config.layout.scanner_offset.is_none() {
                tracing::warn!("no scanner_offset set, setup will fail without a scanner section");
            }
            tracing::info!(path = %config.display(), "config ok");
            Ok(())
        }
    }
}
