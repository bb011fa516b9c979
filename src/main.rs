mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod dataset;
mod exporter;
mod loader;
mod logging;
mod session;
mod sheets;
mod ui;

use crate::config::Config;
use crate::consts::dashboard_consts::DATE_FORMAT;
use crate::consts::export_consts::ACCESS_TOKEN_ENV;
use crate::session::{run_headless_mode, run_tui_mode};
use crate::sheets::SheetsClient;
use crate::sheets::auth::{InstalledAppFlow, StaticToken, TokenSource};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the period summary dashboard
    Dashboard {
        /// Path to a JSON configuration file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Print the summary once instead of opening the interactive view
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Period start (DD/MM/YYYY)
        #[arg(long, value_name = "DATE", value_parser = parse_date, requires = "headless")]
        start: Option<NaiveDate>,

        /// Period end (DD/MM/YYYY)
        #[arg(long, value_name = "DATE", value_parser = parse_date, requires = "headless")]
        end: Option<NaiveDate>,

        /// Disable background colors in the dashboard
        #[arg(long = "no-background-color", action = clap::ArgAction::SetTrue)]
        no_background_color: bool,
    },
    /// Export the configured worksheets as snapshot files
    Export {
        /// Path to a JSON configuration file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Spreadsheet URL, overriding the configured one
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Directory the snapshots are written to
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Write the default configuration to a file
    InitConfig {
        #[arg(long, value_name = "PATH")]
        path: PathBuf,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected DD/MM/YYYY: {}", e))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    match args.command {
        Command::Dashboard {
            config,
            headless,
            start,
            end,
            no_background_color,
        } => {
            let config = Config::load_or_default(config.as_deref())
                .map_err(|e| format!("Failed to load config: {}", e))?;
            if headless {
                logging::init_console_logger();
                if run_headless_mode(&config.dashboard, start, end).is_err() {
                    // Already reported by the headless session.
                    std::process::exit(1);
                }
                Ok(())
            } else {
                run_tui_mode(config.dashboard, !no_background_color)
            }
        }
        Command::Export {
            config,
            url,
            output_dir,
        } => {
            logging::init_console_logger();
            let config = Config::load_or_default(config.as_deref())
                .map_err(|e| format!("Failed to load config: {}", e))?;
            let export = config.export;
            let url = url.unwrap_or_else(|| export.sheet_url.clone());
            let output_dir = output_dir.unwrap_or_else(|| export.output_dir.clone());

            let tokens: Box<dyn TokenSource> = match std::env::var(ACCESS_TOKEN_ENV) {
                Ok(token) if !token.trim().is_empty() => Box::new(StaticToken::new(token)),
                _ => Box::new(InstalledAppFlow::new(
                    export.credentials_path(),
                    export.token_cache_path(),
                )?),
            };
            let client = SheetsClient::new(tokens)?;

            let report = exporter::export_all(&client, &url, &export.tabs, &output_dir).await;
            if report.all_failed() {
                return Err(Box::from(format!(
                    "All {} tabs failed to export",
                    report.failed()
                )));
            }
            Ok(())
        }
        Command::InitConfig { path } => {
            Config::default()
                .save(&path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Configuration written", "{}", path.display());
            Ok(())
        }
    }
}
