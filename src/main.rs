use clap::{Parser, Subcommand};
use soulchart_client::config::{load_config, AppConfig, API_BASE_URL};
use soulchart_client::download::download_report;
use soulchart_client::{
    AnalysisApi, AnalysisOutcome, DisplayState, HttpAnalysisApi, NameAnalysisHandler, StdoutSink,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "soulchart-client", version, about = "Request name analyses from the SoulChart service")]
struct Cli {
    /// Path to the optional JSON config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a name and print the download link
    Analyze {
        /// Name to analyze, sent as-is
        name: String,
        /// Also save the report; `--download=DIR` picks the directory, bare `--download` uses the configured one
        #[arg(long, num_args = 0..=1, require_equals = true, value_name = "DIR")]
        download: Option<Option<PathBuf>>,
    },
    /// Show whether the service is up and which endpoints it offers
    Status,
}

/// Loads the config, reporting failures on stderr since logging is not set up yet.
fn load_settings(path: &Path) -> Result<AppConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Config load error: {}", e);
        ExitCode::FAILURE
    })
}

/// `RUST_LOG` wins over the configured level. Returns a warning when a directive had to be skipped.
fn log_filter(env_directive: Option<&str>, configured: &str) -> (EnvFilter, Option<String>) {
    let mut skipped = Vec::new();
    if let Some(directive) = env_directive {
        match EnvFilter::try_new(directive) {
            Ok(filter) => return (filter, None),
            Err(e) => skipped.push(format!("RUST_LOG {:?} ({})", directive, e)),
        }
    }
    match EnvFilter::try_new(configured) {
        Ok(filter) => (filter, skipped.pop().map(|s| format!("ignoring invalid {}", s))),
        Err(e) => {
            skipped.push(format!("log_level {:?} ({})", configured, e));
            let warning = format!("ignoring invalid {}; logging at info", skipped.join(", "));
            (EnvFilter::new("info"), Some(warning))
        }
    }
}

/// Exit status for the terminal state of an analysis.
fn outcome_exit_code(outcome: &AnalysisOutcome) -> ExitCode {
    match outcome {
        AnalysisOutcome::Completed(_) | AnalysisOutcome::Superseded => ExitCode::SUCCESS,
        AnalysisOutcome::ApiError { .. } | AnalysisOutcome::ConnectionError { .. } => {
            ExitCode::FAILURE
        }
    }
}

/// Directory to save the report in, or `None` when no download was asked for.
fn download_dir(flag: Option<Option<PathBuf>>, config: &AppConfig) -> Option<PathBuf> {
    flag.map(|dir| dir.unwrap_or_else(|| PathBuf::from(&config.download_dir)))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_settings(&cli.config) {
        Ok(cfg) => cfg,
        Err(code) => return code,
    };

    // stdout is the display region; logs go to stderr
    let rust_log = std::env::var("RUST_LOG").ok();
    let (filter, filter_warning) = log_filter(rust_log.as_deref(), &config.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(warning) = filter_warning {
        // printed directly: the fallback filter may hide warn-level events
        eprintln!("{}", warning);
    }

    let api = match HttpAnalysisApi::new(API_BASE_URL) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Analyze { name, download } => {
            let handler = NameAnalysisHandler::new(api.clone(), Arc::new(StdoutSink));
            let outcome = handler.analyze(name).await;

            let AnalysisOutcome::Completed(report) = &outcome else {
                return outcome_exit_code(&outcome);
            };
            let Some(dir) = download_dir(download, &config) else {
                return ExitCode::SUCCESS;
            };
            match download_report(
                api.as_ref(),
                &report.download_url,
                report.filename.as_deref(),
                &dir,
            )
            .await
            {
                Ok(path) => {
                    println!("Saved to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    warn!("Download failed: {}", e);
                    println!("Download failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Status => match api.service_info().await {
            Ok(service) => {
                info!("Service at {} answered", api.base_url());
                println!("{} ({})", service.message, service.status);
                for endpoint in &service.endpoints {
                    println!("  {}", endpoint);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                let state = DisplayState::ConnectionError {
                    reason: e.to_string(),
                    base_url: api.base_url().to_string(),
                };
                println!("{}", state);
                ExitCode::FAILURE
            }
        },
    }
}
