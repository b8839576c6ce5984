//! logmux - live multiplexed tailing of rotating, prefix-named log files.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use logmux::config::{ConfigError, ConfigLoader, MonitorConfig, MonitorOptions};
use logmux::display;
use logmux::monitor::{self, Coordinator, MonitorError, Signals};

/// Exit code: the target is not a directory.
const EXIT_NOT_A_DIRECTORY: u8 = 1;
/// Exit code: a regex is invalid or has no prefix capture group.
const EXIT_INVALID_PATTERN: u8 = 2;
/// Exit code: the shutdown hook could not be installed.
const EXIT_SHUTDOWN_HOOK: u8 = 3;
/// Exit code: the directory-change watch could not be established.
const EXIT_WATCH_FAILED: u8 = 4;
/// Exit code: unexpected I/O failure during startup.
const EXIT_STARTUP_IO: u8 = 5;
/// Exit code: more files matched at startup than the configured limit.
const EXIT_TOO_MANY_FILES: u8 = 6;

#[derive(Parser)]
#[command(
    name = "logmux",
    about = "Monitor a directory for the newest log file per prefix and print lines as they are appended",
    version
)]
struct Cli {
    /// The directory to search for log files.
    directory: PathBuf,

    /// Regex for matching file names; the first capture group identifies
    /// the prefix that groups rotations of one stream.
    #[arg(short, long)]
    pattern: Option<String>,

    /// Regex that triggers an alert when an output line matches.
    #[arg(short = 'b', long = "alert-pattern")]
    alert_pattern: Option<String>,

    /// Disable the alert pattern check.
    #[arg(short = 'n', long = "no-alert")]
    no_alert: bool,

    /// Maximum number of files to monitor.
    #[arg(short, long)]
    max_files: Option<usize>,

    /// Polling interval in milliseconds.
    #[arg(long)]
    interval: Option<u64>,

    /// Config file path (default: .logmux.toml, then ~/.config/logmux/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// CLI flags win over config-file values.
fn apply_cli_overrides(options: &mut MonitorOptions, cli: &Cli) {
    if let Some(pattern) = &cli.pattern {
        options.pattern = pattern.clone();
    }
    if let Some(alert_pattern) = &cli.alert_pattern {
        options.alert_pattern = alert_pattern.clone();
    }
    if cli.no_alert {
        options.alert = false;
    }
    if let Some(max_files) = cli.max_files {
        options.max_files = max_files;
    }
    if let Some(interval) = cli.interval {
        options.poll_interval_ms = interval;
    }
}

fn config_exit_code(error: &ConfigError) -> u8 {
    match error {
        ConfigError::NotADirectory(_) => EXIT_NOT_A_DIRECTORY,
        ConfigError::InvalidPattern { .. }
        | ConfigError::MissingCaptureGroup(_)
        | ConfigError::Parse { .. } => EXIT_INVALID_PATTERN,
        ConfigError::Read { .. } => EXIT_STARTUP_IO,
    }
}

fn monitor_exit_code(error: &MonitorError) -> u8 {
    match error {
        MonitorError::Watch { .. } => EXIT_WATCH_FAILED,
        MonitorError::Scan { .. } => EXIT_STARTUP_IO,
        MonitorError::TooManyFiles { .. } => EXIT_TOO_MANY_FILES,
    }
}

#[cfg(unix)]
fn install_shutdown_hook(signals: Arc<Signals>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
        tracing::info!("Shutdown requested");
        signals.request_stop();
    });
    Ok(())
}

#[cfg(not(unix))]
fn install_shutdown_hook(signals: Arc<Signals>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
        }
        signals.request_stop();
    });
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let mut options = match loader.load() {
        Ok(options) => options,
        Err(error) => {
            display::print_error(&error.to_string());
            return ExitCode::from(config_exit_code(&error));
        }
    };
    apply_cli_overrides(&mut options, &cli);

    let config = match MonitorConfig::from_options(cli.directory.clone(), &options) {
        Ok(config) => config,
        Err(error) => {
            display::print_error(&error.to_string());
            return ExitCode::from(config_exit_code(&error));
        }
    };

    display::print_banner(&config);

    let signals = Arc::new(Signals::new());
    if let Err(error) = install_shutdown_hook(Arc::clone(&signals)) {
        display::print_error(&format!("Unable to add shutdown hook: {error}"));
        return ExitCode::from(EXIT_SHUTDOWN_HOOK);
    }

    let (event_tx, mut event_rx) = monitor::channel();
    let coordinator = Coordinator::new(config, Arc::clone(&signals), event_tx);
    let worker = tokio::spawn(coordinator.run());

    // the channel closes when the coordinator drops its sender
    while let Some(event) = event_rx.recv().await {
        display::print_event(&event);
    }

    match worker.await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(error)) => {
            if let MonitorError::TooManyFiles { limit, prefixes } = &error {
                display::print_too_many_files(*limit, prefixes);
            } else {
                display::print_error(&error.to_string());
            }
            ExitCode::from(monitor_exit_code(&error))
        }
        Err(error) => {
            display::print_error(&format!("Monitor task failed: {error}"));
            ExitCode::from(EXIT_STARTUP_IO)
        }
    }
}
