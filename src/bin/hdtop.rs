//! hdtop - top-like monitoring console for Hadoop YARN.
//!
//! Usage:
//!   hdtop                                   # start with the configured address
//!   hdtop http://rm:8088                    # start against a given resource manager
//!   hdtop config core.hadoopAddress URI     # store the address
//!   hdtop config core.queryInterval         # print a value

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use hdtop::config::{
    Config, ConfigError, ConfigKey, ConfigStore, default_config_path, default_log_path,
};
use hdtop::tui::{App, Dashboard};

/// Top-like real-time monitoring console for Hadoop YARN.
#[derive(Parser)]
#[command(name = "hdtop", version, args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Resource manager URI; overrides `core.hadoopAddress`.
    #[arg(value_name = "URI")]
    uri: Option<String>,

    /// Path to the configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the log file. The terminal belongs to the UI, so logs go here.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the monitoring console (default).
    Start {
        /// Resource manager URI; overrides `core.hadoopAddress`.
        #[arg(value_name = "URI")]
        uri: Option<String>,
    },
    /// Print or set a configuration value.
    Config {
        /// Dotted key, e.g. `core.hadoopAddress` or `apps.displayColumn.3`.
        #[arg(value_parser = parse_config_key)]
        key: ConfigKey,
        /// New value; prints the current one when omitted.
        value: Option<String>,
    },
}

fn parse_config_key(raw: &str) -> Result<ConfigKey, String> {
    ConfigKey::parse(raw).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(args.verbose, args.quiet, &log_path);

    let result = match &args.command {
        Some(Command::Config { key, value }) => run_config(&config_path, *key, value.as_deref()),
        Some(Command::Start { uri }) => run_start(&config_path, uri.as_deref()),
        None => run_start(&config_path, args.uri.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Formats a config error together with its guidance line.
fn report(err: ConfigError) -> String {
    match err.hint() {
        Some(hint) => format!("{}\n{}", err, hint),
        None => err.to_string(),
    }
}

fn run_config(path: &Path, key: ConfigKey, value: Option<&str>) -> Result<(), String> {
    let mut store = ConfigStore::load(path).map_err(report)?;
    match value {
        None => {
            let current = store.effective(key);
            println!("{}", current.as_deref().unwrap_or("<unset>"));
        }
        Some(raw) => {
            store.set(key, raw).map_err(report)?;
        }
    }
    Ok(())
}

fn run_start(config_path: &Path, uri: Option<&str>) -> Result<(), String> {
    let store = ConfigStore::load(config_path).map_err(report)?;
    let mut config = Config::from_store(&store).map_err(report)?;
    if let Some(raw) = uri {
        config = config.with_base_uri(raw).map_err(report)?;
    }
    let base_uri = config.require_base_uri().map_err(report)?.to_string();

    info!(
        config = %config_path.display(),
        interval = config.query_interval,
        "hdtop starting"
    );

    let app = App::new(Dashboard::connect(&config, &base_uri));
    if let Err(e) = app.run() {
        error!(error = %e, "terminal error");
        return Err(format!("Terminal error: {}", e));
    }
    info!("hdtop stopped");
    Ok(())
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Sends log records to `path`. Logging is skipped if the file cannot be
/// opened; the dashboard itself does not depend on it.
fn init_logging(verbose: u8, quiet: bool, path: &Path) {
    let level = log_level(verbose, quiet);

    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {}; logging disabled",
                path.display(),
                e
            );
            return;
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("hdtop={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
