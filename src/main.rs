// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use translog::app_config::{self, Config};
use translog::app_controller::Controller;
use translog::session::Console;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for translog
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// translog - interactive translator with per-user history
///
/// Register or log in, translate text through Google Translate, and review
/// everything you translated in earlier sessions.
#[derive(Parser, Debug)]
#[command(name = "translog")]
#[command(version)]
#[command(about = "Interactive translation console with per-user history")]
#[command(long_about = "translog runs an interactive menu for registering, logging in, translating text and viewing translation history.

EXAMPLES:
    translog                                   # Use conf.json in the current directory
    translog --config ~/translog.json          # Use another config file
    translog --users-db /tmp/u.db              # Override the users database path
    translog --log-level debug                 # Verbose diagnostics on stderr
    translog completions bash > translog.bash  # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. If the file does not
    exist, built-in defaults are used: users.db and translations.db in the
    current directory and the public Google Translate endpoint.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Path of the users database
    #[arg(long, env = "TRANSLOG_USERS_DB")]
    users_db: Option<PathBuf>,

    /// Path of the translation history database
    #[arg(long, env = "TRANSLOG_TRANSLATIONS_DB")]
    translations_db: Option<PathBuf>,

    /// Base URL of the translation endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

// @struct: Stderr logger with timestamps and colored levels
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the config file, or fall back to defaults when it does not exist
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = if Path::new(&options.config_path).exists() {
        Config::from_file(&options.config_path)?
    } else {
        warn!("Config file not found at {:?}, using defaults.", options.config_path);
        Config::default()
    };

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(path) = &options.users_db {
        config.storage.users_db_path = path.clone();
    }
    if let Some(path) = &options.translations_db {
        config.storage.translations_db_path = path.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        config.provider.endpoint = endpoint.clone();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Start at warn; the configured level is applied once the config is read
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Warn);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "translog", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(log_level) = &cli.log_level {
        log::set_max_level(level_filter(&log_level.clone().into()));
    }

    let config = load_config(&cli)?;
    log::set_max_level(level_filter(&config.log_level));
    debug!(
        "Users database: {:?}, translations database: {:?}",
        config.storage.users_db_path, config.storage.translations_db_path
    );

    let controller = Controller::with_config(&config)?;
    let mut console = Console::stdio();
    controller.run(&mut console).await
}
