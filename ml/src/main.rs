use std::fs;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info, info_span};

use madlib::cli::{Cli, Command};
use madlib::config::Config;
use madlib::console::{Console, ConsoleReplier};
use madlib::{Madlib, StoreManager};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = Config::log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("madlib.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    if let Some(nick) = cli.nick {
        config.nick = nick;
    }
    debug!(?config, "main: resolved config");

    // The store actor inherits this span, so its logs share the plugin's context
    let span = info_span!("madlib");
    let store = span
        .in_scope(|| StoreManager::spawn(&config.database))
        .context(format!("Failed to open madlib store at {}", config.database.display()))?;
    info!(database = %config.database.display(), "madlib store ready");

    let plugin = Madlib::new(store.clone(), Arc::new(ConsoleReplier)).with_span(span);
    let console = Console::new(plugin, config.nick.as_str(), config.channel.as_str());

    match cli.command {
        None | Some(Command::Chat) => console.run().await?,
        Some(Command::Say { text, unaddressed }) => {
            console.say(&text.join(" "), !unaddressed).await;
        }
    }

    store.shutdown().await.ok();
    Ok(())
}
