#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use kronos::config::{JsonFileStore, MemoryStore, SettingsStore};

/// Desktop alarm timer
#[derive(Debug, Parser)]
#[command(name = "kronos", version, about)]
struct Cli {
    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error (falls back to LOG_LEVEL, then info)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, conflicts_with = "reset")]
    ephemeral: bool,

    /// Delete the persisted store before starting
    #[arg(long)]
    reset: bool,
}

fn parse_log_level(value: &str) -> TraceLevel {
    match value.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn open_store(cli: &Cli) -> Result<Box<dyn SettingsStore>> {
    if cli.ephemeral {
        info!("Using in-memory settings store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let path = JsonFileStore::default_path(cli.config_dir.as_deref());
    if cli.reset {
        JsonFileStore::reset(&path)?;
    }
    let store = JsonFileStore::open(&path)
        .with_context(|| format!("Failed to open settings store at {}", path.display()))?;
    Ok(Box::new(store))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .map(|level| parse_log_level(&level))
        .unwrap_or(TraceLevel::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    // Nothing can be laid out without geometry and settings
    let store = open_store(&cli).inspect_err(|err| {
        error!(error = ?err, "Settings store unavailable, exiting");
    })?;

    kronos::gui::run_gui(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), TraceLevel::DEBUG);
        assert_eq!(parse_log_level("warn"), TraceLevel::WARN);
        assert_eq!(parse_log_level("nonsense"), TraceLevel::INFO);
    }

    #[test]
    fn test_cli_rejects_ephemeral_with_reset() {
        assert!(Cli::try_parse_from(["kronos", "--ephemeral", "--reset"]).is_err());
    }

    #[test]
    fn test_cli_parses_config_dir() {
        let cli = Cli::try_parse_from(["kronos", "--config-dir", "/tmp/k", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/k")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_open_store_ephemeral_is_seeded() {
        use kronos::config::SettingsStoreExt;
        use kronos::types::Size;

        let cli = Cli::try_parse_from(["kronos", "--ephemeral"]).unwrap();
        let store = open_store(&cli).unwrap();
        assert_eq!(store.get::<Size>("setupWindowSize"), Some(Size::new(460, 740)));
    }

    #[test]
    fn test_open_store_with_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["kronos", "--config-dir", dir.path().to_str().unwrap()]).unwrap();

        open_store(&cli).unwrap();

        assert!(dir.path().join("config.json").exists());
    }
}
