use std::{fs, time::Duration};

use clap::Parser;
use quote_ingestor::{ChartRange, TimeFrame};
use ticker_view::{
    app::{fetch::BarSource, state::ViewMode},
    cli::Cli,
    config::{AppConfig, ConfigError, FileConfig},
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn file_layer_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticker_forge.toml");
    fs::write(
        &path,
        r#"
symbol = "nvda"
range = "3mo"
interval = "1h"
view = "candles"
bars = "native"
refresh_secs = 15
log_file = "/var/tmp/tf.log"
yahoo_base_url = "http://127.0.0.1:8080"
"#,
    )
    .unwrap();

    let file = FileConfig::load(&path).unwrap();
    let cli = Cli::parse_from(["ticker-forge", "--config", path.to_str().unwrap()]);
    let config = AppConfig::resolve(file, no_env, &cli).unwrap();

    assert_eq!(config.request.symbol, "NVDA");
    assert_eq!(config.request.range, ChartRange::ThreeMonths);
    assert_eq!(config.request.interval, TimeFrame::new(1, quote_ingestor::TimeFrameUnit::Hour).unwrap());
    assert_eq!(config.view, ViewMode::Candles);
    assert_eq!(config.bar_source, BarSource::Native);
    assert_eq!(config.refresh, Some(Duration::from_secs(15)));
    assert_eq!(config.log_file.to_str(), Some("/var/tmp/tf.log"));
    assert_eq!(config.yahoo_base_url.as_deref(), Some("http://127.0.0.1:8080"));
}

#[test]
fn load_reads_the_file_named_on_the_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    fs::write(&path, "symbol = \"tsla\"\n").unwrap();

    let cli = Cli::parse_from(["ticker-forge", "-c", path.to_str().unwrap(), "--view", "candles"]);
    let config = AppConfig::load(&cli).unwrap();
    assert_eq!(config.view, ViewMode::Candles);
    // the symbol may be overridden by TICKER_FORGE_SYMBOL in the environment
    assert!(!config.request.symbol.is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.toml");
    fs::write(&path, "symbl = \"AAPL\"\n").unwrap();

    let err = FileConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("typo.toml"));
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "range = \"7d\"\n").unwrap();
    assert!(matches!(FileConfig::load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
