use std::{io, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use quote_ingestor::{DataProvider, YahooProvider};
use ticker_view::{
    cli::{Cli, Mode},
    config::AppConfig,
    logging::{self, LogTarget},
    print, tui,
};
use tracing::info;

const DEFAULT_PRINT_SIZE: (u16, u16) = (100, 30);

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("failed to load configuration")?;

    let target = match cli.mode {
        Mode::Tui => LogTarget::File(config.log_file.clone()),
        Mode::Print => LogTarget::Stderr,
    };
    logging::init(&target)?;
    info!(mode = ?cli.mode, symbol = %config.request.symbol, "ticker-forge starting");

    let provider: Arc<dyn DataProvider> = Arc::new(
        match &config.yahoo_base_url {
            Some(url) => YahooProvider::with_base_url(url),
            None => YahooProvider::new(),
        }
        .context("failed to create data provider")?,
    );

    let runtime = tokio::runtime::Runtime::new()?;
    match cli.mode {
        Mode::Tui => tui::run(runtime.handle().clone(), provider, &config),
        Mode::Print => {
            let (term_w, term_h) = crossterm::terminal::size().unwrap_or(DEFAULT_PRINT_SIZE);
            let width = cli.width.unwrap_or(term_w);
            let height = cli.height.unwrap_or(term_h);
            runtime.block_on(print::run(
                provider.as_ref(),
                &config,
                width.into(),
                height.into(),
                &mut io::stdout().lock(),
            ))
        }
    }
}
