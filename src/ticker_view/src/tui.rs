//! Full-screen interactive loop.
//!
//! Terminal input is polled on the main thread; fetches and refresh timers
//! run on the tokio runtime and report back through a channel. All state
//! changes go through [`reduce`].

use std::{
    io, panic,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    time::Duration,
};

use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quote_ingestor::DataProvider;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::{
    app::{
        event::{AppEvent, Effect, FetchOutcome},
        fetch::load_chart,
        reducer::reduce,
        render,
        state::AppState,
    },
    config::AppConfig,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(runtime: Handle, provider: Arc<dyn DataProvider>, config: &AppConfig) -> Result<()> {
    install_panic_hook();
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, runtime, provider, config)
}

/// Holds the terminal in raw mode on the alternate screen until dropped.
///
/// Dropping restores the terminal on every exit path, including a failure
/// halfway through [`TerminalGuard::enter`] and unwinding panics.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    // best effort: there is nowhere left to report a failure
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Leaves the alternate screen before the panic message is printed, so it
/// stays readable.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

struct Effects {
    runtime: Handle,
    provider: Arc<dyn DataProvider>,
    tx: Sender<AppEvent>,
}

impl Effects {
    /// Carries out `effect`. Returns false once the app should stop.
    fn apply(&self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return false,
            Effect::Fetch(request) => {
                debug!(seq = request.seq, symbol = %request.params.symbol, "fetch scheduled");
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let result = load_chart(provider.as_ref(), &request)
                        .await
                        .map_err(|e| e.to_string());
                    // the receiver is gone once the UI has exited
                    let _ = tx.send(AppEvent::Fetched(FetchOutcome {
                        seq: request.seq,
                        fetched_at: Local::now(),
                        result,
                    }));
                });
            }
            Effect::ScheduleRefresh { seq, after } => {
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(AppEvent::RefreshTick { seq });
                });
            }
        }
        true
    }
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: Handle,
    provider: Arc<dyn DataProvider>,
    config: &AppConfig,
) -> Result<()> {
    let (tx, rx): (Sender<AppEvent>, Receiver<AppEvent>) = mpsc::channel();
    let effects = Effects { runtime, provider, tx };

    let mut state = AppState::new(config);
    let size = terminal.size()?;
    state.size = (size.width, size.height);
    info!(symbol = %state.request.symbol, range = %state.request.range, interval = %state.request.interval, "starting tui");

    effects.apply(Effect::Fetch(state.begin_fetch()));

    loop {
        terminal.draw(|frame| render::draw(frame, &state))?;

        let mut running = true;
        if event::poll(POLL_INTERVAL)? {
            let app_event = match event::read()? {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
                _ => None,
            };
            if let Some(app_event) = app_event {
                running &= effects.apply(reduce(&mut state, app_event));
            }
        }
        while let Ok(app_event) = rx.try_recv() {
            running &= effects.apply(reduce(&mut state, app_event));
        }

        if !running || state.should_quit {
            info!("leaving tui");
            return Ok(());
        }
    }
}
