//! Pure state transitions for the interactive view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use quote_ingestor::{ChartRange, TimeFrame, models::request_params::normalize_symbol};
use tracing::{debug, warn};

use crate::app::{
    event::{AppEvent, Effect, FetchOutcome},
    state::{AppState, TickerInput},
};

pub const NO_DATAPOINTS: &str = "no datapoints returned (try another interval/range)";

pub fn reduce(state: &mut AppState, event: AppEvent) -> Effect {
    match event {
        AppEvent::Key(key) if key.kind != KeyEventKind::Press => Effect::None,
        AppEvent::Key(key) if is_interrupt(&key) => quit(state),
        AppEvent::Key(key) if state.input.is_some() => edit_ticker(state, key),
        AppEvent::Key(key) => handle_key(state, key),
        AppEvent::Resize(width, height) => {
            state.size = (width, height);
            Effect::None
        }
        AppEvent::Fetched(outcome) => on_fetched(state, outcome),
        AppEvent::RefreshTick { seq } => {
            // a newer fetch already started its own refresh chain
            if seq != state.fetch_seq || state.refresh_every.is_none() {
                return Effect::None;
            }
            Effect::Fetch(state.begin_fetch())
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn quit(state: &mut AppState) -> Effect {
    state.should_quit = true;
    Effect::Quit
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Effect {
    match key.code {
        KeyCode::Char('q') => quit(state),
        KeyCode::Char('r') => Effect::Fetch(state.begin_fetch()),
        KeyCode::Char('/') => {
            state.input = Some(TickerInput::new(&state.request.symbol));
            Effect::None
        }
        KeyCode::Char('1') => set_interval(state, TimeFrame::minutes(1)),
        KeyCode::Char('2') => set_interval(state, TimeFrame::minutes(5)),
        KeyCode::Char('3') => set_interval(state, TimeFrame::minutes(15)),
        KeyCode::Char('d') => set_range(state, ChartRange::OneDay),
        KeyCode::Char('w') => set_range(state, ChartRange::FiveDays),
        KeyCode::Char('c') => {
            state.view = state.view.toggled();
            Effect::None
        }
        _ => Effect::None,
    }
}

fn set_interval(state: &mut AppState, interval: TimeFrame) -> Effect {
    state.request.interval = interval;
    Effect::Fetch(state.begin_fetch())
}

fn set_range(state: &mut AppState, range: ChartRange) -> Effect {
    state.request.range = range;
    Effect::Fetch(state.begin_fetch())
}

fn edit_ticker(state: &mut AppState, key: KeyEvent) -> Effect {
    let Some(input) = state.input.as_mut() else {
        return Effect::None;
    };
    match key.code {
        KeyCode::Esc => {
            state.input = None;
            Effect::None
        }
        KeyCode::Enter => apply_ticker(state),
        KeyCode::Backspace => {
            input.pop();
            Effect::None
        }
        KeyCode::Char(ch) => {
            input.push(ch);
            Effect::None
        }
        _ => Effect::None,
    }
}

fn apply_ticker(state: &mut AppState) -> Effect {
    let Some(input) = state.input.as_mut() else {
        return Effect::None;
    };
    let typed = input.value.trim();
    if typed.is_empty() {
        state.input = None;
        return Effect::None;
    }
    match normalize_symbol(typed) {
        Ok(symbol) if symbol == state.request.symbol => {
            state.input = None;
            Effect::None
        }
        Ok(symbol) => {
            debug!(%symbol, "ticker changed");
            state.input = None;
            state.request.symbol = symbol;
            Effect::Fetch(state.begin_fetch())
        }
        Err(err) => {
            input.error = Some(err.to_string());
            Effect::None
        }
    }
}

fn on_fetched(state: &mut AppState, outcome: FetchOutcome) -> Effect {
    if outcome.seq != state.fetch_seq {
        debug!(seq = outcome.seq, current = state.fetch_seq, "ignoring stale fetch result");
        return Effect::None;
    }
    state.loading = false;
    match outcome.result {
        Ok(data) => {
            state.error = (data.closes.len() < 2).then(|| NO_DATAPOINTS.to_string());
            state.fetched_at = Some(outcome.fetched_at);
            state.data = Some(data);
        }
        Err(message) => {
            warn!(symbol = %state.request.symbol, %message, "fetch failed");
            state.error = Some(message);
        }
    }
    match state.refresh_every {
        Some(after) => Effect::ScheduleRefresh {
            seq: outcome.seq,
            after,
        },
        None => Effect::None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chart_core::Sample;
    use chrono::{Local, TimeZone, Utc};
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::{
        app::{
            fetch::ChartData,
            state::ViewMode,
        },
        config::AppConfig,
    };

    fn state() -> AppState {
        AppState::new(&AppConfig::default())
    }

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn chars(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            reduce(state, press(KeyCode::Char(ch)));
        }
    }

    fn data(closes: &[f64]) -> ChartData {
        ChartData {
            symbol: "AAPL".into(),
            range: ChartRange::OneDay,
            interval: TimeFrame::minutes(1),
            closes: closes
                .iter()
                .enumerate()
                .map(|(i, &p)| Sample::new(Utc.timestamp_opt(i as i64 * 60, 0).unwrap(), p))
                .collect(),
            bars: vec![],
        }
    }

    fn fetched(seq: u64, result: Result<ChartData, String>) -> AppEvent {
        AppEvent::Fetched(FetchOutcome {
            seq,
            fetched_at: Local::now(),
            result,
        })
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        assert_eq!(reduce(&mut s, press(KeyCode::Char('q'))), Effect::Quit);
        assert!(s.should_quit);

        let mut s = state();
        s.input = Some(TickerInput::new("AA"));
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(reduce(&mut s, ctrl_c), Effect::Quit);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut s = state();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(reduce(&mut s, AppEvent::Key(release)), Effect::None);
        assert!(!s.should_quit);
    }

    #[test]
    fn refresh_key_fetches_current_request() {
        let mut s = state();
        match reduce(&mut s, press(KeyCode::Char('r'))) {
            Effect::Fetch(req) => {
                assert_eq!(req.seq, 1);
                assert_eq!(req.params, s.request);
            }
            other => panic!("expected fetch, got {other:?}"),
        }
        assert!(s.loading);
    }

    #[test]
    fn interval_and_range_keys_refetch() {
        let mut s = state();
        for (key, expected) in [('1', "1m"), ('2', "5m"), ('3', "15m")] {
            let effect = reduce(&mut s, press(KeyCode::Char(key)));
            assert!(matches!(effect, Effect::Fetch(_)));
            assert_eq!(s.request.interval.to_string(), expected);
        }
        reduce(&mut s, press(KeyCode::Char('w')));
        assert_eq!(s.request.range, ChartRange::FiveDays);
        reduce(&mut s, press(KeyCode::Char('d')));
        assert_eq!(s.request.range, ChartRange::OneDay);
        assert_eq!(s.fetch_seq, 5);
    }

    #[test]
    fn view_toggle_does_not_fetch() {
        let mut s = state();
        assert_eq!(s.view, ViewMode::Line);
        assert_eq!(reduce(&mut s, press(KeyCode::Char('c'))), Effect::None);
        assert_eq!(s.view, ViewMode::Candles);
        reduce(&mut s, press(KeyCode::Char('c')));
        assert_eq!(s.view, ViewMode::Line);
        assert_eq!(s.fetch_seq, 0);
    }

    #[test]
    fn ticker_edit_apply() {
        let mut s = state();
        reduce(&mut s, press(KeyCode::Char('/')));
        assert_eq!(s.input.as_ref().map(|i| i.value.as_str()), Some("AAPL"));

        for _ in 0..4 {
            reduce(&mut s, press(KeyCode::Backspace));
        }
        // keys that are shortcuts outside the editor are plain text here
        chars(&mut s, "msft");
        assert_eq!(s.input.as_ref().map(|i| i.value.as_str()), Some("MSFT"));
        assert_eq!(s.request.interval.to_string(), "1m");

        match reduce(&mut s, press(KeyCode::Enter)) {
            Effect::Fetch(req) => assert_eq!(req.params.symbol, "MSFT"),
            other => panic!("expected fetch, got {other:?}"),
        }
        assert!(s.input.is_none());
        assert_eq!(s.request.symbol, "MSFT");
    }

    #[test]
    fn ticker_edit_cancel_and_noop() {
        let mut s = state();
        reduce(&mut s, press(KeyCode::Char('/')));
        chars(&mut s, "X");
        assert_eq!(reduce(&mut s, press(KeyCode::Esc)), Effect::None);
        assert!(s.input.is_none());
        assert_eq!(s.request.symbol, "AAPL");

        // unchanged symbol closes the editor without fetching
        reduce(&mut s, press(KeyCode::Char('/')));
        assert_eq!(reduce(&mut s, press(KeyCode::Enter)), Effect::None);
        assert!(s.input.is_none());

        // empty input is a cancel
        reduce(&mut s, press(KeyCode::Char('/')));
        s.input = Some(TickerInput::new("  "));
        assert_eq!(reduce(&mut s, press(KeyCode::Enter)), Effect::None);
        assert!(s.input.is_none());
        assert_eq!(s.fetch_seq, 0);
    }

    #[test]
    fn fetched_data_is_stored() {
        let mut s = state();
        reduce(&mut s, press(KeyCode::Char('r')));
        assert_eq!(reduce(&mut s, fetched(1, Ok(data(&[1.0, 2.0, 3.0])))), Effect::None);

        assert!(!s.loading);
        assert!(s.error.is_none());
        assert!(s.fetched_at.is_some());
        assert_eq!(s.data.as_ref().map(|d| d.closes.len()), Some(3));
    }

    #[test]
    fn too_few_points_sets_hint() {
        let mut s = state();
        reduce(&mut s, press(KeyCode::Char('r')));
        reduce(&mut s, fetched(1, Ok(data(&[1.0]))));
        assert_eq!(s.error.as_deref(), Some(NO_DATAPOINTS));
    }

    #[test]
    fn fetch_error_is_shown() {
        let mut s = state();
        reduce(&mut s, press(KeyCode::Char('r')));
        reduce(&mut s, fetched(1, Err("no data for ZZZZ".into())));
        assert_eq!(s.error.as_deref(), Some("no data for ZZZZ"));
        assert!(!s.loading);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut s = state();
        reduce(&mut s, press(KeyCode::Char('r')));
        reduce(&mut s, press(KeyCode::Char('2')));

        assert_eq!(reduce(&mut s, fetched(1, Ok(data(&[1.0, 2.0])))), Effect::None);
        assert!(s.loading);
        assert!(s.data.is_none());

        reduce(&mut s, fetched(2, Ok(data(&[3.0, 4.0]))));
        assert!(!s.loading);
        assert_eq!(s.data.as_ref().and_then(|d| d.last_price()), Some(4.0));
    }

    #[test]
    fn auto_refresh_keeps_a_single_chain() {
        let mut s = state();
        s.refresh_every = Some(Duration::from_secs(30));

        reduce(&mut s, press(KeyCode::Char('r')));
        let effect = reduce(&mut s, fetched(1, Ok(data(&[1.0, 2.0]))));
        assert_eq!(
            effect,
            Effect::ScheduleRefresh { seq: 1, after: Duration::from_secs(30) }
        );

        // a manual refresh supersedes the pending tick
        reduce(&mut s, press(KeyCode::Char('r')));
        assert_eq!(reduce(&mut s, AppEvent::RefreshTick { seq: 1 }), Effect::None);

        reduce(&mut s, fetched(2, Ok(data(&[1.0, 2.0]))));
        assert!(matches!(reduce(&mut s, AppEvent::RefreshTick { seq: 2 }), Effect::Fetch(req) if req.seq == 3));
    }

    #[test]
    fn resize_updates_size() {
        let mut s = state();
        reduce(&mut s, AppEvent::Resize(120, 40));
        assert_eq!(s.size, (120, 40));
    }
}
