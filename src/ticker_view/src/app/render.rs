//! Frame layout. Every call rasterizes from scratch; nothing is cached
//! between frames.

use chart_core::{Canvas, Cell, Direction, PlotSize, RenderError, rasterize_candles, rasterize_line};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{AppState, ViewMode};

pub const TITLE: &str = "Ticker Forge";
pub const KEY_HINTS: &str =
    "(/) change ticker  [1]=1m  [2]=5m  [3]=15m  [d]=1d, [w]=5d  [c]=candles/line";
pub const FOOTER: &str = "r=refresh • /=ticker • c=candles/line • q=quit";

/// Used before the terminal reports its size.
const FALLBACK_SIZE: (u16, u16) = (100, 30);

pub fn draw(frame: &mut Frame, state: &AppState) {
    frame.render_widget(Paragraph::new(view_lines(state)), frame.area());
}

fn subtle() -> Style {
    Style::default().fg(Color::Indexed(244))
}

fn hint() -> Style {
    subtle().add_modifier(Modifier::ITALIC)
}

/// The whole screen as styled lines, top to bottom.
pub fn view_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(KEY_HINTS, subtle())),
        Line::default(),
    ];

    if let Some(input) = &state.input {
        lines.push(Line::from(vec![
            Span::raw("Symbol: > "),
            Span::styled(input.value.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("_", Style::default().fg(Color::Indexed(205))),
        ]));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Press Enter to apply, Esc to cancel", hint())));
        if let Some(err) = &input.error {
            lines.push(error_line(err));
        }
        return lines;
    }

    if let Some(err) = &state.error {
        lines.push(error_line(err));
        return lines;
    }
    if state.loading {
        lines.push(Line::from(Span::styled("loading…", hint())));
        return lines;
    }
    let Some(data) = state.data.as_ref().filter(|d| d.closes.len() >= 2) else {
        lines.push(Line::from(Span::styled(
            "no data yet (try 'r' to refresh or change ticker with '/')",
            hint(),
        )));
        return lines;
    };
    if state.view == ViewMode::Candles && data.bars.len() < 2 {
        lines.push(Line::from(Span::styled("no ticks to render yet", hint())));
        return lines;
    }

    let (width, height) = match state.size {
        (0, _) | (_, 0) => FALLBACK_SIZE,
        size => size,
    };
    let canvas = PlotSize::effective(width.into(), height.into()).and_then(|plot| match state.view {
        ViewMode::Candles => rasterize_candles(&data.bars, plot),
        ViewMode::Line => rasterize_line(&data.close_prices(), plot),
    });
    let canvas = match canvas {
        Ok(canvas) => canvas,
        Err(RenderError::InvalidInput(msg)) => {
            lines.push(error_line(&msg));
            return lines;
        }
    };

    lines.push(Line::from(caption(state)));
    lines.extend(canvas_lines(&canvas));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(FOOTER, hint())));
    lines
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("error: {message}"),
        Style::default().fg(Color::Indexed(203)).add_modifier(Modifier::BOLD),
    ))
}

/// `SYMBOL  range/interval   last: 123.45   fetched: HH:MM:SS`
pub fn caption(state: &AppState) -> String {
    let last = state.data.as_ref().and_then(|d| d.last_price()).unwrap_or(f64::NAN);
    let fetched = state
        .fetched_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".into());
    format!(
        "{}  {}/{}   last: {:.2}   fetched: {}",
        state.request.symbol, state.request.range, state.request.interval, last, fetched
    )
}

fn direction_style(direction: Option<Direction>) -> Style {
    match direction {
        Some(Direction::Up) => Style::default().fg(Color::Green),
        Some(Direction::Down) => Style::default().fg(Color::Red),
        None => Style::default(),
    }
}

/// One line per canvas row, consecutive cells of equal colour merged into a span.
pub fn canvas_lines(canvas: &Canvas) -> Vec<Line<'static>> {
    (0..canvas.height())
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style = Style::default();
            for (col, cell) in canvas.row(row).iter().enumerate() {
                let style = match cell {
                    Cell::Blank => Style::default(),
                    _ => direction_style(canvas.direction(col)),
                };
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(cell.glyph());
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            Line::from(spans)
        })
        .collect()
}
