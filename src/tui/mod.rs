//! Ratatui-based terminal dashboard.
//!
//! The TUI shows the headline statistics, the inventory/price chart with an
//! optional SMA overlay, and a settings panel for the display window and
//! overlay period. Every control change re-derives the chart view from the
//! cached dataset; only `r` (refresh) touches the network.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{self, DashboardContext, FeedSource};
use crate::cli::ViewArgs;
use crate::data::ListingsClient;
use crate::domain::{ChartView, MarketStats, SmaPeriod, Window, WindowSummary};
use crate::error::AppError;
use crate::report;
use crate::report::format::{format_percent_change, format_price, format_short_date};
use crate::view::{self, OverlayOp, OverlayState};

mod plotters_chart;

use plotters_chart::DashboardChart;

/// Start the TUI.
pub fn run(args: ViewArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

const FIELD_COUNT: usize = 2; // window, SMA period

struct App {
    client: ListingsClient,
    ctx: DashboardContext,
    feed: FeedSource,

    window: Window,
    sma: SmaPeriod,
    fallback_days: u32,
    selected_field: usize,

    overlay_state: OverlayState,
    loading: bool,
    status: String,

    view: ChartView,
    stats: Option<MarketStats>,
    summary: Option<WindowSummary>,
}

impl App {
    fn new(args: ViewArgs) -> Self {
        let mut app = Self {
            client: ListingsClient::new(args.endpoint.clone()),
            ctx: DashboardContext::new(),
            feed: FeedSource::Fallback,
            window: args.window,
            sma: args.sma,
            fallback_days: args.fallback_days,
            selected_field: 0,
            overlay_state: OverlayState::NoOverlay,
            loading: false,
            status: "Loading...".to_string(),
            view: view::compose(&[], args.window, args.sma),
            stats: None,
            summary: None,
        };
        app.refresh();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                self.window = if delta >= 0 {
                    self.window.next()
                } else {
                    self.window.prev()
                };
                self.status = format!("window: {}", self.window.display_name());
            }
            1 => {
                self.sma = if delta >= 0 { self.sma.next() } else { self.sma.prev() };
                self.status = format!("sma: {}", self.sma.display_name());
            }
            _ => {}
        }
        self.recompose();
    }

    /// Reload from the remote feed (with synthetic fallback). The `loading`
    /// guard keeps the trigger from overlapping itself; it is cleared on both
    /// the live and the fallback path.
    fn refresh(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;

        self.feed = pipeline::load_dataset(&mut self.ctx, &self.client, self.fallback_days);
        self.status = match self.feed {
            FeedSource::Live => "Loaded live feed.".to_string(),
            FeedSource::Fallback => {
                "Remote feed unavailable — showing synthetic data.".to_string()
            }
        };

        self.loading = false;
        self.recompose();
    }

    /// Re-derive the chart view and statistics from the cached dataset.
    fn recompose(&mut self) {
        self.view = view::compose(self.ctx.current(), self.window, self.sma);

        let (next, op) = self.overlay_state.apply(self.view.overlay.is_some());
        self.overlay_state = next;
        match op {
            OverlayOp::Add => self.status = "SMA overlay added.".to_string(),
            OverlayOp::Remove => self.status = "SMA overlay removed.".to_string(),
            OverlayOp::Update | OverlayOp::Noop => {}
        }

        // Surface the silent case: a period longer than the window.
        if let Some(period) = self.sma.period() {
            if self.view.overlay.is_none() {
                self.status = format!("SMA needs ≥ {period} points in window.");
            }
        }

        self.stats = report::derive_stats(self.ctx.current());
        let filtered = crate::series::window::filter(self.ctx.current(), self.window);
        self.summary = report::summarize(filtered);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ldash", Style::default().fg(Color::Cyan)),
            Span::raw(" — housing inventory & price dashboard"),
        ]));

        if let Some(stats) = &self.stats {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} listings | {} per sqft | Δ30: {} | as of {} | feed: {}",
                    stats.latest_count,
                    format_price(stats.latest_price),
                    format_percent_change(stats.percent_change_30),
                    format_short_date(stats.latest_date),
                    self.feed.origin().display_name(),
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        if let Some(summary) = &self.summary {
            lines.push(Line::from(Span::styled(
                format!(
                    "window {} (n={}) | price avg {} in [{}, {}] | start→end {}",
                    self.window.display_name(),
                    summary.n_points,
                    format_price(summary.avg_price),
                    format_price(summary.min_price),
                    format_price(summary.max_price),
                    format_percent_change(summary.change_percent),
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = match &self.view.overlay {
            Some(overlay) => format!("Inventory & Price ({})", overlay.label),
            None => "Inventory & Price".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.view.secondary.len() < 2 {
            let msg = Paragraph::new("Not enough data to chart.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        let (price_bounds, count_bounds) = chart_bounds(&self.view);
        let widget = DashboardChart {
            labels: &self.view.labels,
            price: &self.view.secondary,
            count: &self.view.primary,
            overlay: self.view.overlay.as_ref(),
            price_bounds,
            count_bounds,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        items.push(ListItem::new(format!(
            "Window: {}",
            self.window.display_name()
        )));
        items.push(ListItem::new(format!("SMA: {}", self.sma.display_name())));
        items.push(ListItem::new(format!(
            "Feed: {} | points: {}",
            self.feed.origin().display_name(),
            self.ctx.current().len(),
        )));

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Axis bounds for the chart: the price axis covers the price series plus any
/// overlay values, the count axis covers the listing counts; both get a small
/// pad so lines don't hug the frame.
fn chart_bounds(view: &ChartView) -> ([f64; 2], [f64; 2]) {
    let mut price = view.secondary.iter().copied().collect::<Vec<f64>>();
    if let Some(overlay) = &view.overlay {
        price.extend(overlay.values.iter().flatten().copied());
    }

    (padded_bounds(&price), padded_bounds(&view.primary))
}

fn padded_bounds(values: &[f64]) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        // Degenerate (empty or flat) series still need a drawable range.
        let mid = if lo.is_finite() { lo } else { 0.0 };
        return [mid - 1.0, mid + 1.0];
    }

    let pad = ((hi - lo).abs() * 0.05).max(1e-12);
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OverlaySeries;

    #[test]
    fn bounds_cover_overlay_values() {
        let view = ChartView {
            labels: vec!["a".into(), "b".into(), "c".into()],
            primary: vec![40.0, 42.0, 41.0],
            secondary: vec![450.0, 452.0, 451.0],
            overlay: Some(OverlaySeries {
                label: "test".to_string(),
                values: vec![None, Some(400.0), Some(500.0)],
            }),
        };

        let (price, count) = chart_bounds(&view);
        assert!(price[0] < 400.0 && price[1] > 500.0, "price bounds {price:?}");
        assert!(count[0] < 40.0 && count[1] > 42.0, "count bounds {count:?}");
    }

    #[test]
    fn flat_series_still_gets_a_range() {
        let b = padded_bounds(&[5.0, 5.0, 5.0]);
        assert!(b[0] < 5.0 && b[1] > 5.0);
        let b = padded_bounds(&[]);
        assert!(b[0] < b[1]);
    }
}
