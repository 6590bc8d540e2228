//! Application state and the synchronous terminal event loop.
//!
//! [`App`] owns the loaded [`Dashboard`] and the user's current
//! [`DashboardQuery`]. Every key press edits the query; every frame asks the
//! dashboard for the matching data products, which are only recomputed when
//! the query actually changed.

use std::io;

use chrono::{Days, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use spend_core::error::{Result, SpendError};
use spend_core::settings::MAX_WINDOW_DAYS;
use spend_data::dashboard::{Dashboard, DashboardQuery};

use crate::components::header::Header;
use crate::components::selector::{render_selector, selector_items, SelectorItem};
use crate::distribution_view::{render_spread, render_transactions};
use crate::rolling_view::render_rolling_chart;
use crate::themes::Theme;
use crate::weekday_view::render_weekday_chart;

const PAGE_ROWS: usize = 10;

const HELP: &str =
    "←/→ start  [/] end  +/- window  ↑/↓ move  space toggle  tab focus  PgUp/PgDn scroll  q quit";

// ── BottomPanel ───────────────────────────────────────────────────────────────

/// Which view occupies the lower half of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomPanel {
    Spread,
    Transactions,
    Weekday,
}

impl BottomPanel {
    pub fn next(self) -> Self {
        match self {
            BottomPanel::Spread => BottomPanel::Transactions,
            BottomPanel::Transactions => BottomPanel::Weekday,
            BottomPanel::Weekday => BottomPanel::Spread,
        }
    }
}

/// Pane that receives ↑/↓ and space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Selector,
    Panel,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    pub dashboard: Dashboard,
    /// Display name of the loaded export.
    pub source: String,
    pub query: DashboardQuery,
    /// Index into the selector list.
    pub cursor: usize,
    pub panel: BottomPanel,
    pub focus: Focus,
    /// First transaction row shown in the table panel.
    pub table_offset: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, dashboard: Dashboard, source: String, query: DashboardQuery) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            dashboard,
            source,
            query,
            cursor: 0,
            panel: BottomPanel::Spread,
            focus: Focus::Selector,
            table_offset: 0,
            should_quit: false,
        }
    }

    /// Selector entries for the current selection.
    pub fn items(&self) -> Vec<SelectorItem> {
        selector_items(self.dashboard.categories(), &self.query.categories)
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Take over the terminal until the user quits.
    ///
    /// The terminal is restored even when drawing or reading events fails.
    pub fn run(mut self) -> Result<()> {
        self.run_terminal().map_err(terminal_error)
    }

    fn run_terminal(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the query or the view state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let before = self.query.clone();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,

            KeyCode::Left => self.query.start = shift_day(self.query.start, -1),
            KeyCode::Right => self.query.start = shift_day(self.query.start, 1),
            KeyCode::Char('[') => self.query.end = shift_day(self.query.end, -1),
            KeyCode::Char(']') => self.query.end = shift_day(self.query.end, 1),

            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.query.window_days = (self.query.window_days + 1).min(MAX_WINDOW_DAYS);
            }
            KeyCode::Char('-') => {
                self.query.window_days = self.query.window_days.saturating_sub(1);
            }

            KeyCode::Up => self.move_vertical(false),
            KeyCode::Down => self.move_vertical(true),
            KeyCode::Char(' ') | KeyCode::Enter if self.focus == Focus::Selector => {
                self.toggle_at_cursor()
            }

            KeyCode::Tab => self.cycle_focus(),
            KeyCode::PageDown => self.table_offset += PAGE_ROWS,
            KeyCode::PageUp => self.table_offset = self.table_offset.saturating_sub(PAGE_ROWS),
            _ => {}
        }

        if self.query != before {
            debug!(
                start = %self.query.start,
                end = %self.query.end,
                window_days = self.query.window_days,
                categories = ?self.query.categories,
                "query changed"
            );
        }
    }

    /// Selector, then each lower panel in turn, then back to the selector.
    fn cycle_focus(&mut self) {
        match self.focus {
            Focus::Selector => self.focus = Focus::Panel,
            Focus::Panel => {
                self.panel = self.panel.next();
                if self.panel == BottomPanel::Spread {
                    self.focus = Focus::Selector;
                }
            }
        }
    }

    fn move_vertical(&mut self, down: bool) {
        match (self.focus, self.panel) {
            (Focus::Selector, _) if down => {
                if self.cursor + 1 < self.items().len() {
                    self.cursor += 1;
                }
            }
            (Focus::Selector, _) => self.cursor = self.cursor.saturating_sub(1),
            (Focus::Panel, BottomPanel::Transactions) if down => self.table_offset += 1,
            (Focus::Panel, BottomPanel::Transactions) => {
                self.table_offset = self.table_offset.saturating_sub(1)
            }
            (Focus::Panel, _) => {}
        }
    }

    /// Select the label under the cursor, or deselect it when already chosen.
    /// Newly selected labels go to the end of the selection.
    fn toggle_at_cursor(&mut self) {
        let items = self.items();
        let Some(item) = items.get(self.cursor) else {
            return;
        };
        let selected = &mut self.query.categories;
        match selected.iter().position(|c| *c == item.label) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(item.label.clone()),
        }

        // Deselecting a label absent from the data removes its row.
        let len = self.items().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(50),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(20)])
            .split(rows[1]);

        let range = format!("{} - {}", self.query.start, self.query.end);
        let header = Header::new(&self.source, range, self.query.window_days, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

        let items = self.items();
        let selector_focused = self.focus == Focus::Selector;
        render_selector(frame, top[0], &items, self.cursor, selector_focused, &self.theme);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(HELP, self.theme.dim))),
            rows[3],
        );

        let theme = &self.theme;
        let panel_focused = self.focus == Focus::Panel;
        let categories = &self.query.categories;
        match self.dashboard.query(&self.query) {
            Ok(data) => {
                render_rolling_chart(
                    frame,
                    top[1],
                    &data.rolling,
                    data.query.start,
                    data.query.end,
                    theme,
                );
                match self.panel {
                    BottomPanel::Spread => {
                        render_spread(frame, rows[2], &data.distribution, categories, panel_focused, theme)
                    }
                    BottomPanel::Transactions => {
                        let last = data.distribution.rows.len().saturating_sub(1);
                        self.table_offset = self.table_offset.min(last);
                        render_transactions(
                            frame,
                            rows[2],
                            &data.distribution,
                            categories,
                            self.table_offset,
                            panel_focused,
                            theme,
                        )
                    }
                    BottomPanel::Weekday => {
                        render_weekday_chart(frame, rows[2], &data.weekday, panel_focused, theme)
                    }
                }
            }
            Err(err) => {
                render_message(frame, top[1], &err.to_string(), theme);
                render_message(frame, rows[2], "Adjust the date range to continue.", theme);
            }
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), theme.error)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border),
        );
    frame.render_widget(paragraph, area);
}

fn terminal_error(err: io::Error) -> SpendError {
    SpendError::Terminal(err.to_string())
}

/// Move `date` by `days`, leaving it unchanged at the calendar limits.
fn shift_day(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(date)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
