use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background values 0–6 are dark, 7–15 light; anything else is treated as
/// dark.
pub fn detect_background() -> BackgroundType {
    detect_background_from(std::env::var("COLORFGBG").ok().as_deref())
}

fn detect_background_from(colorfgbg: Option<&str>) -> BackgroundType {
    colorfgbg
        .and_then(|val| val.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

/// Styles for every dashboard widget.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub border: Style,
    pub border_focused: Style,
    pub axis: Style,
    pub cursor: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    /// One colour per category, cycled in selection order.
    pub series: Vec<Color>,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            axis: Style::default().fg(Color::Gray),
            cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            series: vec![
                Color::Cyan,
                Color::Yellow,
                Color::Magenta,
                Color::Green,
                Color::LightRed,
                Color::LightBlue,
            ],
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Blue),
            axis: Style::default().fg(Color::DarkGray),
            cursor: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            series: vec![
                Color::Blue,
                Color::Red,
                Color::Magenta,
                Color::Green,
                Color::DarkGray,
                Color::Cyan,
            ],
        }
    }

    /// Basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::White),
            axis: Style::default().fg(Color::Gray),
            cursor: Style::default().fg(Color::Black).bg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            series: vec![
                Color::Cyan,
                Color::Yellow,
                Color::Magenta,
                Color::Green,
                Color::Red,
                Color::Blue,
            ],
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    /// Colour for the `index`-th selected category.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::Reset;
        }
        self.series[index % self.series.len()]
    }

    /// Border style for a panel, highlighted when it has focus.
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
