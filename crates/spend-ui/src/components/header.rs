use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Application title shown on the first header line.
pub const TITLE: &str = "SPENDING DASHBOARD - by Category, date range";

/// Dashboard header rendering three lines:
///
/// 1. Application title.
/// 2. A separator as wide as the title.
/// 3. `[ source | start - end | window N days ]`.
pub struct Header<'a> {
    /// Name of the loaded export file.
    pub source: &'a str,
    /// Active date range, already formatted.
    pub range: String,
    pub window_days: u32,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, range: String, window_days: u32, theme: &'a Theme) -> Self {
        Self {
            source,
            range,
            window_days,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(TITLE.len());
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.range.clone(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(format!("window {} days", self.window_days), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}
