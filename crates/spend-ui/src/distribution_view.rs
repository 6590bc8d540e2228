//! Transaction distribution panels: a text box plot per category and the
//! underlying transaction table.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use spend_core::formatting::{format_axis_amount, format_currency};
use spend_core::models::CategorySpread;
use spend_data::dashboard::DistributionChart;

use crate::themes::Theme;

const NOTE_WIDTH: usize = 32;

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Draw one box plot on a `width`-column scale running from 0 to `scale_max`.
///
/// Whiskers span min..max, the shaded box spans q1..q3 and `┃` marks the
/// median.
pub fn box_plot_line(spread: &CategorySpread, scale_max: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let last = width - 1;
    let pos = |value: f64| -> usize {
        if scale_max <= 0.0 {
            return 0;
        }
        ((value / scale_max) * last as f64).round().clamp(0.0, last as f64) as usize
    };

    let mut cells = vec![' '; width];
    let (lo, hi) = (pos(spread.min), pos(spread.max));
    for cell in &mut cells[lo..=hi] {
        *cell = '─';
    }
    cells[lo] = '├';
    cells[hi] = '┤';
    for cell in &mut cells[pos(spread.q1)..=pos(spread.q3)] {
        *cell = '▒';
    }
    cells[pos(spread.median)] = '┃';
    cells.into_iter().collect()
}

fn category_color(categories: &[String], category: &str, theme: &Theme) -> Style {
    match categories.iter().position(|c| c == category) {
        Some(i) => Style::default().fg(theme.series_color(i)),
        None => theme.text,
    }
}

/// Box plots for every category with transactions in range.
pub fn render_spread(
    frame: &mut Frame,
    area: Rect,
    chart: &DistributionChart,
    categories: &[String],
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title(format!(" {} ", chart.title));

    if chart.spreads.is_empty() {
        let text = Paragraph::new(Line::from(Span::styled(
            "No transactions in range",
            theme.warning,
        )))
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    let label_width = chart
        .spreads
        .iter()
        .map(|s| s.category.width())
        .max()
        .unwrap_or(0);
    let scale_max = chart.spreads.iter().map(|s| s.max).fold(0.0_f64, f64::max);
    // borders + label + gaps + median column
    let plot_width = (area.width as usize).saturating_sub(label_width + 2 + 2 + 24).max(10);

    let mut lines: Vec<Line> = chart
        .spreads
        .iter()
        .map(|spread| {
            let style = category_color(categories, &spread.category, theme);
            Line::from(vec![
                Span::styled(format!("{:<label_width$} ", spread.category), style),
                Span::styled(box_plot_line(spread, scale_max, plot_width), style),
                Span::styled(
                    format!(" {} (n={})", format_currency(spread.median), spread.count),
                    theme.label,
                ),
            ])
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled(format!("{:<label_width$} ", ""), theme.dim),
        Span::styled(
            format!(
                "{:<width$}{}",
                format_axis_amount(0.0),
                format_axis_amount(scale_max),
                width = plot_width.saturating_sub(format_axis_amount(scale_max).len()),
            ),
            theme.axis,
        ),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Transaction table starting at row `offset`.
pub fn render_transactions(
    frame: &mut Frame,
    area: Rect,
    chart: &DistributionChart,
    categories: &[String],
    offset: usize,
    focused: bool,
    theme: &Theme,
) {
    let header = Row::new(
        ["Note", "Category", "Amount", "Weekday"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = chart
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(truncate_to_width(&row.note, NOTE_WIDTH)),
                Cell::from(row.category.clone())
                    .style(category_color(categories, &row.category, theme)),
                Cell::from(format_currency(row.amount)),
                Cell::from(row.weekday_name.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(NOTE_WIDTH as u16 + 1),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(10),
    ];

    let title = format!(" Transactions ({} rows) ", chart.rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border(focused))
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
