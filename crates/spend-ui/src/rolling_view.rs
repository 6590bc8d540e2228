//! Rolling-average line chart.
//!
//! One dataset per category; the x axis counts days from the range start so
//! every category shares the same axis.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use spend_core::formatting::format_axis_amount;
use spend_data::dashboard::RollingChart;

use crate::themes::Theme;

/// One category's line as `(day offset, rolling average)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub category: String,
    pub points: Vec<(f64, f64)>,
}

/// Split the chart points into per-category lines, keeping block order.
pub fn line_series(chart: &RollingChart, start: NaiveDate) -> Vec<LineSeries> {
    let mut lines: Vec<LineSeries> = Vec::new();
    for point in &chart.points {
        let x = (point.date - start).num_days() as f64;
        match lines.last_mut() {
            Some(line) if line.category == point.category => {
                line.points.push((x, point.rolling_average))
            }
            _ => lines.push(LineSeries {
                category: point.category.clone(),
                points: vec![(x, point.rolling_average)],
            }),
        }
    }
    lines
}

/// Upper y bound: the largest average plus headroom, at least 1.
pub fn y_upper_bound(lines: &[LineSeries]) -> f64 {
    let max = lines
        .iter()
        .flat_map(|l| l.points.iter().map(|(_, y)| *y))
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

pub fn render_rolling_chart(
    frame: &mut Frame,
    area: Rect,
    chart: &RollingChart,
    start: NaiveDate,
    end: NaiveDate,
    theme: &Theme,
) {
    let lines = line_series(chart, start);
    let x_max = ((end - start).num_days() as f64).max(1.0);
    let y_max = y_upper_bound(&lines);

    let datasets: Vec<Dataset> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Dataset::default()
                .name(line.category.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(&line.points)
        })
        .collect();

    let mid = start + chrono::Duration::days((end - start).num_days() / 2);
    let x_labels = vec![
        Span::styled(start.format("%Y-%m-%d").to_string(), theme.axis),
        Span::styled(mid.format("%Y-%m-%d").to_string(), theme.axis),
        Span::styled(end.format("%Y-%m-%d").to_string(), theme.axis),
    ];
    let y_labels = vec![
        Span::styled(format_axis_amount(0.0), theme.axis),
        Span::styled(format_axis_amount(y_max / 2.0), theme.axis),
        Span::styled(format_axis_amount(y_max), theme.axis),
    ];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(format!(" {} ", chart.title)),
        )
        .x_axis(
            Axis::default()
                .title("date")
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Rolling Average($)")
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
}
