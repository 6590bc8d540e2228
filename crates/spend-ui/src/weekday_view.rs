//! Grouped bar chart of spending per weekday.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use spend_core::calendar::WEEKDAY_NAMES;
use spend_core::formatting::format_axis_amount;
use spend_core::models::WeekdayTotal;
use spend_data::dashboard::WeekdayChart;

use crate::themes::Theme;

/// Totals regrouped by weekday, Sunday first.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayGroup {
    pub weekday: String,
    /// `(category, total)` in the order categories were supplied.
    pub bars: Vec<(String, f64)>,
}

pub fn weekday_groups(totals: &[WeekdayTotal]) -> Vec<WeekdayGroup> {
    WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(num, name)| WeekdayGroup {
            weekday: name.to_string(),
            bars: totals
                .iter()
                .filter(|t| t.weekday_num as usize == num)
                .map(|t| (t.category.clone(), t.total))
                .collect(),
        })
        .collect()
}

pub fn render_weekday_chart(
    frame: &mut Frame,
    area: Rect,
    chart: &WeekdayChart,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title(format!(" {} ", chart.title));

    let groups = weekday_groups(&chart.totals);
    let per_group = groups.first().map(|g| g.bars.len()).unwrap_or(0);
    if per_group == 0 {
        let text = Paragraph::new(Line::from(Span::styled(
            "No categories selected",
            theme.warning,
        )))
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    // Seven groups share the inner width; one column of gap between groups.
    let inner = area.width.saturating_sub(2) as usize;
    let bar_width = ((inner / 7).saturating_sub(1) / per_group).clamp(1, 8) as u16;

    let mut widget = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(1)
        .label_style(theme.label)
        .value_style(theme.value);

    for group in &groups {
        let bars: Vec<Bar> = group
            .bars
            .iter()
            .enumerate()
            .map(|(i, (_, total))| {
                Bar::default()
                    .value(total.round().max(0.0) as u64)
                    .text_value(format_axis_amount(*total))
                    .style(Style::default().fg(theme.series_color(i)))
            })
            .collect();
        let label = group.weekday.chars().take(3).collect::<String>();
        widget = widget.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }

    frame.render_widget(widget, area);
}
