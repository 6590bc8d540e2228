//! Category multi-select list.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::themes::Theme;

/// One entry of the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorItem {
    pub label: String,
    /// Position in the selection order, `None` when not selected.
    pub selected_at: Option<usize>,
    /// Whether the label occurs in the loaded data.
    pub present: bool,
}

/// Build list entries: every label in the data, then selected labels the
/// data does not contain.
pub fn selector_items(available: &[String], selected: &[String]) -> Vec<SelectorItem> {
    let position = |label: &str| selected.iter().position(|s| s == label);

    let mut items: Vec<SelectorItem> = available
        .iter()
        .map(|label| SelectorItem {
            label: label.clone(),
            selected_at: position(label),
            present: true,
        })
        .collect();

    items.extend(
        selected
            .iter()
            .enumerate()
            .filter(|(_, s)| !available.contains(s))
            .map(|(i, s)| SelectorItem {
                label: s.clone(),
                selected_at: Some(i),
                present: false,
            }),
    );
    items
}

/// Render the list with `cursor` highlighted.
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    items: &[SelectorItem],
    cursor: usize,
    focused: bool,
    theme: &Theme,
) {
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if item.selected_at.is_some() { "[x] " } else { "[ ] " };
            let label_style = match item.selected_at {
                Some(order) => Style::default().fg(theme.series_color(order)),
                None => theme.text,
            };
            let mut spans = vec![
                Span::styled(marker, theme.label),
                Span::styled(item.label.clone(), label_style),
            ];
            if !item.present {
                spans.push(Span::styled(" (no data)", theme.dim));
            }
            let line = Line::from(spans);
            if i == cursor && focused {
                ListItem::new(line).style(theme.cursor)
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(focused))
            .title(" Categories "),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selector_items_marks_selection_order() {
        let items = selector_items(
            &labels(&["groceries", "restaurant", "travel"]),
            &labels(&["travel", "groceries"]),
        );
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].selected_at, Some(1));
        assert_eq!(items[1].selected_at, None);
        assert_eq!(items[2].selected_at, Some(0));
        assert!(items.iter().all(|i| i.present));
    }

    #[test]
    fn test_selector_items_appends_missing_selection() {
        let items = selector_items(&labels(&["groceries"]), &labels(&["pets"]));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].label, "pets");
        assert!(!items[1].present);
        assert_eq!(items[1].selected_at, Some(0));
    }

    #[test]
    fn test_render_selector_does_not_panic() {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let items = selector_items(&labels(&["groceries", "restaurant"]), &labels(&["groceries"]));

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_selector(frame, area, &items, 1, true, &theme);
            })
            .unwrap();
    }
}
