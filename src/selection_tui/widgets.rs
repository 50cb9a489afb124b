use ratatui::{prelude::*, widgets::ListItem};

use crate::matcher::MatchConfidence;
use crate::selection_tui::app::MenuItem;

const MAX_LABEL_LEN: usize = 50;

/// Shorten long names to fit the list, marking the cut with "..."
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_LEN {
        return label.to_string();
    }
    let kept: String = label.chars().take(MAX_LABEL_LEN - 3).collect();
    format!("{}...", kept)
}

fn confidence_color(confidence: MatchConfidence) -> Color {
    match confidence {
        MatchConfidence::High => Color::Green,
        MatchConfidence::Medium => Color::Yellow,
        MatchConfidence::Low => Color::LightRed,
        MatchConfidence::NoMatch => Color::DarkGray,
    }
}

/// Render a menu entry, with its match percentage for candidates
pub fn render_menu_item(item: &MenuItem, is_selected: bool) -> ListItem<'_> {
    let style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(truncate_label(&item.label), style)];
    if let Some((percent, confidence)) = item.score {
        spans.push(Span::styled(
            format!(" ({}%)", percent),
            Style::default().fg(confidence_color(confidence)),
        ));
    }

    ListItem::new(Line::from(spans))
}
