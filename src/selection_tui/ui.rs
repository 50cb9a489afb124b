use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListState, Paragraph, Wrap},
};

use crate::selection_tui::app::{Menu, MenuKind};
use crate::selection_tui::widgets;

pub fn render(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();
    let prompt_height = menu.prompt.lines().count().max(1) as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Length(prompt_height), // Prompt
            Constraint::Length(1),             // Hint
            Constraint::Min(0),                // Items
            Constraint::Length(1),             // Help text
        ])
        .split(area);

    let accent = match menu.kind {
        MenuKind::Choices => Color::Cyan,
        MenuKind::Confirm => Color::Green,
        MenuKind::Error => Color::Red,
    };

    // Header
    let title = Paragraph::new(menu.title.as_str())
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    // Prompt
    let prompt_lines: Vec<Line> = menu
        .prompt
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            // The first line of a song prompt announces the performer
            if idx == 0 {
                Line::from(Span::styled(line, Style::default().add_modifier(Modifier::BOLD)))
            } else {
                Line::from(line)
            }
        })
        .collect();
    let prompt_style = if menu.kind == MenuKind::Error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let prompt = Paragraph::new(prompt_lines)
        .block(Block::default().borders(Borders::ALL))
        .style(prompt_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(prompt, chunks[1]);

    // Hint
    if let Some(hint) = &menu.hint {
        let hint = Paragraph::new(hint.as_str()).style(Style::default().fg(Color::Yellow));
        frame.render_widget(hint, chunks[2]);
    }

    // Items
    let items: Vec<_> = menu
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| widgets::render_menu_item(item, idx == menu.selected))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(menu.selected));
    frame.render_stateful_widget(list, chunks[3], &mut state);

    // Help text
    let help = Paragraph::new("[↑↓: Navigate] [Enter: Select] [s: Skip] [b: Back] [q: Quit]")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}
