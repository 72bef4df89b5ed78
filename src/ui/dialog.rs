use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::store::dialog::Dialog;

pub fn draw(f: &mut Frame, area: Rect, dialog: &Dialog) {
    let popup = centered(area, 70, 7);
    f.render_widget(Clear, popup);

    let mut actions = Vec::new();
    for (i, (label, choice)) in dialog.actions().iter().enumerate() {
        if i > 0 {
            actions.push(Span::raw("   "));
        }
        let text = format!("[ {label} ]");
        if *choice == dialog.highlighted() {
            actions.push(Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ));
        } else {
            actions.push(Span::raw(text));
        }
    }

    let lines = vec![
        Line::from(dialog.body()),
        Line::from(""),
        Line::from(actions).alignment(Alignment::Center),
    ];
    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(dialog.heading())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(body, popup);
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
