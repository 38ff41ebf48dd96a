//! Agent log stream panel.
//!
//! The right panel: the bounded event log, newest entry on top, with
//! critical lines highlighted.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the log stream panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Agent Log Stream ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let logs = app.sentinel.logs();

    let lines: Vec<Line> = if logs.is_empty() {
        vec![Line::from(Span::styled(
            "Waiting for events...",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))]
    } else {
        logs.iter()
            .map(|entry| {
                let message_style = if entry.message.contains("CRITICAL") {
                    Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(app.theme.secure)
                };

                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", entry.time),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::styled(&entry.message, message_style),
                ])
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
