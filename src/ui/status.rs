//! Sentinel status panel.
//!
//! The left panel: a calm monitoring card while the subject is secure,
//! escalating to the containment banner once the sentinel locks the
//! account down.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::AlertState;

/// Render the status panel for the current alert state.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let alert = app.sentinel.alert();

    let border_color = match alert {
        AlertState::Secure => app.theme.border,
        AlertState::Locked => app.theme.alert,
    };

    let block = Block::default()
        .title(" Sentinel ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border_color));

    let lines = match alert {
        AlertState::Secure => secure_lines(app),
        AlertState::Locked => locked_lines(app),
    };

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

fn secure_lines(app: &App) -> Vec<Line<'_>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "ACTIVE MONITORING",
            Style::default().fg(app.theme.secure).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Scanning identity logs...",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

fn locked_lines(app: &App) -> Vec<Line<'_>> {
    let alert_bold = Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD);

    vec![
        Line::from(""),
        Line::from(Span::styled("THREAT CONTAINED", alert_bold)),
        Line::from(Span::styled(
            "SENTINEL LOCKDOWN ENFORCED",
            Style::default().fg(app.theme.alert),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("TARGET: "),
            Span::styled(
                app.sentinel.subject().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("ACTION: "),
            Span::styled("REVOKED & BLOCKED", alert_bold),
        ]),
    ]
}
