//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// How many trend points fit in the header.
const TREND_WIDTH: usize = 12;

/// Render the header bar with posture and traffic overview.
///
/// Displays: status indicator, subject, traffic counter with trend,
/// current alert state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let alert = app.sentinel.alert();
    let dot_style = app.theme.alert_style(alert);

    let trend = render_sparkline(&app.history.sparkline());

    let mut spans = vec![
        Span::styled(" ● ", dot_style),
        Span::styled("SOCWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            app.sentinel.subject().to_string(),
            Style::default().fg(app.theme.highlight),
        ),
        Span::raw(" │ "),
        Span::raw(format!("Traffic: {} req/s ", app.sentinel.traffic())),
    ];

    if !trend.is_empty() {
        spans.push(Span::styled(trend, Style::default().fg(app.theme.highlight)));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("│ System: "));
    spans.push(Span::styled(alert.label(), dot_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Map normalized 0-7 levels to bar characters, keeping only the most
/// recent points.
fn render_sparkline(levels: &[u8]) -> String {
    levels
        .iter()
        .rev()
        .take(TREND_WIDTH)
        .rev()
        .map(|&v| SPARKLINE_CHARS[(v as usize).min(7)])
        .collect()
}

/// Render the status bar at the bottom.
///
/// Shows: source description, age of the last report, available
/// controls. Source errors appear here and nowhere else - the dashboard
/// degrades to its last known state rather than alarming.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(ref err) = app.load_error {
        format!(" {} | {} | q:quit", app.source_description(), err)
    } else if let Some(last) = app.last_report {
        format!(
            " {} | Updated {:.1}s ago | r:refresh ?:help q:quit",
            app.source_description(),
            last.elapsed().as_secs_f64(),
        )
    } else {
        format!(
            " {} | Waiting for first report... | ?:help q:quit",
            app.source_description(),
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Drain pending reports now"),
        Line::from("  ?         Toggle this help"),
        Line::from("  q / Esc   Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 38u16.min(area.width.saturating_sub(4));
    let help_height = 9u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_maps_levels_to_bars() {
        assert_eq!(render_sparkline(&[0, 7]), "▁█");
        assert_eq!(render_sparkline(&[]), "");
    }

    #[test]
    fn test_sparkline_keeps_most_recent_points() {
        let levels: Vec<u8> = (0..20).map(|i| (i % 8) as u8).collect();
        let bars = render_sparkline(&levels);
        assert_eq!(bars.chars().count(), TREND_WIDTH);
        // Ends with the newest point (19 % 8 == 3).
        assert!(bars.ends_with(SPARKLINE_CHARS[3]));
    }
}
