//! Help overlay widget.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{PortalLink, StatusIndicator};

/// Render a centered help overlay.
///
/// `help_context` is the screen's documentation link.
pub fn render_help_overlay(frame: &mut Frame, help_context: &str) {
    let area = frame.area();

    // Center a box in the middle of the screen
    let popup_area = centered_rect(60, 80, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(help_lines(help_context)).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}

fn help_lines(help_context: &str) -> Vec<Line<'static>> {
    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "TENANT ADMIN HELP",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::raw(""),
        section("Navigation"),
        key_line("↑/↓", "Move through tenants"),
        key_line("s", "Sort by next column"),
        key_line("S", "Reverse sort direction"),
        key_line("/", "Filter tenants (Enter keeps, Esc clears)"),
        Line::raw(""),
        section("Actions"),
        key_line("Enter/D", "Show tenant information"),
        key_line("1-9", "Show portal link for the open tenant"),
        key_line("Esc", "Close panel / clear filter / quit"),
        key_line("E", "Export visible rows to CSV"),
        key_line("R", "Refresh tenant list"),
        key_line("Q", "Quit"),
        key_line("?", "Toggle this help"),
        Line::raw(""),
        section("Status"),
        Line::from(vec![
            Span::styled(
                format!("  {}       ", StatusIndicator::Ok.glyph()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("No graph errors"),
        ]),
        Line::from(vec![
            Span::styled(
                format!("  {}       ", StatusIndicator::Alert.glyph()),
                Style::default().fg(Color::Red),
            ),
            Span::raw("Graph errors recorded for this tenant"),
        ]),
        Line::raw(""),
        section("Portal Links"),
    ];

    help_text.extend(
        PortalLink::ALL
            .iter()
            .enumerate()
            .map(|(i, link)| key_line(&(i + 1).to_string(), link.label())),
    );
    help_text.push(Line::raw(""));
    help_text.push(section("More Help"));
    help_text.push(Line::from(Span::styled(
        format!("  {}", help_context),
        Style::default().fg(Color::Blue),
    )));
    help_text.push(Line::raw(""));
    help_text.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));
    help_text
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    )])
}

fn key_line(key: &str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<9}", key), Style::default().fg(Color::Yellow)),
        Span::raw(description),
    ])
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 80, area);
        assert_eq!(popup, Rect::new(20, 5, 60, 40));
    }

    #[test]
    fn test_help_shows_context_link() {
        let lines = help_lines("https://docs.example.com/tenants");
        assert!(lines
            .iter()
            .any(|line| line.spans.iter().any(|s| s.content.contains("https://docs.example.com/tenants"))));
    }
}
