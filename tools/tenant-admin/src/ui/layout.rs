//! Main layout orchestration.
//!
//! Renders the overall screen structure:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  TENANT-ADMIN  All Tenants  Last refresh: 10:42:01   [R] [Q] [?]│
//! ├──────────────────────────────────────┬──────────────────────────┤
//! │  TENANTS (42)                        │  TENANT INFORMATION      │
//! │  ...                                 │  (only while open)       │
//! ├──────────────────────────────────────┴──────────────────────────┤
//! │  [↑↓] Navigate  [Enter] Details  [/] Filter  [S] Sort  [E] Export│
//! │  Error Count: 3 - Last Error: Token expired                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{App, AppState};

use super::{detail_pane, tenant_table, widgets};

/// Width of the detail pane when open.
const DETAIL_PANE_WIDTH: u16 = 52;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main vertical layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Body
            Constraint::Length(4), // Footer (keybinds + status)
        ])
        .split(size);

    render_header(frame, main_chunks[0], app);
    render_body(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2], app);

    if app.state == AppState::Help {
        widgets::render_help_overlay(frame, app.screen.capabilities().help_context);
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            " TENANT-ADMIN ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", app.screen.scope_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    // Show loading, error, or last refresh time
    let status = if app.loading {
        Span::styled(" Loading... ", Style::default().fg(Color::Yellow))
    } else if let Some(err) = &app.error_message {
        Span::styled(format!(" ⚠ {} ", err), Style::default().fg(Color::Red))
    } else if let Some(time) = app.last_refresh {
        Span::styled(
            format!(" Last refresh: {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(" No data ", Style::default().fg(Color::DarkGray))
    };

    let hints = vec![
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw("efresh "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
    ];

    // Calculate spacing
    let title_len: usize = title.iter().map(|s| s.width()).sum();
    let status_len = status.width();
    let hints_len: usize = hints.iter().map(|s| s.width()).sum();
    let padding = (area.width.saturating_sub(2) as usize)
        .saturating_sub(title_len + status_len + hints_len);

    let mut spans = title;
    spans.push(status);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the body: the table, plus the detail pane while one is open.
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let Some((row, panel)) = app.screen.active_panel() else {
        tenant_table::render(frame, area, app);
        return;
    };

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),                   // Table
            Constraint::Length(DETAIL_PANE_WIDTH), // Detail pane
        ])
        .split(area);

    tenant_table::render(frame, body_chunks[0], app);
    detail_pane::render(frame, body_chunks[1], row, panel);
}

/// Render the footer: keybinds, then the filter prompt or a status line.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut keybinds = vec![
        Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" Details  "),
        Span::styled("[/]", Style::default().fg(Color::Yellow)),
        Span::raw(" Filter  "),
        Span::styled("[S]", Style::default().fg(Color::Yellow)),
        Span::raw(" Sort  "),
        Span::styled("[E]", Style::default().fg(Color::Yellow)),
        Span::raw(" Export  "),
    ];
    if app.screen.active_panel().is_some() {
        keybinds.push(Span::styled("[1-9]", Style::default().fg(Color::Yellow)));
        keybinds.push(Span::raw(" Link  "));
        keybinds.push(Span::styled("[Esc]", Style::default().fg(Color::Yellow)));
        keybinds.push(Span::raw(" Close  "));
    }

    let status = if app.state == AppState::Filter {
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.screen.table().filter().to_string()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if let Some(message) = &app.status_message {
        Line::from(Span::styled(message.clone(), Style::default().fg(Color::Green)))
    } else if let Some(tooltip) = tenant_table::selected_status_tooltip(app) {
        Line::from(Span::styled(tooltip, Style::default().fg(Color::DarkGray)))
    } else {
        Line::raw("")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(keybinds)).centered(), rows[0]);
    frame.render_widget(Paragraph::new(status).centered(), rows[1]);
}
