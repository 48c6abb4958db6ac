//! Detail pane: the open row's tenant information and portal links.
//!
//! ```text
//! ┌ TENANT INFORMATION ──────────────┐
//! │ Contoso (contoso.com)            │
//! │                                  │
//! │ Display Name        Contoso      │
//! │ Tenant Type         ░░░░░░░░░░░  │
//! │ ...                              │
//! │ Actions                          │
//! │  [1] Edit Tenant                 │
//! │  [2] M365 Portal ↗               │
//! └──────────────────────────────────┘
//! ```

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::TenantSummary;
use crate::domain::{DetailPanel, FieldValue, PortalLink, PANEL_TITLE};

/// Width of the loading skeleton in cells.
const SKELETON_WIDTH: usize = 15;

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 20;

/// Render the detail pane for `row`.
pub fn render(frame: &mut Frame, area: Rect, row: &TenantSummary, panel: &DetailPanel) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", PANEL_TITLE.to_uppercase()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let heading = match &row.display_name {
        Some(name) => format!("{} ({})", name, row.default_domain_name),
        None => row.default_domain_name.clone(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];

    lines.extend(panel.fields().into_iter().map(|(label, value)| field_line(label, value)));

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Actions",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(PortalLink::ALL.iter().enumerate().map(|(i, link)| {
        let mut spans = vec![
            Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Yellow)),
            Span::raw(link.label()),
        ];
        if link.is_external() {
            spans.push(Span::styled(" ↗", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// One labelled field row.
fn field_line(label: &'static str, value: FieldValue) -> Line<'static> {
    let label = Span::styled(
        format!("{:<width$}", label, width = LABEL_WIDTH),
        Style::default().fg(Color::DarkGray),
    );
    let value = match value {
        FieldValue::Empty => Span::raw(""),
        FieldValue::Placeholder => Span::styled(
            "░".repeat(SKELETON_WIDTH),
            Style::default().fg(Color::DarkGray),
        ),
        FieldValue::Text(text) => Span::styled(text, Style::default().fg(Color::White)),
    };
    Line::from(vec![label, value])
}
