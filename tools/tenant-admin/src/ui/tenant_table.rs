//! Tenant table renderer.
//!
//! Columns, widths and cell content all come from the column descriptors;
//! this module only maps them onto ratatui widgets.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::TenantSummary;
use crate::domain::{visible_columns, App, Cell, Column, StatusIndicator};

/// Glyph drawn in the Actions column.
const ACTION_GLYPH: &str = "⋮";

/// Render the tenant table.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let table = app.screen.table();
    let title = format!(" {} ({}) ", app.screen.title().to_uppercase(), table.len());
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if table.is_empty() {
        let message = if app.loading {
            "Loading tenants..."
        } else if !table.filter().is_empty() {
            "(No tenants match the filter)"
        } else {
            "(No tenants)"
        };
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .centered()
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let sort = table.sort_state();
    let header_cells = visible_columns().map(|(idx, column)| {
        let mut text = column.header.unwrap_or_default().to_string();
        if let Some((_, dir)) = sort.filter(|(c, _)| *c == idx) {
            text.push(' ');
            text.push(dir.arrow());
        }
        let line = Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        if column.centered {
            line.centered()
        } else {
            line
        }
    });
    let header = Row::new(header_cells).height(1);

    let rows = table
        .visible_rows()
        .map(|row| Row::new(visible_columns().map(|(_, column)| cell_line(column, row))));

    let widths: Vec<Constraint> = visible_columns()
        .map(|(_, column)| match column.min_width {
            Some(_) if column.cell_width() > 10 => Constraint::Min(column.cell_width()),
            _ => Constraint::Length(column.cell_width()),
        })
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = TableState::default().with_selected(Some(table.selected_index()));
    frame.render_stateful_widget(widget, area, &mut state);
}

/// One cell's content, aligned as its column asks.
fn cell_line(column: &Column, row: &TenantSummary) -> Line<'static> {
    let line = match column.cell(row) {
        Cell::Status { indicator, .. } => {
            let color = match indicator {
                StatusIndicator::Alert => Color::Red,
                StatusIndicator::Ok => Color::Green,
            };
            Line::from(Span::styled(
                format!(" {}", indicator.glyph()),
                Style::default().fg(color),
            ))
        }
        Cell::Text(text) => Line::from(text),
        Cell::Action => Line::from(ACTION_GLYPH),
        Cell::Hidden => Line::default(),
    };
    if column.centered {
        line.centered()
    } else {
        line
    }
}

/// Tooltip of the selected row's status, shown under the table.
pub fn selected_status_tooltip(app: &App) -> Option<String> {
    let row = app.screen.table().selected()?;
    visible_columns().find_map(|(_, column)| match column.cell(row) {
        Cell::Status { tooltip, .. } => Some(tooltip),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Alignment;

    use crate::domain::COLUMNS;

    use super::*;

    fn row() -> TenantSummary {
        TenantSummary {
            id: "1".into(),
            default_domain_name: "contoso.com".into(),
            customer_id: "cust-1".into(),
            display_name: Some("Contoso".into()),
            graph_error_count: 0,
            last_graph_error: None,
        }
    }

    #[test]
    fn test_cell_alignment_follows_column() {
        let actions = cell_line(&COLUMNS[4], &row());
        assert_eq!(actions.alignment, Some(Alignment::Center));
        assert_eq!(actions.spans[0].content, ACTION_GLYPH);

        let name = cell_line(&COLUMNS[1], &row());
        assert_eq!(name.alignment, None);
        assert_eq!(name.spans[0].content, "Contoso");
    }
}
