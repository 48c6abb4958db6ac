//! Column descriptors for the tenant table.
//!
//! The table is driven entirely by [`COLUMNS`]: which field each column
//! reads, whether it sorts, how its cell renders, and what it contributes
//! to an export.

use std::cmp::Ordering;

use crate::api::TenantSummary;

use super::status::{status_indicator, status_text, StatusIndicator};

/// Fields of [`TenantSummary`] a column can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryField {
    Id,
    GraphErrorCount,
    DisplayName,
    DefaultDomainName,
    CustomerId,
}

impl SummaryField {
    /// Attribute name on the wire, also used as the export header.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SummaryField::Id => "id",
            SummaryField::GraphErrorCount => "GraphErrorCount",
            SummaryField::DisplayName => "displayName",
            SummaryField::DefaultDomainName => "defaultDomainName",
            SummaryField::CustomerId => "customerId",
        }
    }

    /// Read this field from a row.
    pub fn value(&self, row: &TenantSummary) -> CellValue {
        match self {
            SummaryField::Id => CellValue::Text(Some(row.id.clone())),
            SummaryField::GraphErrorCount => CellValue::Number(row.graph_error_count as u64),
            SummaryField::DisplayName => CellValue::Text(row.display_name.clone()),
            SummaryField::DefaultDomainName => {
                CellValue::Text(Some(row.default_domain_name.clone()))
            }
            SummaryField::CustomerId => CellValue::Text(Some(row.customer_id.clone())),
        }
    }
}

/// A selected value, used for sorting and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Number(u64),
    Text(Option<String>),
}

impl CellValue {
    /// Plain text form. Missing text is empty.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(t) => t.clone().unwrap_or_default(),
        }
    }

    /// Numbers compare numerically, text case-insensitively, missing first.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => {
                let a = a.as_deref().map(str::to_lowercase);
                let b = b.as_deref().map(str::to_lowercase);
                a.cmp(&b)
            }
            _ => self.to_text().cmp(&other.to_text()),
        }
    }
}

/// How a column's cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRenderer {
    /// Indicator glyph with the status text as tooltip.
    StatusIcon,
    /// Text with the full value as tooltip.
    Tip,
    /// Row action trigger.
    Actions,
    /// Never drawn (export only).
    Hidden,
}

/// Rendered content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Status {
        indicator: StatusIndicator,
        tooltip: String,
    },
    Text(String),
    Action,
    Hidden,
}

/// Declarative description of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header text; `None` for export-only columns.
    pub header: Option<&'static str>,
    pub selector: Option<SummaryField>,
    pub sortable: bool,
    pub renderer: CellRenderer,
    pub export_selector: Option<SummaryField>,
    /// Minimum width hint in pixels.
    pub min_width: Option<u16>,
    pub centered: bool,
}

/// Every column in display order.
pub static COLUMNS: [Column; 5] = [
    Column {
        header: Some("Status"),
        selector: Some(SummaryField::GraphErrorCount),
        sortable: true,
        renderer: CellRenderer::StatusIcon,
        export_selector: Some(SummaryField::GraphErrorCount),
        min_width: Some(5),
        centered: false,
    },
    Column {
        header: Some("Name"),
        selector: Some(SummaryField::DisplayName),
        sortable: true,
        renderer: CellRenderer::Tip,
        export_selector: Some(SummaryField::DisplayName),
        min_width: Some(250),
        centered: false,
    },
    Column {
        header: Some("Default Domain"),
        selector: Some(SummaryField::DefaultDomainName),
        sortable: true,
        renderer: CellRenderer::Tip,
        export_selector: Some(SummaryField::DefaultDomainName),
        min_width: Some(200),
        centered: false,
    },
    Column {
        header: None,
        selector: None,
        sortable: false,
        renderer: CellRenderer::Hidden,
        export_selector: Some(SummaryField::CustomerId),
        min_width: None,
        centered: false,
    },
    Column {
        header: Some("Actions"),
        selector: None,
        sortable: false,
        renderer: CellRenderer::Actions,
        export_selector: None,
        min_width: None,
        centered: true,
    },
];

/// Pixels per terminal cell when converting width hints.
const PIXELS_PER_CELL: u16 = 10;

impl Column {
    /// Whether the column is drawn in the table.
    pub fn is_visible(&self) -> bool {
        self.header.is_some() && self.renderer != CellRenderer::Hidden
    }

    /// Minimum width in terminal cells, never narrower than the header.
    pub fn cell_width(&self) -> u16 {
        let header = self.header.map(|h| h.chars().count() as u16).unwrap_or(0);
        let hint = self.min_width.map(|px| px / PIXELS_PER_CELL).unwrap_or(0);
        header.max(hint).max(1)
    }

    /// Render this column's cell for a row.
    pub fn cell(&self, row: &TenantSummary) -> Cell {
        match self.renderer {
            CellRenderer::StatusIcon => Cell::Status {
                indicator: status_indicator(row.graph_error_count),
                tooltip: status_text(row.graph_error_count, row.last_graph_error.as_deref()),
            },
            CellRenderer::Tip => Cell::Text(
                self.selector
                    .map(|s| s.value(row).to_text())
                    .unwrap_or_default(),
            ),
            CellRenderer::Actions => Cell::Action,
            CellRenderer::Hidden => Cell::Hidden,
        }
    }

    /// Text searched by the table filter.
    pub fn search_text(&self, row: &TenantSummary) -> Option<String> {
        match self.cell(row) {
            Cell::Status { tooltip, .. } => Some(tooltip),
            Cell::Text(text) => Some(text),
            Cell::Action | Cell::Hidden => None,
        }
    }
}

/// Columns drawn in the table, with their index into [`COLUMNS`].
pub fn visible_columns() -> impl Iterator<Item = (usize, &'static Column)> {
    COLUMNS.iter().enumerate().filter(|(_, c)| c.is_visible())
}

/// Fields written by an export, in column order.
pub fn export_fields() -> Vec<SummaryField> {
    COLUMNS.iter().filter_map(|c| c.export_selector).collect()
}
