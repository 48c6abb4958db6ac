//! Domain models for the tenant console.

mod app;
pub mod columns;
pub mod detail_panel;
mod links;
mod list_screen;
mod status;
mod table;

pub use app::{App, AppEvent, AppState, Command};
pub use columns::{
    export_fields, visible_columns, Cell, CellRenderer, CellValue, Column, SummaryField, COLUMNS,
};
pub use detail_panel::{
    fetch_details, DetailField, DetailOutcome, DetailPanel, DetailRequest, FetchState, FieldValue,
    PANEL_TITLE,
};
pub use links::PortalLink;
pub use list_screen::{Capabilities, ExportError, SelectionContext, TenantListScreen};
pub use status::{status_indicator, status_text, StatusIndicator};
pub use table::{SortDirection, TenantTable};
