//! The Tenants list screen.
//!
//! Binds [`COLUMNS`](super::columns::COLUMNS) to the listing endpoint and
//! owns one [`DetailPanel`] per row. The currently selected tenant comes in
//! through [`SelectionContext`] and is only read, to name exports.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::api::TenantSummary;

use super::columns::SummaryField;
use super::detail_panel::{DetailOutcome, DetailPanel, DetailRequest};
use super::table::TenantTable;

/// Screen title.
pub const TITLE: &str = "Tenants";

/// Field uniquely identifying a row. Panels are keyed by it.
pub const KEY_FIELD: SummaryField = SummaryField::Id;

const REPORT_SUFFIX: &str = "-Tenants-List";

/// Errors raised while exporting the table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The tenant currently selected elsewhere in the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    tenant_id: String,
}

impl SelectionContext {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

/// Page capabilities advertised by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Lists every tenant rather than the selected one.
    pub all_tenants: bool,
    pub help_context: &'static str,
    pub tenant_selector: bool,
}

const CAPABILITIES: Capabilities = Capabilities {
    all_tenants: true,
    help_context: "https://google.com",
    tenant_selector: false,
};

/// Tenants list screen state.
#[derive(Debug, Clone)]
pub struct TenantListScreen {
    context: SelectionContext,
    table: TenantTable,
    /// Detail panel per row, keyed by [`KEY_FIELD`].
    panels: HashMap<String, DetailPanel>,
    /// Row whose panel is open.
    active_row: Option<String>,
}

impl TenantListScreen {
    pub fn new(context: SelectionContext) -> Self {
        Self {
            context,
            table: TenantTable::new(),
            panels: HashMap::new(),
            active_row: None,
        }
    }

    pub fn title(&self) -> &'static str {
        TITLE
    }

    pub fn key_field(&self) -> &'static str {
        KEY_FIELD.wire_name()
    }

    /// Key of `row` under [`KEY_FIELD`].
    pub fn row_key(&self, row: &TenantSummary) -> String {
        KEY_FIELD.value(row).to_text()
    }

    pub fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }

    /// Which tenants the screen is showing, for the header.
    ///
    /// The selected tenant is only named when the screen offers a tenant
    /// selector; an all-tenants screen ignores it.
    pub fn scope_label(&self) -> &str {
        let capabilities = self.capabilities();
        if capabilities.tenant_selector || !capabilities.all_tenants {
            self.context.tenant_id()
        } else {
            "All Tenants"
        }
    }

    pub fn context(&self) -> &SelectionContext {
        &self.context
    }

    /// Export/report name for the current selection.
    pub fn report_name(&self) -> String {
        format!("{}{}", self.context.tenant_id(), REPORT_SUFFIX)
    }

    pub fn table(&self) -> &TenantTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TenantTable {
        &mut self.table
    }

    /// Replace the listing.
    ///
    /// Panels of rows that are still listed survive so an in-flight fetch
    /// can still land; panels of vanished rows are dropped.
    pub fn load(&mut self, rows: Vec<TenantSummary>) {
        let mut panels = HashMap::with_capacity(rows.len());
        for row in &rows {
            let key = self.row_key(row);
            let panel = self
                .panels
                .remove(&key)
                .unwrap_or_else(|| DetailPanel::new(key.clone()));
            panels.insert(key, panel);
        }
        self.panels = panels;

        if let Some(active) = &self.active_row {
            if !self.panels.contains_key(active) {
                self.active_row = None;
            }
        }

        info!(count = rows.len(), "tenant listing loaded");
        self.table.set_rows(rows);
    }

    /// Open the detail panel for a row. Any other open panel is closed.
    pub fn open_details(&mut self, row_id: &str) -> Option<DetailRequest> {
        let domain = self
            .table
            .rows()
            .iter()
            .find(|r| self.row_key(r) == row_id)?
            .default_domain_name
            .clone();

        if let Some(previous) = self.active_row.take() {
            if previous != row_id {
                if let Some(panel) = self.panels.get_mut(&previous) {
                    panel.close();
                }
            }
        }

        let panel = self.panels.get_mut(row_id)?;
        let request = panel.invoke(&domain);
        self.active_row = Some(row_id.to_string());
        Some(request)
    }

    /// Open the detail panel for the row under the cursor.
    pub fn open_selected(&mut self) -> Option<DetailRequest> {
        let row_id = self.row_key(self.table.selected()?);
        self.open_details(&row_id)
    }

    /// Close the open panel, if any.
    pub fn close_details(&mut self) {
        if let Some(row_id) = self.active_row.take() {
            if let Some(panel) = self.panels.get_mut(&row_id) {
                panel.close();
            }
        }
    }

    /// Route a fetch outcome to its row's panel.
    pub fn complete_details(&mut self, outcome: DetailOutcome) -> bool {
        match self.panels.get_mut(&outcome.row_id) {
            Some(panel) => panel.complete(outcome.generation, outcome.result),
            None => false,
        }
    }

    pub fn panel(&self, row_id: &str) -> Option<&DetailPanel> {
        self.panels.get(row_id)
    }

    /// The open panel together with its row.
    pub fn active_panel(&self) -> Option<(&TenantSummary, &DetailPanel)> {
        let row_id = self.active_row.as_deref()?;
        let panel = self.panels.get(row_id).filter(|p| p.is_visible())?;
        let row = self.table.rows().iter().find(|r| self.row_key(r) == row_id)?;
        Some((row, panel))
    }

    /// Write the visible rows to `{dir}/{report_name}.csv`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(format!("{}.csv", self.report_name()));
        let io_err = |source| ExportError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let count = self
            .table
            .export_csv(BufWriter::new(file))
            .map_err(io_err)?;

        info!(path = %path.display(), count, "tenant listing exported");
        Ok(path)
    }
}
