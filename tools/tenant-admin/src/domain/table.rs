//! Tenant table model: sorting, filtering, selection and export.

use std::io::{self, Write};

use crate::api::TenantSummary;

use super::columns::{export_fields, visible_columns, COLUMNS};

/// Sort direction of the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(&self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }

    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Rows of the tenant listing plus the current view over them.
#[derive(Debug, Clone, Default)]
pub struct TenantTable {
    /// Rows in listing order.
    rows: Vec<TenantSummary>,
    /// Indices into `rows` after filtering and sorting.
    view: Vec<usize>,
    /// Column index into `COLUMNS` and direction.
    sort: Option<(usize, SortDirection)>,
    filter: String,
    /// Position within `view`.
    selected: usize,
}

impl TenantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows, keeping sort, filter and the selected tenant.
    pub fn set_rows(&mut self, rows: Vec<TenantSummary>) {
        let selected_id = self.selected().map(|r| r.id.clone());
        self.rows = rows;
        let keep = selected_id.and_then(|id| self.rows.iter().position(|r| r.id == id));
        self.rebuild(keep);
    }

    /// All rows in listing order, regardless of filter.
    pub fn rows(&self) -> &[TenantSummary] {
        &self.rows
    }

    /// Rows currently shown, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TenantSummary> {
        self.view.iter().map(move |&i| &self.rows[i])
    }

    /// Number of rows currently shown.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn sort_state(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    /// Sort by a column. Choosing the active column again flips direction.
    ///
    /// Returns `false` for columns that do not sort.
    pub fn sort_by(&mut self, column: usize) -> bool {
        let sortable = COLUMNS
            .get(column)
            .map(|c| c.sortable && c.selector.is_some())
            .unwrap_or(false);
        if !sortable {
            return false;
        }

        self.sort = match self.sort {
            Some((current, dir)) if current == column => Some((column, dir.flipped())),
            _ => Some((column, SortDirection::Ascending)),
        };
        self.rebuild(self.selected_row());
        true
    }

    /// Next sortable column after the active one (wrapping).
    pub fn next_sort_column(&self) -> Option<usize> {
        let start = self.sort.map(|(c, _)| c + 1).unwrap_or(0);
        (0..COLUMNS.len())
            .map(|offset| (start + offset) % COLUMNS.len())
            .find(|&i| COLUMNS[i].sortable)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Show only rows whose visible text contains `text` (case-insensitive).
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        self.rebuild(self.selected_row());
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Row under the cursor.
    pub fn selected(&self) -> Option<&TenantSummary> {
        self.view.get(self.selected).map(|&i| &self.rows[i])
    }

    /// Index into `rows` of the row under the cursor.
    fn selected_row(&self) -> Option<usize> {
        self.view.get(self.selected).copied()
    }

    /// Move selection up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.view.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.view.len();
    }

    /// Write the visible rows as CSV using the export selectors.
    ///
    /// Returns the number of records written (excluding the header).
    pub fn export_csv<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        let fields = export_fields();

        let header: Vec<String> = fields.iter().map(|f| csv_escape(f.wire_name())).collect();
        writeln!(writer, "{}", header.join(","))?;

        for row in self.visible_rows() {
            let record: Vec<String> = fields
                .iter()
                .map(|f| csv_escape(&f.value(row).to_text()))
                .collect();
            writeln!(writer, "{}", record.join(","))?;
        }
        writer.flush()?;
        Ok(self.view.len())
    }

    /// Recompute the view. The cursor follows row `keep` when it is still
    /// shown, otherwise it is clamped to the view.
    fn rebuild(&mut self, keep: Option<usize>) {
        let needle = self.filter.trim().to_lowercase();
        self.view = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row_matches(row, &needle))
            .map(|(i, _)| i)
            .collect();

        if let Some((column, direction)) = self.sort {
            if let Some(selector) = COLUMNS[column].selector {
                let rows = &self.rows;
                self.view.sort_by(|&a, &b| {
                    let ord = selector.value(&rows[a]).compare(&selector.value(&rows[b]));
                    match direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                });
            }
        }

        match keep.and_then(|row| self.view.iter().position(|&i| i == row)) {
            Some(position) => self.selected = position,
            None if self.selected >= self.view.len() => {
                self.selected = self.view.len().saturating_sub(1);
            }
            None => {}
        }
    }
}

fn row_matches(row: &TenantSummary, needle: &str) -> bool {
    visible_columns()
        .filter_map(|(_, c)| c.search_text(row))
        .any(|text| text.to_lowercase().contains(needle))
}

fn csv_escape(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str, name: Option<&str>, domain: &str, errors: u32) -> TenantSummary {
        TenantSummary {
            id: id.to_string(),
            default_domain_name: domain.to_string(),
            customer_id: format!("cust-{id}"),
            display_name: name.map(str::to_string),
            graph_error_count: errors,
            last_graph_error: (errors > 0).then(|| "Token expired".to_string()),
        }
    }

    fn sample() -> TenantTable {
        let mut table = TenantTable::new();
        table.set_rows(vec![
            tenant("1", Some("Fabrikam"), "fabrikam.com", 0),
            tenant("2", Some("contoso"), "contoso.com", 3),
            tenant("3", None, "adatum.com", 1),
        ]);
        table
    }

    fn ids(table: &TenantTable) -> Vec<&str> {
        table.visible_rows().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_listing_order_by_default() {
        assert_eq!(ids(&sample()), ["1", "2", "3"]);
    }

    #[test]
    fn test_sort_by_name_toggles() {
        let mut table = sample();
        assert!(table.sort_by(1));
        assert_eq!(ids(&table), ["3", "2", "1"]);
        assert!(table.sort_by(1));
        assert_eq!(ids(&table), ["1", "2", "3"]);
        assert_eq!(table.sort_state(), Some((1, SortDirection::Descending)));
    }

    #[test]
    fn test_sort_by_status_is_numeric() {
        let mut table = sample();
        table.sort_by(0);
        assert_eq!(ids(&table), ["1", "3", "2"]);
    }

    #[test]
    fn test_unsortable_columns_rejected() {
        let mut table = sample();
        assert!(!table.sort_by(3));
        assert!(!table.sort_by(4));
        assert!(!table.sort_by(99));
        assert_eq!(table.sort_state(), None);
    }

    #[test]
    fn test_next_sort_column_wraps() {
        let mut table = sample();
        assert_eq!(table.next_sort_column(), Some(0));
        table.sort_by(2);
        assert_eq!(table.next_sort_column(), Some(0));
        table.sort_by(0);
        assert_eq!(table.next_sort_column(), Some(1));
    }

    #[test]
    fn test_filter_matches_visible_text() {
        let mut table = sample();
        table.set_filter("CONTOSO");
        assert_eq!(ids(&table), ["2"]);

        table.set_filter("no errors");
        assert_eq!(ids(&table), ["1"]);

        // customer ids are export-only and not searched
        table.set_filter("cust-1");
        assert!(table.is_empty());

        table.set_filter("");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut table = sample();
        table.select_prev();
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("3"));
        table.select_next();
        assert_eq!(table.selected_index(), 0);

        table.select_prev();
        table.set_filter("fabrikam");
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn test_selection_follows_row_through_sort() {
        let mut table = sample();
        table.select_next();
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("2"));

        // name ascending puts the unnamed row first
        table.sort_by(1);
        assert_eq!(ids(&table), ["3", "2", "1"]);
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("2"));

        table.sort_by(0);
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("2"));
        assert_eq!(table.selected_index(), 2);
    }

    #[test]
    fn test_selection_follows_row_through_filter() {
        let mut table = sample();
        table.select_prev();
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("3"));

        table.set_filter("adatum");
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("3"));

        table.set_filter("");
        assert_eq!(table.selected_index(), 2);
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("3"));
    }

    #[test]
    fn test_selection_follows_row_through_reload() {
        let mut table = sample();
        table.select_next();
        table.set_rows(vec![
            tenant("4", Some("Tailspin"), "tailspintoys.com", 0),
            tenant("2", Some("contoso"), "contoso.com", 0),
        ]);
        assert_eq!(table.selected().map(|r| r.id.as_str()), Some("2"));
    }

    #[test]
    fn test_selection_on_empty_table() {
        let mut table = TenantTable::new();
        table.select_next();
        table.select_prev();
        assert!(table.selected().is_none());
    }

    #[test]
    fn test_export_csv() {
        let mut table = sample();
        table.set_rows(vec![
            tenant("1", Some("Fabrikam, Inc"), "fabrikam.com", 0),
            tenant("2", None, "contoso.com", 2),
        ]);

        let mut out = Vec::new();
        let count = table.export_csv(&mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "GraphErrorCount,displayName,defaultDomainName,customerId\n\
             0,\"Fabrikam, Inc\",fabrikam.com,cust-1\n\
             2,,contoso.com,cust-2\n"
        );
    }

    #[test]
    fn test_csv_escape_quotes() {
        assert_eq!(csv_escape(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(csv_escape("plain"), "plain");
    }
}
