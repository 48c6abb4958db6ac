//! Graph error status helpers for the Status column.

/// Which glyph the Status column shows for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    /// At least one graph error recorded.
    Alert,
    /// No graph errors.
    Ok,
}

impl StatusIndicator {
    /// Get the indicator character.
    pub fn glyph(&self) -> char {
        match self {
            StatusIndicator::Alert => '▲',
            StatusIndicator::Ok => '●',
        }
    }
}

/// Pick the indicator for a graph error count.
pub fn status_indicator(graph_error_count: u32) -> StatusIndicator {
    if graph_error_count > 0 {
        StatusIndicator::Alert
    } else {
        StatusIndicator::Ok
    }
}

/// Tooltip text for the Status column.
pub fn status_text(graph_error_count: u32, last_graph_error: Option<&str>) -> String {
    if graph_error_count > 0 {
        format!(
            "Error Count: {} - Last Error: {}",
            graph_error_count,
            last_graph_error.unwrap_or_default()
        )
    } else {
        "No errors detected with this tenant".to_string()
    }
}
