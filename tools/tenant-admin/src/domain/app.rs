//! Application state management.

use std::path::PathBuf;

use crate::api::{ApiError, TenantSummary};

use super::detail_panel::{DetailOutcome, DetailRequest};
use super::links::PortalLink;
use super::list_screen::{ExportError, SelectionContext, TenantListScreen};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Tenant list view.
    #[default]
    List,
    /// Typing a filter.
    Filter,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Work the event loop must carry out on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the tenant listing.
    RefreshList,
    /// Run one detail fetch.
    FetchDetails(DetailRequest),
    /// Write the visible rows to disk.
    Export,
}

/// Results delivered back to the app by background tasks.
#[derive(Debug)]
pub enum AppEvent {
    TenantsLoaded(Result<Vec<TenantSummary>, ApiError>),
    DetailsLoaded(DetailOutcome),
}

/// Main application model.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// The Tenants screen.
    pub screen: TenantListScreen,
    /// Last successful listing refresh.
    pub last_refresh: Option<chrono::DateTime<chrono::Utc>>,
    /// Error message to display (if any).
    pub error_message: Option<String>,
    /// Informational message for the footer (chosen link, export path).
    pub status_message: Option<String>,
    /// A listing request is in flight.
    pub loading: bool,
}

impl App {
    /// Create a new application instance.
    pub fn new(context: SelectionContext) -> Self {
        Self {
            state: AppState::List,
            screen: TenantListScreen::new(context),
            last_refresh: None,
            error_message: None,
            status_message: None,
            loading: false,
        }
    }

    /// Handle a character key.
    pub fn handle_key(&mut self, key: char) -> Option<Command> {
        match self.state {
            AppState::List => self.handle_list_key(key),
            AppState::Filter => {
                let mut filter = self.screen.table().filter().to_string();
                filter.push(key);
                self.screen.table_mut().set_filter(filter);
                None
            }
            AppState::Help => {
                // Any key closes help
                self.state = AppState::List;
                None
            }
            AppState::Quit => None,
        }
    }

    fn handle_list_key(&mut self, key: char) -> Option<Command> {
        match key {
            'q' | 'Q' => self.state = AppState::Quit,
            '?' => self.state = AppState::Help,
            '/' => self.state = AppState::Filter,
            'r' | 'R' => return self.request_refresh(),
            'd' | 'D' => return self.open_details(),
            'e' | 'E' => return Some(Command::Export),
            's' => {
                if let Some(column) = self.screen.table().next_sort_column() {
                    self.screen.table_mut().sort_by(column);
                }
            }
            'S' => {
                if let Some((column, _)) = self.screen.table().sort_state() {
                    self.screen.table_mut().sort_by(column);
                }
            }
            c => {
                if let Some(link) = PortalLink::from_hotkey(c) {
                    self.choose_link(link);
                }
            }
        }
        None
    }

    /// Handle Enter.
    pub fn handle_enter(&mut self) -> Option<Command> {
        match self.state {
            AppState::List => self.open_details(),
            AppState::Filter | AppState::Help => {
                self.state = AppState::List;
                None
            }
            AppState::Quit => None,
        }
    }

    /// Handle Esc: close the panel, then the filter, then quit.
    pub fn handle_escape(&mut self) {
        match self.state {
            AppState::List => {
                if self.screen.active_panel().is_some() {
                    self.screen.close_details();
                } else if !self.screen.table().filter().is_empty() {
                    self.screen.table_mut().set_filter("");
                } else {
                    self.state = AppState::Quit;
                }
            }
            AppState::Filter => {
                self.screen.table_mut().set_filter("");
                self.state = AppState::List;
            }
            AppState::Help => self.state = AppState::List,
            AppState::Quit => {}
        }
    }

    /// Handle Backspace while typing a filter.
    pub fn handle_backspace(&mut self) {
        if self.state == AppState::Filter {
            let mut filter = self.screen.table().filter().to_string();
            filter.pop();
            self.screen.table_mut().set_filter(filter);
        }
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        self.screen.table_mut().select_prev();
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        self.screen.table_mut().select_next();
    }

    /// Ask for a listing refresh unless one is already running.
    pub fn request_refresh(&mut self) -> Option<Command> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(Command::RefreshList)
    }

    fn open_details(&mut self) -> Option<Command> {
        self.status_message = None;
        self.screen.open_selected().map(Command::FetchDetails)
    }

    fn choose_link(&mut self, link: PortalLink) {
        if let Some((row, _)) = self.screen.active_panel() {
            self.status_message = Some(format!("{}: {}", link.label(), link.url(row)));
        }
    }

    /// Apply a background result.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::TenantsLoaded(Ok(rows)) => {
                self.loading = false;
                self.screen.load(rows);
                self.last_refresh = Some(chrono::Utc::now());
                self.error_message = None;
            }
            AppEvent::TenantsLoaded(Err(e)) => {
                // Keep existing rows on error
                self.loading = false;
                self.error_message = Some(format!("Tenants: {}", e));
            }
            AppEvent::DetailsLoaded(outcome) => {
                self.screen.complete_details(outcome);
            }
        }
    }

    /// Record the result of an export.
    pub fn export_finished(&mut self, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => self.status_message = Some(format!("Exported to {}", path.display())),
            Err(e) => self.error_message = Some(format!("Export: {}", e)),
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}

#[cfg(test)]
mod tests {
    use crate::api::TenantDetail;
    use crate::domain::detail_panel::{DetailField, FieldValue};

    use super::*;

    fn tenant(id: &str, domain: &str, name: &str) -> TenantSummary {
        TenantSummary {
            id: id.to_string(),
            default_domain_name: domain.to_string(),
            customer_id: format!("cust-{id}"),
            display_name: Some(name.to_string()),
            graph_error_count: 0,
            last_graph_error: None,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(SelectionContext::new("partner.com"));
        app.apply(AppEvent::TenantsLoaded(Ok(vec![
            tenant("1", "fabrikam.com", "Fabrikam"),
            tenant("2", "contoso.com", "Contoso"),
        ])));
        app
    }

    #[test]
    fn test_refresh_is_not_duplicated() {
        let mut app = App::new(SelectionContext::new("partner.com"));
        assert_eq!(app.handle_key('r'), Some(Command::RefreshList));
        assert_eq!(app.handle_key('r'), None);

        app.apply(AppEvent::TenantsLoaded(Ok(Vec::new())));
        assert!(!app.loading);
        assert!(app.last_refresh.is_some());
    }

    #[test]
    fn test_listing_error_keeps_rows() {
        let mut app = loaded_app();
        app.loading = true;
        app.apply(AppEvent::TenantsLoaded(Err(ApiError::Connection("down".into()))));

        assert_eq!(app.screen.table().len(), 2);
        assert_eq!(app.error_message.as_deref(), Some("Tenants: Connection failed: down"));
        assert!(!app.loading);
    }

    #[test]
    fn test_enter_opens_details_for_selection() {
        let mut app = loaded_app();
        app.select_next();
        let Some(Command::FetchDetails(request)) = app.handle_enter() else {
            panic!("expected a detail fetch");
        };
        assert_eq!(request.domain_name, "contoso.com");

        app.apply(AppEvent::DetailsLoaded(DetailOutcome {
            row_id: request.row_id,
            generation: request.generation,
            result: Ok(TenantDetail {
                tenant_type: Some("AAD".into()),
                ..TenantDetail::default()
            }),
        }));

        let (_, panel) = app.screen.active_panel().unwrap();
        assert_eq!(panel.render_field(DetailField::TenantType), FieldValue::Text("AAD".into()));
    }

    #[test]
    fn test_link_hotkey_needs_open_panel() {
        let mut app = loaded_app();
        app.handle_key('6');
        assert_eq!(app.status_message, None);

        app.handle_key('d');
        app.handle_key('6');
        assert_eq!(
            app.status_message.as_deref(),
            Some("Azure Portal: https://portal.azure.com/fabrikam.com")
        );
    }

    #[test]
    fn test_escape_order() {
        let mut app = loaded_app();
        app.handle_key('d');
        app.handle_key('/');
        app.handle_key('c');
        app.handle_enter();
        assert_eq!(app.screen.table().filter(), "c");

        app.handle_escape();
        assert!(app.screen.active_panel().is_none());
        app.handle_escape();
        assert_eq!(app.screen.table().filter(), "");
        assert!(!app.should_quit());
        app.handle_escape();
        assert!(app.should_quit());
    }

    #[test]
    fn test_filter_typing() {
        let mut app = loaded_app();
        app.handle_key('/');
        for c in "conx".chars() {
            app.handle_key(c);
        }
        assert!(app.screen.table().is_empty());
        app.handle_backspace();
        assert_eq!(app.screen.table().len(), 1);

        app.handle_escape();
        assert_eq!(app.state, AppState::List);
        assert_eq!(app.screen.table().len(), 2);
    }

    #[test]
    fn test_sort_keys() {
        let mut app = loaded_app();
        app.handle_key('s');
        app.handle_key('s');
        assert_eq!(
            app.screen.table().visible_rows().next().map(|r| r.id.as_str()),
            Some("2")
        );
        app.handle_key('S');
        assert_eq!(
            app.screen.table().visible_rows().next().map(|r| r.id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = loaded_app();
        app.handle_key('?');
        assert_eq!(app.state, AppState::Help);
        assert_eq!(app.handle_key('x'), None);
        assert_eq!(app.state, AppState::List);
    }
}
