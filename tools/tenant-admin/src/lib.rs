//! Tenant Admin: multi-tenant management console.
//!
//! A TUI for browsing the tenants of a managed estate and pulling up
//! per-tenant details on demand.
//!
//! ## Architecture
//!
//! The console keeps all state in the `domain` layer, which never awaits.
//! Network work lives in `api` and runs in background tasks whose results
//! are fed back to the domain as events. `ui` only reads domain state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  TENANTS                                      [R]efresh [?]Help │
//! ├──────────────────────────────────────┬──────────────────────────┤
//! │  Status  Name        Default Domain  │  TENANT INFORMATION      │
//! │  ●       Contoso     contoso.com  ⋮  │  Display Name  Contoso   │
//! │  ▲       Fabrikam    fabrikam.com ⋮  │  Tenant Type   ░░░░░░░░  │
//! │  ...                                 │  [1] Edit Tenant ...     │
//! └──────────────────────────────────────┴──────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod ui;

pub use config::ConsoleConfig;
pub use domain::{App, AppEvent, AppState, Command, DetailPanel, SelectionContext, TenantListScreen};
