//! UI module - TUI rendering components.
//!
//! The UI follows a component-based architecture:
//! - `layout.rs`: Main layout orchestration
//! - `tenant_table.rs`: The tenant listing, driven by the column descriptors
//! - `detail_pane.rs`: The per-row detail panel and its portal links
//! - `terminal.rs`: Raw mode / alternate screen guard
//! - `widgets/`: Reusable UI components

mod detail_pane;
mod layout;
mod tenant_table;

pub mod terminal;
pub mod widgets;

pub use layout::render;
