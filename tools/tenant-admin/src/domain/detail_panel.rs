//! Per-row tenant detail panel.
//!
//! A panel is inert until invoked. Invoking it opens the panel and hands
//! back a [`DetailRequest`] that the caller runs in the background; the
//! outcome is fed back through [`DetailPanel::complete`]. Every invocation
//! bumps a generation counter and only the outcome carrying the latest
//! generation is applied, so the last invocation wins no matter which
//! response arrives first.

use tracing::{debug, warn};

use crate::api::{ApiError, TenantDetail, TenantSource};

/// Title shown above the panel.
pub const PANEL_TITLE: &str = "Tenant Information";

/// Attributes of [`TenantDetail`] the panel displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    DisplayName,
    BusinessPhones,
    TechnicalNotificationMails,
    TenantType,
    CreatedDateTime,
    OnPremisesSyncEnabled,
    OnPremisesLastSyncDateTime,
    OnPremisesLastPasswordSyncDateTime,
}

impl DetailField {
    /// All fields in panel order.
    pub const ALL: [DetailField; 8] = [
        DetailField::DisplayName,
        DetailField::BusinessPhones,
        DetailField::TechnicalNotificationMails,
        DetailField::TenantType,
        DetailField::CreatedDateTime,
        DetailField::OnPremisesSyncEnabled,
        DetailField::OnPremisesLastSyncDateTime,
        DetailField::OnPremisesLastPasswordSyncDateTime,
    ];

    /// Attribute name on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DetailField::DisplayName => "displayName",
            DetailField::BusinessPhones => "businessPhones",
            DetailField::TechnicalNotificationMails => "technicalNotificationMails",
            DetailField::TenantType => "tenantType",
            DetailField::CreatedDateTime => "createdDateTime",
            DetailField::OnPremisesSyncEnabled => "onPremisesSyncEnabled",
            DetailField::OnPremisesLastSyncDateTime => "onPremisesLastSyncDateTime",
            DetailField::OnPremisesLastPasswordSyncDateTime => {
                "onPremisesLastPasswordSyncDateTime"
            }
        }
    }

    /// Row label in the panel.
    pub fn label(&self) -> &'static str {
        match self {
            DetailField::DisplayName => "Display Name",
            DetailField::BusinessPhones => "Business Phones",
            DetailField::TechnicalNotificationMails => "Technical Emails",
            DetailField::TenantType => "Tenant Type",
            DetailField::CreatedDateTime => "Created",
            DetailField::OnPremisesSyncEnabled => "AD Connect Enabled",
            DetailField::OnPremisesLastSyncDateTime => "AD Connect Sync",
            DetailField::OnPremisesLastPasswordSyncDateTime => "AD Password Sync",
        }
    }

    /// Look a field up by its wire name.
    pub fn from_wire_name(name: &str) -> Option<DetailField> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    /// Display text of this attribute, `None` when the record lacks it.
    ///
    /// Lists are joined with `,` and flags print as `true`/`false`.
    pub fn display_value(&self, detail: &TenantDetail) -> Option<String> {
        match self {
            DetailField::DisplayName => detail.display_name.clone(),
            DetailField::BusinessPhones => detail.business_phones.as_ref().map(|v| v.join(",")),
            DetailField::TechnicalNotificationMails => detail
                .technical_notification_mails
                .as_ref()
                .map(|v| v.join(",")),
            DetailField::TenantType => detail.tenant_type.clone(),
            DetailField::CreatedDateTime => detail.created_date_time.clone(),
            DetailField::OnPremisesSyncEnabled => {
                detail.on_premises_sync_enabled.map(|b| b.to_string())
            }
            DetailField::OnPremisesLastSyncDateTime => {
                detail.on_premises_last_sync_date_time.clone()
            }
            DetailField::OnPremisesLastPasswordSyncDateTime => {
                detail.on_premises_last_password_sync_date_time.clone()
            }
        }
    }
}

/// Progress of the panel's most recent fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    /// Never invoked.
    #[default]
    Idle,
    /// Request in flight.
    Pending,
    /// Record received.
    Resolved(TenantDetail),
    /// Request failed. Renders exactly like `Idle`.
    Failed(String),
}

/// What a single panel row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Nothing at all.
    Empty,
    /// Loading skeleton.
    Placeholder,
    /// Resolved display text. A lone space stands in for missing attributes.
    Text(String),
}

/// A fetch the caller must issue on behalf of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub row_id: String,
    pub domain_name: String,
    pub generation: u64,
}

/// Result of running a [`DetailRequest`].
#[derive(Debug)]
pub struct DetailOutcome {
    pub row_id: String,
    pub generation: u64,
    pub result: Result<TenantDetail, ApiError>,
}

/// Run one detail request against `source`.
pub async fn fetch_details<S: TenantSource + ?Sized>(
    source: &S,
    request: DetailRequest,
) -> DetailOutcome {
    let result = source.tenant_details(&request.domain_name).await;
    DetailOutcome {
        row_id: request.row_id,
        generation: request.generation,
        result,
    }
}

/// Detail panel controller for one table row.
#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    row_id: String,
    visible: bool,
    state: FetchState,
    generation: u64,
}

impl DetailPanel {
    /// Create an idle, hidden panel for the given row.
    pub fn new(row_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            ..Self::default()
        }
    }

    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Generation of the most recent invocation (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Open the panel and start a fresh fetch for `domain_name`.
    ///
    /// Any fetch still in flight from an earlier call becomes stale.
    pub fn invoke(&mut self, domain_name: &str) -> DetailRequest {
        self.visible = true;
        self.generation += 1;
        self.state = FetchState::Pending;
        debug!(row = %self.row_id, domain = domain_name, generation = self.generation, "detail fetch started");

        DetailRequest {
            row_id: self.row_id.clone(),
            domain_name: domain_name.to_string(),
            generation: self.generation,
        }
    }

    /// Apply a fetch outcome. Returns `false` when the outcome is stale.
    pub fn complete(&mut self, generation: u64, result: Result<TenantDetail, ApiError>) -> bool {
        if generation != self.generation || !matches!(self.state, FetchState::Pending) {
            debug!(row = %self.row_id, generation, current = self.generation, "stale detail outcome ignored");
            return false;
        }

        self.state = match result {
            Ok(detail) => FetchState::Resolved(detail),
            Err(e) => {
                warn!(row = %self.row_id, error = %e, "tenant detail fetch failed");
                FetchState::Failed(e.to_string())
            }
        };
        true
    }

    /// Hide the panel. The fetch state is kept.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Presentation value for one attribute.
    pub fn render_field(&self, field: DetailField) -> FieldValue {
        match &self.state {
            FetchState::Pending => FieldValue::Placeholder,
            FetchState::Resolved(detail) => FieldValue::Text(
                field
                    .display_value(detail)
                    .unwrap_or_else(|| " ".to_string()),
            ),
            FetchState::Idle | FetchState::Failed(_) => FieldValue::Empty,
        }
    }

    /// Same as [`render_field`](Self::render_field), keyed by wire name.
    /// Unknown names render as empty.
    pub fn render_field_named(&self, name: &str) -> FieldValue {
        match DetailField::from_wire_name(name) {
            Some(field) => self.render_field(field),
            None => FieldValue::Empty,
        }
    }

    /// Labelled rows in panel order.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        DetailField::ALL
            .iter()
            .map(|f| (f.label(), self.render_field(*f)))
            .collect()
    }
}
