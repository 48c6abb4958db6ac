//! API response types for the tenant endpoints.
//!
//! Field names follow the wire format exactly, including the PascalCase
//! graph error fields on the listing rows.

use serde::{Deserialize, Deserializer, Serialize};

/// Path of the tenant listing endpoint.
pub const LIST_TENANTS_PATH: &str = "/api/ListTenants";

/// Path of the on-demand tenant detail endpoint.
pub const TENANT_DETAILS_PATH: &str = "/api/ListTenantDetails";

/// Query parameter carrying the domain name for the detail endpoint.
pub const TENANT_FILTER_PARAM: &str = "tenantfilter";

/// One row of `GET /api/ListTenants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSummary {
    pub id: String,
    #[serde(rename = "defaultDomainName")]
    pub default_domain_name: String,
    /// Opaque tenant identifier.
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    /// Absent and `null` both read as zero.
    #[serde(rename = "GraphErrorCount", default, deserialize_with = "null_as_zero")]
    pub graph_error_count: u32,
    #[serde(rename = "LastGraphError", default)]
    pub last_graph_error: Option<String>,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Extended record returned by `GET /api/ListTenantDetails`.
///
/// Every attribute is optional since the upstream directory API omits
/// whatever it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDetail {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "businessPhones", default)]
    pub business_phones: Option<Vec<String>>,
    #[serde(rename = "technicalNotificationMails", default)]
    pub technical_notification_mails: Option<Vec<String>>,
    #[serde(rename = "tenantType", default)]
    pub tenant_type: Option<String>,
    #[serde(rename = "createdDateTime", default)]
    pub created_date_time: Option<String>,
    #[serde(rename = "onPremisesSyncEnabled", default)]
    pub on_premises_sync_enabled: Option<bool>,
    #[serde(rename = "onPremisesLastSyncDateTime", default)]
    pub on_premises_last_sync_date_time: Option<String>,
    #[serde(rename = "onPremisesLastPasswordSyncDateTime", default)]
    pub on_premises_last_password_sync_date_time: Option<String>,
}
