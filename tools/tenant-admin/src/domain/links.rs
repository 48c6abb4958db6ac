//! Deep-link actions offered in the detail panel.
//!
//! Links are only rendered; nothing here issues a request.

use crate::api::TenantSummary;

/// One action in the detail panel's action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalLink {
    EditTenant,
    M365Portal,
    ExchangePortal,
    AadPortal,
    TeamsPortal,
    AzurePortal,
    IntunePortal,
    SecurityPortal,
    SharepointAdmin,
}

impl PortalLink {
    /// All actions in panel order.
    pub const ALL: [PortalLink; 9] = [
        PortalLink::EditTenant,
        PortalLink::M365Portal,
        PortalLink::ExchangePortal,
        PortalLink::AadPortal,
        PortalLink::TeamsPortal,
        PortalLink::AzurePortal,
        PortalLink::IntunePortal,
        PortalLink::SecurityPortal,
        PortalLink::SharepointAdmin,
    ];

    /// Get the display label.
    pub fn label(&self) -> &'static str {
        match self {
            PortalLink::EditTenant => "Edit Tenant",
            PortalLink::M365Portal => "M365 Portal",
            PortalLink::ExchangePortal => "Exchange Portal",
            PortalLink::AadPortal => "AAD Portal",
            PortalLink::TeamsPortal => "Teams Portal",
            PortalLink::AzurePortal => "Azure Portal",
            PortalLink::IntunePortal => "MEM (Intune) Portal",
            PortalLink::SecurityPortal => "Security Portal (GDAP)",
            PortalLink::SharepointAdmin => "Sharepoint Admin",
        }
    }

    /// Whether the link leaves the console.
    pub fn is_external(&self) -> bool {
        !matches!(self, PortalLink::EditTenant)
    }

    /// Get the action by its number key (1-9).
    pub fn from_hotkey(key: char) -> Option<PortalLink> {
        let idx = key.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }

    /// Build the target URL for a row.
    pub fn url(&self, row: &TenantSummary) -> String {
        let domain = &row.default_domain_name;
        let customer = &row.customer_id;
        match self {
            PortalLink::EditTenant => format!(
                "/tenant/administration/tenants/Edit?tenantFilter={}&customerId={}",
                domain, customer
            ),
            PortalLink::M365Portal => format!(
                "https://portal.office.com/Partner/BeginClientSession.aspx?CTID={}&CSDEST=o365admincenter",
                customer
            ),
            PortalLink::ExchangePortal => format!(
                "https://outlook.office365.com/ecp/?rfr=Admin_o365&exsvurl=1&delegatedOrg={}",
                domain
            ),
            PortalLink::AadPortal => format!("https://aad.portal.azure.com/{}", domain),
            PortalLink::TeamsPortal => {
                format!("https://admin.teams.microsoft.com/?delegatedOrg={}", domain)
            }
            PortalLink::AzurePortal => format!("https://portal.azure.com/{}", domain),
            PortalLink::IntunePortal => format!("https://endpoint.microsoft.com/{}", domain),
            PortalLink::SecurityPortal => format!("https://security.microsoft.com/?tid={}", customer),
            PortalLink::SharepointAdmin => {
                format!("https://{}-admin.sharepoint.com", sharepoint_prefix(domain))
            }
        }
    }
}

/// Text before the first `.` of a domain name (the whole name if it has none).
fn sharepoint_prefix(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}
