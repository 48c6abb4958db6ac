//! Tenant API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::types::*;

/// Default time allowed for establishing a connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors that can occur when communicating with the tenant API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{path} returned {status}")]
    Status { path: String, status: StatusCode },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Where the console gets its tenant data.
///
/// Background tasks are written against this trait so demo mode and tests
/// can substitute an in-memory source for the HTTP client.
#[async_trait]
pub trait TenantSource: Send + Sync {
    /// Every tenant in the managed estate.
    async fn list_tenants(&self) -> Result<Vec<TenantSummary>, ApiError>;

    /// Extended record for one tenant. Issued only on demand.
    async fn tenant_details(&self, domain_name: &str) -> Result<TenantDetail, ApiError>;
}

/// Tenant API client.
pub struct TenantApiClient {
    client: Client,
    base_url: String,
}

impl TenantApiClient {
    /// Create a new client with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and decode the JSON body.
    async fn get<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ApiError::Connection(format!("Cannot connect to {}", self.base_url))
                } else {
                    ApiError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// List every tenant in the managed estate.
    ///
    /// No tenant filter is sent: the listing always covers all tenants,
    /// whichever one is currently selected.
    pub async fn get_tenants(&self) -> Result<Vec<TenantSummary>, ApiError> {
        self.get(LIST_TENANTS_PATH, &[]).await
    }

    /// Fetch the extended record for one tenant, keyed by domain name.
    pub async fn get_tenant_details(&self, domain_name: &str) -> Result<TenantDetail, ApiError> {
        self.get(TENANT_DETAILS_PATH, &[(TENANT_FILTER_PARAM, domain_name)])
            .await
    }
}

#[async_trait]
impl TenantSource for TenantApiClient {
    async fn list_tenants(&self) -> Result<Vec<TenantSummary>, ApiError> {
        self.get_tenants().await
    }

    async fn tenant_details(&self, domain_name: &str) -> Result<TenantDetail, ApiError> {
        self.get_tenant_details(domain_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = TenantApiClient::new("http://localhost:7071/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:7071");
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            path: LIST_TENANTS_PATH.to_string(),
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(err.to_string(), "/api/ListTenants returned 403 Forbidden");
    }
}
