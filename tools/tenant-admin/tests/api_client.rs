//! Integration tests for [`TenantApiClient`] against a mock API host.
//!
//! A Wiremock server stands in for the tenant API and these tests verify:
//!
//! - Listing rows decode with their PascalCase graph error fields.
//! - Detail requests carry the domain name in `tenantfilter`.
//! - Non-success statuses and malformed bodies map to the right [`ApiError`].
//! - A full detail panel round trip renders the fetched values.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tenant_admin::api::{ApiError, TenantApiClient, TenantSource};
use tenant_admin::domain::{fetch_details, DetailField, FetchState, FieldValue};
use tenant_admin::{SelectionContext, TenantListScreen};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client_for(server: &MockServer) -> TenantApiClient {
    TenantApiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn tenants_json() -> serde_json::Value {
    json!([
        {
            "id": "3f2a1c9e",
            "defaultDomainName": "contoso.com",
            "customerId": "3f2a1c9e-0000-4000-8000-c0ffee000000",
            "displayName": "Contoso",
            "GraphErrorCount": 0
        },
        {
            "id": "7b4d2e10",
            "defaultDomainName": "fabrikam.com",
            "customerId": "7b4d2e10-0000-4000-8000-c0ffee000000",
            "displayName": "Fabrikam",
            "GraphErrorCount": 2,
            "LastGraphError": "Token expired"
        }
    ])
}

async fn mount_tenants(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/ListTenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tenants_json()))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_tenants_decodes_rows() {
    let server = MockServer::start().await;
    mount_tenants(&server).await;

    let tenants = client_for(&server).list_tenants().await.unwrap();

    assert_eq!(tenants.len(), 2);
    assert_eq!(tenants[0].default_domain_name, "contoso.com");
    assert_eq!(tenants[0].last_graph_error, None);
    assert_eq!(tenants[1].graph_error_count, 2);
    assert_eq!(tenants[1].last_graph_error.as_deref(), Some("Token expired"));
}

#[tokio::test]
async fn tenant_details_sends_tenant_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ListTenantDetails"))
        .and(query_param("tenantfilter", "contoso.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "displayName": "Contoso",
            "businessPhones": ["+1 425 555 0100"],
            "onPremisesSyncEnabled": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .tenant_details("contoso.com")
        .await
        .unwrap();

    assert_eq!(detail.display_name.as_deref(), Some("Contoso"));
    assert_eq!(detail.on_premises_sync_enabled, Some(false));
    assert_eq!(detail.tenant_type, None);
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ListTenants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).list_tenants().await.unwrap_err();

    match err {
        ApiError::Status { path, status } => {
            assert_eq!(path, "/api/ListTenants");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ListTenantDetails"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sign in</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .tenant_details("contoso.com")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_host_maps_to_connection() {
    // Nothing listens on the discard port
    let client = TenantApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

    let err = client.list_tenants().await.unwrap_err();

    assert!(matches!(err, ApiError::Connection(_)), "got {err:?}");
}

#[tokio::test]
async fn detail_panel_round_trip() {
    let server = MockServer::start().await;
    mount_tenants(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/ListTenantDetails"))
        .and(query_param("tenantfilter", "fabrikam.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "displayName": "Fabrikam",
            "technicalNotificationMails": ["ops@fabrikam.com", "it@fabrikam.com"],
            "onPremisesSyncEnabled": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut screen = TenantListScreen::new(SelectionContext::new("AllTenants"));
    screen.load(client.list_tenants().await.unwrap());

    let request = screen.open_details("7b4d2e10").unwrap();
    assert_eq!(request.domain_name, "fabrikam.com");

    let panel = screen.panel("7b4d2e10").unwrap();
    assert_eq!(panel.state(), &FetchState::Pending);
    assert_eq!(
        panel.render_field(DetailField::DisplayName),
        FieldValue::Placeholder
    );

    let outcome = fetch_details(&client, request).await;
    assert!(screen.complete_details(outcome));

    let panel = screen.panel("7b4d2e10").unwrap();
    assert_eq!(
        panel.render_field(DetailField::TechnicalNotificationMails),
        FieldValue::Text("ops@fabrikam.com,it@fabrikam.com".to_string())
    );
    assert_eq!(
        panel.render_field(DetailField::OnPremisesSyncEnabled),
        FieldValue::Text("true".to_string())
    );
    assert_eq!(
        panel.render_field(DetailField::TenantType),
        FieldValue::Text(" ".to_string())
    );
}
