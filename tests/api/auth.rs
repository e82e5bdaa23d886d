use fabric_workspaces::api::constants::POWERBI_SCOPE;
use fabric_workspaces::api::WorkspaceApi;
use fabric_workspaces::auth::AuthError;
use fabric_workspaces::cli::commands::connect_with;
use secrecy::ExposeSecret;

use super::fake_service::{FakeService, FakeState, TOKEN, credentials, http_client};

#[tokio::test]
async fn test_client_credentials_grant() {
    let service = FakeService::start(FakeState::default()).await;

    let token = service.auth_client().authenticate(&credentials()).await.unwrap();

    assert_eq!(token.secret().expose_secret(), TOKEN);
    assert!(!token.is_expired());

    let state = service.state();
    let (tenant, form) = &state.token_requests[0];
    assert_eq!(tenant, "contoso");
    assert_eq!(form["grant_type"], "client_credentials");
    assert_eq!(form["client_id"], "client-id");
    assert_eq!(form["client_secret"], "client-secret");
    assert_eq!(form["scope"], POWERBI_SCOPE);
}

#[tokio::test]
async fn test_rejected_credentials_are_fatal() {
    let service = FakeService::start(FakeState {
        reject_token: true,
        ..FakeState::default()
    })
    .await;

    let err = service.auth_client().authenticate(&credentials()).await.unwrap_err();

    match err {
        AuthError::Rejected { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(service.state().token_requests.len(), 1);
}

#[tokio::test]
async fn test_missing_access_token() {
    let service = FakeService::start(FakeState {
        omit_access_token: true,
        ..FakeState::default()
    })
    .await;

    let err = service.auth_client().authenticate(&credentials()).await.unwrap_err();

    assert!(matches!(err, AuthError::MissingAccessToken));
}

#[tokio::test]
async fn test_oversized_expires_in_is_accepted() {
    let service = FakeService::start(FakeState {
        token_expires_in: Some(u64::MAX),
        ..FakeState::default()
    })
    .await;

    let token = service.auth_client().authenticate(&credentials()).await.unwrap();

    assert_eq!(token.secret().expose_secret(), TOKEN);
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_connect_with_configured_endpoints() {
    let service = FakeService::start(FakeState::with_workspaces(&[("a", "Temp")])).await;

    let client = connect_with(&service.settings(), http_client()).await.unwrap();
    let listing = client.list_workspaces().await.unwrap();

    assert_eq!(listing.len(), 1);
    assert_eq!(service.state().token_requests.len(), 1);
}

#[tokio::test]
async fn test_rejected_credentials_stop_before_workspace_calls() {
    let service = FakeService::start(FakeState {
        reject_token: true,
        ..FakeState::with_workspaces(&[("a", "Temp")])
    })
    .await;

    let err = connect_with(&service.settings(), http_client()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AuthError>(),
        Some(AuthError::Rejected { .. })
    ));
    let state = service.state();
    assert_eq!(state.token_requests.len(), 1);
    assert!(state.list_requests.is_empty());
    assert!(state.create_requests.is_empty());
    assert!(state.admin_requests.is_empty());
    assert!(state.delete_requests.is_empty());
}
