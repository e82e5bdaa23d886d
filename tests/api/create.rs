use fabric_workspaces::config::CreateSettings;
use fabric_workspaces::workspaces::report::CreateStatus;
use fabric_workspaces::workspaces::{EnvironmentSelection, create_workspaces};
use serde_json::json;

use super::fake_service::{FakeService, FakeState};

fn settings(names: &[&str], environments: EnvironmentSelection, admins: &[&str]) -> CreateSettings {
    CreateSettings {
        base_names: names.iter().map(|s| s.to_string()).collect(),
        admin_emails: admins.iter().map(|s| s.to_string()).collect(),
        capacity_id: None,
        environments,
    }
}

#[tokio::test]
async fn test_create_with_capacity_and_admins() {
    let service = FakeService::start(FakeState::default()).await;
    let client = service.client().await;

    let mut settings = settings(
        &["Sales", "Finance"],
        EnvironmentSelection::new(true, false, true),
        &["ana@contoso.com", "bob@contoso.com"],
    );
    settings.capacity_id = Some("cap-1".into());

    let report = create_workspaces(&client, &settings).await.unwrap();

    assert_eq!(report.success_count(), 4);
    assert!(!report.has_failures());

    let state = service.state();
    assert_eq!(
        state.create_requests,
        vec![
            json!({"name": "Sales DEV", "capacityId": "cap-1"}),
            json!({"name": "Sales PRD", "capacityId": "cap-1"}),
            json!({"name": "Finance DEV", "capacityId": "cap-1"}),
            json!({"name": "Finance PRD", "capacityId": "cap-1"}),
        ]
    );
    assert_eq!(state.admin_requests.len(), 8);
    assert_eq!(state.admin_requests[0].0, "ws-1");
    assert_eq!(
        state.admin_requests[1].1,
        json!({
            "identifier": "bob@contoso.com",
            "groupUserAccessRight": "Admin",
            "principalType": "User"
        })
    );
}

#[tokio::test]
async fn test_create_without_capacity_omits_field() {
    let service = FakeService::start(FakeState::default()).await;
    let client = service.client().await;

    let ops_uat = settings(&["Ops"], EnvironmentSelection::new(false, true, false), &[]);
    create_workspaces(&client, &ops_uat).await.unwrap();

    let state = service.state();
    assert_eq!(state.create_requests, vec![json!({"name": "Ops UAT"})]);
    assert!(state.admin_requests.is_empty());
}

#[tokio::test]
async fn test_conflict_skips_workspace_and_its_admins() {
    let mut state = FakeState::default();
    state.failing_creates.insert("Sales UAT".into());
    let service = FakeService::start(state).await;
    let client = service.client().await;

    let report = create_workspaces(
        &client,
        &settings(&["Sales"], EnvironmentSelection::new(true, true, true), &["ana@contoso.com"]),
    )
    .await
    .unwrap();

    assert_eq!(report.success_count(), 2);
    match &report.workspaces[1].status {
        CreateStatus::Failed { reason } => assert!(reason.contains("409")),
        other => panic!("expected failure, got {other:?}"),
    }

    let state = service.state();
    assert_eq!(state.create_requests.len(), 3);
    let admin_targets: Vec<&str> = state.admin_requests.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(admin_targets, vec!["ws-1", "ws-2"]);
}

#[tokio::test]
async fn test_admin_failure_keeps_workspace_counted() {
    let mut state = FakeState::default();
    state.failing_admins.insert("ghost@contoso.com".into());
    let service = FakeService::start(state).await;
    let client = service.client().await;

    let report = create_workspaces(
        &client,
        &settings(
            &["Sales"],
            EnvironmentSelection::new(true, false, false),
            &["ghost@contoso.com", "ana@contoso.com"],
        ),
    )
    .await
    .unwrap();

    assert_eq!(report.success_count(), 1);
    assert_eq!(report.admin_failure_count(), 1);
    assert_eq!(service.state().admin_requests.len(), 2);
}

#[tokio::test]
async fn test_create_is_never_retried() {
    let service = FakeService::start(FakeState {
        transient_create_failures: 1,
        ..FakeState::default()
    })
    .await;
    let client = service.client().await;

    let report = create_workspaces(
        &client,
        &settings(&["Sales"], EnvironmentSelection::new(true, true, false), &[]),
    )
    .await
    .unwrap();

    assert_eq!(report.success_count(), 1);
    assert_eq!(report.failure_count(), 1);

    let state = service.state();
    let names: Vec<&str> = state
        .create_requests
        .iter()
        .filter_map(|body| body["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Sales DEV", "Sales UAT"]);
}

#[tokio::test]
async fn test_created_status_is_success() {
    let service = FakeService::start(FakeState {
        create_status: Some(201),
        ..FakeState::default()
    })
    .await;
    let client = service.client().await;

    let report = create_workspaces(
        &client,
        &settings(&["Sales"], EnvironmentSelection::new(true, false, false), &["ana@contoso.com"]),
    )
    .await
    .unwrap();

    assert_eq!(report.success_count(), 1);
    assert_eq!(
        report.workspaces[0].status,
        CreateStatus::Created { id: "ws-1".into() }
    );
    assert_eq!(service.state().admin_requests.len(), 1);
}
