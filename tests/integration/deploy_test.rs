//! Integration tests for the deployment wizard and cascading selection.

mod helpers;

use infradesk_core::error::ErrorKind;
use infradesk_core::types::{ClusterId, DatacenterId, DeploymentJobId, NetworkId};
use infradesk_service::{WizardStep, submit_notification};

#[tokio::test]
async fn test_submit_complete_wizard() {
    let app = helpers::TestApp::signed_in().await;
    let service = app.console.deployments();
    let mut wizard = service.wizard().await.expect("catalogue loads");

    wizard.form.vm_count = 3;
    wizard.form.vm_name_prefix = "web".to_string();
    wizard.selection.select_datacenter(Some(DatacenterId(1))).unwrap();
    wizard.selection.select_cluster(Some(ClusterId(11))).unwrap();
    wizard.selection.select_network(Some(NetworkId(31))).unwrap();
    while wizard.step() != WizardStep::Review {
        wizard.next();
    }
    app.backend.clear_requests();

    let result = service.submit(&wizard).await;
    assert_eq!(submit_notification(&result).title, "Deployment Submitted");
    let job = result.expect("job created");
    assert_eq!(job.id, DeploymentJobId(501));

    let posts = app.backend.requests_to("POST", "/deployments/");
    assert_eq!(posts.len(), 1);
    let body = &posts[0].body;
    assert_eq!(body["name"], "Deploy web");
    assert_eq!(body["vm_name"], "web");
    assert_eq!(body["vm_count"], 3);
    assert_eq!(body["datacenter"], 1);
    assert_eq!(body["cluster"], 11);
    assert_eq!(body["network"], 31);
}

#[tokio::test]
async fn test_missing_network_sends_nothing() {
    let app = helpers::TestApp::signed_in().await;
    let service = app.console.deployments();
    let mut wizard = service.wizard().await.unwrap();
    wizard.selection.select_datacenter(Some(DatacenterId(1))).unwrap();
    wizard.selection.select_cluster(Some(ClusterId(11))).unwrap();
    app.backend.clear_requests();

    let result = service.submit(&wizard).await;

    assert!(app.backend.requests().is_empty());
    assert_eq!(submit_notification(&result).title, "Missing Configuration");
    assert_eq!(result.unwrap_err().kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_changing_datacenter_resets_dependents() {
    let app = helpers::TestApp::signed_in().await;
    let mut wizard = app.console.deployments().wizard().await.unwrap();

    wizard.selection.select_datacenter(Some(DatacenterId(1))).unwrap();
    let clusters: Vec<_> = wizard.selection.cluster_options().iter().map(|c| c.id).collect();
    assert_eq!(clusters, vec![ClusterId(11)]);
    wizard.selection.select_cluster(Some(ClusterId(11))).unwrap();
    wizard.selection.select_network(Some(NetworkId(31))).unwrap();

    wizard.selection.select_datacenter(Some(DatacenterId(2))).unwrap();

    let chain = wizard.selection.chain();
    assert_eq!(chain.datacenter, Some(DatacenterId(2)));
    assert_eq!(chain.cluster, None);
    assert_eq!(chain.network, None);
    let networks: Vec<_> = wizard.selection.network_options().iter().map(|n| n.id).collect();
    assert_eq!(networks, vec![NetworkId(41)]);
}

#[tokio::test]
async fn test_cluster_from_other_datacenter_is_rejected() {
    let app = helpers::TestApp::signed_in().await;
    let mut wizard = app.console.deployments().wizard().await.unwrap();
    wizard.selection.select_datacenter(Some(DatacenterId(1))).unwrap();

    let err = wizard
        .selection
        .select_cluster(Some(ClusterId(21)))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(wizard.selection.chain().cluster, None);
}

#[tokio::test]
async fn test_submit_after_logout_requires_auth() {
    let app = helpers::TestApp::signed_in().await;
    let service = app.console.deployments();
    let mut wizard = service.wizard().await.unwrap();
    wizard.selection.select_datacenter(Some(DatacenterId(1))).unwrap();
    wizard.selection.select_cluster(Some(ClusterId(11))).unwrap();
    wizard.selection.select_network(Some(NetworkId(31))).unwrap();
    app.console.logout().await;
    app.backend.clear_requests();

    let result = service.submit(&wizard).await;

    assert!(app.backend.requests().is_empty());
    assert_eq!(submit_notification(&result).title, "Authentication Required");
}
