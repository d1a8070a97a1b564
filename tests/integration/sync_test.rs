//! Integration tests for entity editing over the diff/patch protocol.

mod helpers;

use serde_json::json;

use infradesk_core::error::ErrorKind;
use infradesk_core::traits::Preconfirmed;
use infradesk_core::types::{DatacenterId, MaintenanceRecordId};
use infradesk_entity::Datacenter;
use infradesk_service::SyncOutcome;

async fn dc1(sync: &infradesk_service::EntitySync<Datacenter>) -> Datacenter {
    sync.refresh().await.expect("list loads");
    sync.find(DatacenterId(1)).await.expect("DC1 is listed")
}

#[tokio::test]
async fn test_edit_sends_only_changed_fields() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();
    let record = dc1(&sync).await;
    app.backend.clear_requests();

    let mut session = sync.begin_edit(&record);
    session.draft_mut().location = Some("NJ".to_string());
    let outcome = sync.submit(session).await;

    let patches = app.backend.requests_to("PATCH", "/datacenters/1/");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body, json!({ "location": "NJ" }));
    assert_eq!(app.backend.requests_to("GET", "/datacenters/").len(), 1);

    let SyncOutcome::Saved {
        record,
        notification,
    } = outcome
    else {
        panic!("expected Saved");
    };
    assert_eq!(record.location, "NJ");
    assert_eq!(notification.title, "Datacenter Updated");
    assert_eq!(
        notification.message,
        "\"DC1\" datacenter was successfully updated."
    );

    let refreshed = sync.find(DatacenterId(1)).await.unwrap();
    assert_eq!(refreshed.location, "NJ");
}

#[tokio::test]
async fn test_unchanged_draft_sends_nothing() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();
    let record = dc1(&sync).await;
    app.backend.clear_requests();

    let outcome = sync.submit(sync.begin_edit(&record)).await;

    assert!(matches!(outcome, SyncOutcome::Unchanged));
    assert!(app.backend.requests().is_empty());
}

#[tokio::test]
async fn test_create_posts_and_refetches() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();

    let mut session = sync.begin_create();
    session.draft_mut().name = Some("DC3".to_string());
    session.draft_mut().location = Some("AMS".to_string());
    let outcome = sync.submit(session).await;

    let posts = app.backend.requests_to("POST", "/datacenters/");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, json!({ "name": "DC3", "location": "AMS" }));

    let notification = outcome.notification().cloned().expect("notification");
    assert_eq!(notification.title, "Datacenter Created");
    assert_eq!(
        notification.message,
        "\"DC3\" datacenter has been successfully added."
    );
    assert_eq!(sync.items().await.len(), 3);
}

#[tokio::test]
async fn test_invalid_create_keeps_the_draft() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();

    let mut session = sync.begin_create();
    session.draft_mut().name = Some("DC3".to_string());
    let outcome = sync.submit(session).await;

    assert!(app.backend.requests().is_empty());
    let SyncOutcome::Rejected {
        session: Some(session),
        error,
        notification,
    } = outcome
    else {
        panic!("expected Rejected with the session");
    };
    assert_eq!(error.kind, ErrorKind::Validation);
    assert_eq!(notification.title, "Creation Failed");
    assert_eq!(session.draft().name.as_deref(), Some("DC3"));
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();
    let record = dc1(&sync).await;
    app.backend.clear_requests();

    let outcome = sync.delete(&record, &Preconfirmed(false)).await;

    assert!(matches!(outcome, SyncOutcome::Cancelled));
    assert!(app.backend.requests().is_empty());
    assert_eq!(app.backend.datacenters().len(), 2);
}

#[tokio::test]
async fn test_confirmed_delete_refetches() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();
    let record = dc1(&sync).await;
    app.backend.clear_requests();

    let outcome = sync.delete(&record, &Preconfirmed(true)).await;

    assert_eq!(app.backend.requests_to("DELETE", "/datacenters/1/").len(), 1);
    assert_eq!(app.backend.requests_to("GET", "/datacenters/").len(), 1);
    let notification = outcome.notification().cloned().expect("notification");
    assert_eq!(notification.title, "Datacenter Deleted");
    assert!(sync.find(DatacenterId(1)).await.is_none());
}

#[tokio::test]
async fn test_rejected_update_keeps_local_state() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();
    let record = dc1(&sync).await;
    app.backend.revoke_token();

    let mut session = sync.begin_edit(&record);
    session.draft_mut().location = Some("NJ".to_string());
    let outcome = sync.submit(session).await;

    assert!(outcome.is_rejected());
    let notification = outcome.notification().cloned().expect("notification");
    assert_eq!(notification.title, "Error");
    assert_eq!(notification.message, "Failed to update. Please try again.");
    assert_eq!(sync.find(DatacenterId(1)).await.unwrap().location, "NYC");
    assert!(app.console.store.current_session().await.is_none());
}

#[tokio::test]
async fn test_partial_draft_patches_only_set_fields() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.sync::<Datacenter>();
    let record = dc1(&sync).await;
    app.backend.clear_requests();

    let mut session = sync.begin_edit(&record);
    session.draft_mut().name = None;
    session.draft_mut().location = Some("NJ".to_string());
    let outcome = sync.submit(session).await;

    assert!(matches!(outcome, SyncOutcome::Saved { .. }));
    let patches = app.backend.requests_to("PATCH", "/datacenters/1/");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body, json!({ "location": "NJ" }));
    assert_eq!(sync.find(DatacenterId(1)).await.unwrap().name, "DC1");
}

#[tokio::test]
async fn test_edit_maintenance_record_without_target() {
    let app = helpers::TestApp::signed_in().await;
    let sync = app.console.maintenance(DatacenterId(1));
    sync.refresh().await.expect("records load");
    let record = sync
        .find(MaintenanceRecordId(7))
        .await
        .expect("record 7 is listed");
    assert_eq!(record.object_id, None);
    app.backend.clear_requests();

    let mut session = sync.begin_edit(&record);
    session.draft_mut().title = Some("Swap both PSUs".to_string());
    let outcome = sync.submit(session).await;

    let patches = app.backend.requests_to("PATCH", "/maintenance/7/");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body, json!({ "title": "Swap both PSUs" }));
    assert_eq!(
        app.backend
            .requests_to("GET", "/maintenance/by-datacenter/1/")
            .len(),
        1
    );
    let notification = outcome.notification().cloned().expect("notification");
    assert_eq!(notification.title, "Maintenance Record Updated");
}
