mod common;

use common::setup_app_data;
use smartlighting_backend::errors::EntityError;
use smartlighting_backend::services::datetime;
use smartlighting_backend::stores::breakdown_store::NewBreakdown;
use smartlighting_backend::stores::lantern_store::{LanternChanges, NewLantern};

#[tokio::test]
async fn park_then_lantern_then_list_shows_working_status() {
    let app_data = setup_app_data().await;

    let park = app_data
        .park_store
        .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
        .await
        .unwrap();

    let lantern = app_data
        .lantern_store
        .create(
            NewLantern {
                base_brightness: 50,
                active_brightness: 100,
                active_time: 30,
                status: "working".to_string(),
                park_id: Some(park.id),
            },
            "admin@test.com",
        )
        .await
        .unwrap();

    let listed = app_data.lantern_store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, lantern.id);
    assert_eq!(listed[0].status, "working");
    assert_eq!(listed[0].park_id, Some(park.id));
}

#[tokio::test]
async fn breakdown_against_missing_lantern_creates_no_row() {
    let app_data = setup_app_data().await;

    let result = app_data
        .breakdown_store
        .create(NewBreakdown {
            lantern_id: 1,
            reported_at: datetime::combine(
                datetime::parse_date("2025-03-01").unwrap(),
                datetime::parse_time("21:30").unwrap(),
            ),
            description: Some("Dark".to_string()),
            status: "reported".to_string(),
            priority: "high".to_string(),
        })
        .await;

    assert!(matches!(result, Err(EntityError::NotFound(_))));
    assert!(app_data.breakdown_store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_on_missing_ids_returns_not_found_everywhere() {
    let app_data = setup_app_data().await;

    assert!(matches!(
        app_data.park_store.delete(1, "a@test.com").await,
        Err(EntityError::NotFound(_))
    ));
    assert!(matches!(
        app_data.lantern_store.delete(1, "a@test.com").await,
        Err(EntityError::NotFound(_))
    ));
    assert!(matches!(
        app_data.breakdown_store.delete(1).await,
        Err(EntityError::NotFound(_))
    ));
    assert!(matches!(
        app_data.renovation_store.delete(1).await,
        Err(EntityError::NotFound(_))
    ));
    assert!(matches!(
        app_data.repairman_store.delete(1, "a@test.com").await,
        Err(EntityError::NotFound(_))
    ));
    assert!(matches!(
        app_data.company_store.delete(1, "a@test.com").await,
        Err(EntityError::NotFound(_))
    ));
    assert!(matches!(
        app_data.update_store.delete(1).await,
        Err(EntityError::NotFound(_))
    ));
}

#[tokio::test]
async fn mutations_leave_an_audit_trail() {
    let app_data = setup_app_data().await;

    let park = app_data
        .park_store
        .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
        .await
        .unwrap();
    app_data
        .lantern_store
        .create(
            NewLantern {
                base_brightness: 50,
                active_brightness: 100,
                active_time: 30,
                status: "working".to_string(),
                park_id: Some(park.id),
            },
            "admin@test.com",
        )
        .await
        .unwrap();

    let activities = app_data.activity_store.recent(10).await.unwrap();
    let types: Vec<&str> = activities.iter().map(|a| a.activity_type.as_str()).collect();

    assert!(types.contains(&"park_created"));
    assert!(types.contains(&"lantern_created"));
    // Newest first
    assert_eq!(types[0], "lantern_created");
}

#[tokio::test]
async fn failed_update_logs_nothing() {
    let app_data = setup_app_data().await;

    let lantern = app_data
        .lantern_store
        .create(
            NewLantern {
                base_brightness: 50,
                active_brightness: 100,
                active_time: 30,
                status: "working".to_string(),
                park_id: None,
            },
            "admin@test.com",
        )
        .await
        .unwrap();
    let baseline = app_data.activity_store.recent(10).await.unwrap().len();

    // Assigning a missing park fails and must not log an update activity
    let result = app_data
        .lantern_store
        .update(
            lantern.id,
            LanternChanges {
                park_id: Some(44),
                ..Default::default()
            },
            "admin@test.com",
        )
        .await;
    assert!(result.is_err());

    let after = app_data.activity_store.recent(10).await.unwrap().len();
    assert_eq!(after, baseline);
}
