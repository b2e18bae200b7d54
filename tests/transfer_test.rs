mod common;

use common::setup_app_data;
use serde_json::json;
use smartlighting_backend::stores::lantern_store::NewLantern;

#[tokio::test]
async fn empty_export_has_empty_arrays_and_timestamp() {
    let app_data = setup_app_data().await;

    let document = app_data.export_service.export_json("admin@test.com").await;

    assert!(document.success);
    assert!(document.data.lanterns.is_empty());
    assert!(document.data.parks.is_empty());
    assert!(document.data.breakdowns.is_empty());
    assert!(document.data.renovations.is_empty());
    assert!(document.data.repairmen.is_empty());
    assert!(document.data.companies.is_empty());
    assert_eq!(document.data.export_info.total_records, 0);
    assert_eq!(document.data.export_info.format, "json");
}

#[tokio::test]
async fn export_counts_seeded_rows() {
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

    let document = app_data.export_service.export_json("admin@test.com").await;

    assert_eq!(document.data.parks.len(), 1);
    assert_eq!(document.data.lanterns.len(), 1);
    assert_eq!(document.data.export_info.total_records, 2);
}

#[tokio::test]
async fn backup_includes_admins_and_activities() {
    let app_data = setup_app_data().await;
    common::register_admin(&app_data, "admin@test.com").await;

    app_data
        .park_store
        .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
        .await
        .unwrap();

    let backup = app_data.export_service.backup("admin@test.com").await;

    assert!(backup.success);
    assert!(backup.name.starts_with("smartlighting_backup_"));
    assert!(backup.filename.ends_with(".json"));
    assert_eq!(backup.data.admins.len(), 1);
    // register + park create both logged
    assert!(backup.data.activities.len() >= 2);
    assert_eq!(backup.data.backup_info.version, "1.0");
}

#[tokio::test]
async fn import_is_best_effort_per_row() {
    let app_data = setup_app_data().await;

    let counts = app_data
        .export_service
        .import(
            json!({
                "data": {
                    "parks": [
                        {"id": 1, "name": "Central", "address": "Main St 1"},
                        {"id": "broken"},
                        {"id": 2, "name": "Riverside", "address": "Quay 3"}
                    ],
                    "companies": [
                        {"id": 1, "name": "Lightfix", "email": "ops@lightfix.example"}
                    ]
                }
            }),
            "admin@test.com",
        )
        .await
        .unwrap();

    assert_eq!(counts.parks, 2);
    assert_eq!(counts.companies, 1);
    assert_eq!(counts.lanterns, 0);

    let parks = app_data.park_store.list().await.unwrap();
    assert_eq!(parks.len(), 2);
}

#[tokio::test]
async fn exported_document_can_be_reimported_elsewhere() {
    let source = setup_app_data().await;
    let target = setup_app_data().await;

    let park = source
        .park_store
        .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
        .await
        .unwrap();
    source
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

    let document = source.export_service.export_json("admin@test.com").await;
    let payload = serde_json::to_value(&document).unwrap();

    let counts = target
        .export_service
        .import(payload, "admin@test.com")
        .await
        .unwrap();

    assert_eq!(counts.parks, 1);
    assert_eq!(counts.lanterns, 1);

    let lanterns = target.lantern_store.list().await.unwrap();
    assert_eq!(lanterns.len(), 1);
    assert_eq!(lanterns[0].status, "working");
}
