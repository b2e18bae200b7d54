use chrono::Utc;
use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::stores::breakdown_store::NewBreakdown;
use crate::types::dto::iot::{IotAck, IotStatus, LanternSettings};

/// Unauthenticated device callback endpoints
pub struct IotApi {
    app_data: Arc<AppData>,
}

impl IotApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for IoT endpoints
#[derive(Tags)]
enum IotTags {
    /// Lantern device callbacks
    Iot,
}

#[OpenApi(prefix_path = "/iot")]
impl IotApi {
    /// Brightness configuration for one lantern controller
    #[oai(path = "/:lantern_id/settings", method = "get", tag = "IotTags::Iot")]
    async fn settings(&self, lantern_id: Path<i32>) -> Result<Json<LanternSettings>, EntityError> {
        let lantern = self.app_data.lantern_store.get(lantern_id.0).await?;

        Ok(Json(LanternSettings {
            base_brightness: lantern.base_brightness,
            active_brightness: lantern.active_brightness,
            active_time: lantern.active_time,
        }))
    }

    /// Record a motion activation ping
    #[oai(path = "/:lantern_id/motion", method = "post", tag = "IotTags::Iot")]
    async fn motion(&self, lantern_id: Path<i32>) -> Result<Json<IotAck>, EntityError> {
        self.app_data.sensor_store.record_motion(lantern_id.0).await?;

        Ok(Json(IotAck {
            status: "logged".to_string(),
        }))
    }

    /// Mark the latest motion response for this lantern as deactivated
    #[oai(path = "/:lantern_id/motion/deactivate", method = "post", tag = "IotTags::Iot")]
    async fn deactivate_motion(&self, lantern_id: Path<i32>) -> Result<Json<IotAck>, EntityError> {
        self.app_data.sensor_store.deactivate_latest(lantern_id.0).await?;

        Ok(Json(IotAck {
            status: "deactivated".to_string(),
        }))
    }

    /// Record a device-reported fault as a breakdown
    #[oai(path = "/:lantern_id/fault", method = "post", tag = "IotTags::Iot")]
    async fn fault(
        &self,
        lantern_id: Path<i32>,
        error_type: Query<String>,
        value: Query<f64>,
    ) -> Result<Json<IotAck>, EntityError> {
        self.app_data
            .breakdown_store
            .create(NewBreakdown {
                lantern_id: lantern_id.0,
                reported_at: Utc::now(),
                description: Some(format!("{}; {}", error_type.0, value.0)),
                status: "reported".to_string(),
                priority: "medium".to_string(),
            })
            .await?;

        Ok(Json(IotAck {
            status: "error_logged".to_string(),
        }))
    }

    /// Acknowledge a reboot command; no device protocol backs this
    #[oai(path = "/:lantern_id/reboot", method = "post", tag = "IotTags::Iot")]
    async fn reboot(&self, lantern_id: Path<i32>) -> Json<IotAck> {
        let _ = lantern_id.0;
        Json(IotAck {
            status: "reboot_command_received".to_string(),
        })
    }

    /// Stub device status; no voltage read actually occurs
    #[oai(path = "/:lantern_id/status", method = "get", tag = "IotTags::Iot")]
    async fn status(&self, lantern_id: Path<i32>) -> Json<IotStatus> {
        let _ = lantern_id.0;
        Json(IotStatus {
            status: "online".to_string(),
            voltage: 3.3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::lantern_store::NewLantern;
    use crate::test_support::setup_app_data;

    #[tokio::test]
    async fn test_fault_records_breakdown_with_concatenated_description() {
        let app_data = setup_app_data().await;
        let api = IotApi::new(app_data.clone());

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

        api.fault(Path(lantern.id), Query("overvoltage".to_string()), Query(4.7))
            .await
            .unwrap();

        let breakdowns = app_data.breakdown_store.list().await.unwrap();
        assert_eq!(breakdowns.len(), 1);
        assert_eq!(breakdowns[0].description.as_deref(), Some("overvoltage; 4.7"));
        assert_eq!(breakdowns[0].status, "reported");
    }

    #[tokio::test]
    async fn test_settings_for_missing_lantern_is_not_found() {
        let app_data = setup_app_data().await;
        let api = IotApi::new(app_data);

        let result = api.settings(Path(12)).await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
    }
}
