use chrono::{Datelike, NaiveTime, Utc};
use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::mobile::MobileError;
use crate::services::datetime;
use crate::stores::lantern_store::ControlCommand;
use crate::stores::message_store::NewUserMessage;
use crate::types::db::lantern;
use crate::types::dto::common::{HealthResponse, MessageResponse};
use crate::types::dto::mobile::{
    AuthTokenValidation, BreakdownNotification, ControlRequest, DeviceRegistration, LanternStatusOut,
    MessageOut, MessageRequest, MobileAccessToken, QrAuthToken,
};

/// Mobile companion API: QR pairing, lantern state, remote control,
/// breakdown notifications and user issue reports
pub struct MobileApi {
    app_data: Arc<AppData>,
}

impl MobileApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }

    async fn lantern_status(&self, lantern: lantern::Model) -> Result<LanternStatusOut, MobileError> {
        let last_response = self
            .app_data
            .sensor_store
            .latest_for(lantern.id)
            .await?
            .map(|r| r.date);

        Ok(LanternStatusOut {
            id: lantern.id,
            status: lantern.status,
            active_brightness: lantern.active_brightness,
            base_brightness: lantern.base_brightness,
            park_id: lantern.park_id,
            last_response,
        })
    }
}

/// API tags for mobile endpoints
#[derive(Tags)]
enum MobileTags {
    /// Mobile companion app
    Mobile,
}

#[OpenApi(prefix_path = "/mobile")]
impl MobileApi {
    /// Generate a QR pairing token for the mobile app
    #[oai(path = "/auth/generate-qr", method = "post", tag = "MobileTags::Mobile")]
    async fn generate_qr(&self) -> Result<Json<QrAuthToken>, MobileError> {
        let pairing = self.app_data.qr_pairing.generate()?;

        Ok(Json(QrAuthToken {
            token: pairing.token,
            qr_code_base64: pairing.qr_code_base64,
            expires_at: pairing.expires_at,
        }))
    }

    /// Exchange a QR pairing token for a long-lived access token
    ///
    /// Each pairing token validates exactly once.
    #[oai(path = "/auth/validate-qr", method = "post", tag = "MobileTags::Mobile")]
    async fn validate_qr(&self, body: Json<AuthTokenValidation>) -> Result<Json<MobileAccessToken>, MobileError> {
        let grant = self.app_data.qr_pairing.validate(&body.0.token)?;

        Ok(Json(MobileAccessToken {
            access_token: grant.access_token,
            token_type: "bearer".to_string(),
            expires_in: grant.expires_in,
            message: "Successfully authenticated".to_string(),
        }))
    }

    /// Current state of all lanterns for the map/list view
    #[oai(path = "/lanterns/status", method = "get", tag = "MobileTags::Mobile")]
    async fn lanterns_status(&self) -> Result<Json<Vec<LanternStatusOut>>, MobileError> {
        let lanterns = self.app_data.lantern_store.list().await?;

        let mut result = Vec::with_capacity(lanterns.len());
        for lantern in lanterns {
            result.push(self.lantern_status(lantern).await?);
        }

        Ok(Json(result))
    }

    /// Current state of a single lantern
    #[oai(path = "/lanterns/:lantern_id/status", method = "get", tag = "MobileTags::Mobile")]
    async fn single_lantern_status(&self, lantern_id: Path<i32>) -> Result<Json<LanternStatusOut>, MobileError> {
        let lantern = self.app_data.lantern_store.get(lantern_id.0).await?;

        Ok(Json(self.lantern_status(lantern).await?))
    }

    /// Remote-control a lantern: turn_on, turn_off or set_brightness
    #[oai(path = "/lanterns/control", method = "post", tag = "MobileTags::Mobile")]
    async fn control(&self, body: Json<ControlRequest>) -> Result<Json<MessageResponse>, MobileError> {
        let command = match body.0.action.as_str() {
            "turn_on" => ControlCommand::TurnOn,
            "turn_off" => ControlCommand::TurnOff,
            "set_brightness" => match body.0.brightness {
                Some(brightness) => ControlCommand::SetBrightness(brightness),
                None => {
                    return Err(MobileError::bad_request(
                        "Brightness value required for set_brightness action",
                    ))
                }
            },
            _ => {
                return Err(MobileError::bad_request(
                    "Invalid action. Use: turn_on, turn_off, or set_brightness",
                ))
            }
        };

        self.app_data.lantern_store.control(body.0.lantern_id, command).await?;

        Ok(Json(MessageResponse {
            message: format!(
                "Lantern {} control action '{}' executed successfully",
                body.0.lantern_id, body.0.action
            ),
        }))
    }

    /// Breakdowns reported in the current calendar month, newest first
    #[oai(path = "/notifications/breakdowns", method = "get", tag = "MobileTags::Mobile")]
    async fn breakdown_notifications(&self) -> Result<Json<Vec<BreakdownNotification>>, MobileError> {
        let today = Utc::now().date_naive();
        let month_start = datetime::combine(today.with_day(1).unwrap_or(today), NaiveTime::MIN);

        let breakdowns = self.app_data.breakdown_store.reported_since(month_start).await?;

        Ok(Json(
            breakdowns
                .into_iter()
                .map(|b| BreakdownNotification {
                    id: b.id,
                    lantern_id: b.lantern_id,
                    date: b.reported_at,
                    description: b.description,
                    is_resolved: false,
                })
                .collect(),
        ))
    }

    /// Breakdown history, optionally filtered by lantern
    #[oai(path = "/history/breakdowns", method = "get", tag = "MobileTags::Mobile")]
    async fn breakdown_history(
        &self,
        lantern_id: Query<Option<i32>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<BreakdownNotification>>, MobileError> {
        let breakdowns = self
            .app_data
            .breakdown_store
            .history(lantern_id.0, limit.0.unwrap_or(100))
            .await?;

        Ok(Json(
            breakdowns
                .into_iter()
                .map(|b| BreakdownNotification {
                    id: b.id,
                    lantern_id: b.lantern_id,
                    date: b.reported_at,
                    description: b.description,
                    is_resolved: true,
                })
                .collect(),
        ))
    }

    /// Submit an issue report from the mobile app
    #[oai(path = "/messages/report", method = "post", tag = "MobileTags::Mobile")]
    async fn report_message(&self, body: Json<MessageRequest>) -> Result<Json<MessageOut>, MobileError> {
        let message = self
            .app_data
            .message_store
            .create(NewUserMessage {
                title: body.0.title,
                description: body.0.description,
                location: body.0.location,
                priority: body.0.priority.unwrap_or_else(|| "medium".to_string()),
            })
            .await?;

        Ok(Json(message.into()))
    }

    /// List submitted issue reports, newest first
    #[oai(path = "/messages", method = "get", tag = "MobileTags::Mobile")]
    async fn list_messages(&self) -> Result<Json<Vec<MessageOut>>, MobileError> {
        let messages = self.app_data.message_store.list().await?;
        Ok(Json(messages.into_iter().map(Into::into).collect()))
    }

    /// Register a device token for push notifications; delivery is not wired
    #[oai(path = "/notifications/register", method = "post", tag = "MobileTags::Mobile")]
    async fn register_device(&self, device_token: Query<String>) -> Json<DeviceRegistration> {
        Json(DeviceRegistration {
            message: "Device registered for notifications".to_string(),
            token: device_token.0,
        })
    }

    /// Mobile connectivity check
    #[oai(path = "/health", method = "get", tag = "MobileTags::Mobile")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
