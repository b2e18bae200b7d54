use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Brightness configuration pushed to a lantern controller
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LanternSettings {
    pub base_brightness: i32,
    pub active_brightness: i32,
    pub active_time: i32,
}

/// Generic IoT acknowledgement
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IotAck {
    pub status: String,
}

/// Stub device status response; no device protocol backs this
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IotStatus {
    pub status: String,
    pub voltage: f64,
}
