use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::Reading;

/// Outcome payload for `POST /updateSensor`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: "success".to_owned(),
            message: message.to_owned(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_owned(),
            message: message.to_owned(),
        }
    }
}

/// `{"message": ...}` payload used when there is no reading to show.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /sensorData`: either the latest reading or a message.
///
/// Serialized untagged, so clients see the bare reading object.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SensorData {
    Reading(Reading),
    Message(MessageResponse),
}
