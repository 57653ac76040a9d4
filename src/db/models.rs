use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Placeholder stored for any field the device did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// One snapshot from the monitoring device.
///
/// Every field is opaque text; the service never interprets the values.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    pub soil_health: String,
    pub water_level: String,
    pub temperature: String,
    pub humidity: String,
    pub pump_status: String,
}

/// A `Reading` as persisted, with the identifier assigned on insert.
///
/// Identifiers only grow, so the row with the largest `id` is the latest.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredReading {
    pub id: i64,
    #[sqlx(flatten)]
    pub reading: Reading,
}
