use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, error, info, warn};
use utoipa::OpenApi;

use super::{
    codec,
    dto::{MessageResponse, SensorData, StatusResponse},
    errors::IngestError,
    AppState,
};
use crate::db::models::Reading;

const INSERTED: &str = "Data inserted successfully.";
const NO_DATA: &str = "No data found.";
const FETCH_FAILED: &str = "Error fetching data from database.";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Accept one reading from the monitoring device and append it to storage.
///
/// Any of the five keys may be omitted; missing ones are stored as `"N/A"`.
#[utoipa::path(
    post,
    path = "/updateSensor",
    request_body(content = Reading, content_type = "application/json"),
    responses(
        (status = 200, description = "Reading stored", body = StatusResponse),
        (status = 400, description = "Body empty or not a JSON object", body = StatusResponse),
        (status = 500, description = "Storage failure", body = StatusResponse),
    ),
    tag = "sensors"
)]
pub async fn update_sensor(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusResponse>, IngestError> {
    let reading = codec::decode(&body).map_err(|e| {
        warn!(error = %e, "Rejected sensor update");
        IngestError::InvalidInput
    })?;

    info!(
        soil_health = %reading.soil_health,
        water_level = %reading.water_level,
        temperature = %reading.temperature,
        humidity = %reading.humidity,
        pump_status = %reading.pump_status,
        "Received sensor reading"
    );

    let id = state.store.append(&reading).await.map_err(|e| {
        error!(error = %e, "Failed to persist sensor reading");
        IngestError::PersistenceFailure
    })?;

    debug!(id, "Sensor reading persisted");
    Ok(Json(StatusResponse::success(INSERTED)))
}

/// Return the most recently stored reading.
///
/// Always answers `200`: an empty table or a storage failure is reported
/// through the `message` body instead of the status code.
#[utoipa::path(
    get,
    path = "/sensorData",
    responses(
        (status = 200, description = "Latest reading, or a message when none is available", body = SensorData),
    ),
    tag = "sensors"
)]
pub async fn sensor_data(State(state): State<AppState>) -> Json<SensorData> {
    let payload = match state.store.latest().await {
        Ok(Some(row)) => {
            debug!(id = row.id, "Serving latest sensor reading");
            codec::encode(row.reading)
        }
        Ok(None) => codec::encode_empty(NO_DATA),
        Err(e) => {
            error!(error = %e, "Failed to fetch latest sensor reading");
            codec::encode_empty(FETCH_FAILED)
        }
    };

    Json(payload)
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(update_sensor, sensor_data, health),
    components(schemas(Reading, StatusResponse, MessageResponse, SensorData)),
    tags(
        (name = "sensors", description = "Soil monitor reading endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "Soil Monitor API",
        version = "0.1.0",
        description = "Ingests readings from the soil monitoring device and serves the latest one"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
