use bigdecimal::BigDecimal;
use chrono::{DateTime, Local};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use violation_store::record::{decimal_field, string_field};
use violation_store::{InputError, StoreError, ViolationLog, ViolationRecord};

const UNKNOWN_CCCD: &str = "Unknown_CCCD";
const UNKNOWN_DEVICE: &str = "Unknown_Device";
const UNKNOWN_OFFICER: &str = "Unknown_Officer";
const HUMAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    /// The body is the message encoded as a JSON string.
    fn new(status_code: u16, message: String) -> ApiResponse {
        ApiResponse { status_code, body: Value::String(message).to_string() }
    }
}

/// A sobriety check reported by a roadside device.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationEvent {
    pub cccd: String,
    pub device_id: String,
    pub officer_id: String,
    pub officer_name: Option<String>,
    pub alcohol_level: BigDecimal,
    pub heart_rate: BigDecimal,
    pub spo2: BigDecimal,
}

impl ViolationEvent {
    pub fn from_event(event: &Value) -> Result<ViolationEvent, InputError> {
        let fields = event.as_object()
            .ok_or_else(|| InputError::Malformed("expected a JSON object".to_string()))?;
        let officer_name = match fields.get("officer_name") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.to_owned()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(_) => return Err(InputError::UnsupportedType { field: "officer_name" })
        };
        Ok(ViolationEvent {
            cccd: string_field("cccd", fields.get("cccd"), UNKNOWN_CCCD)?,
            device_id: string_field("id", fields.get("id").filter(|v| !v.is_null()).or_else(|| fields.get("device_id")), UNKNOWN_DEVICE)?,
            officer_id: string_field("officer_id", fields.get("officer_id"), UNKNOWN_OFFICER)?,
            officer_name,
            alcohol_level: decimal_field("alc", fields.get("alc"))?,
            heart_rate: decimal_field("bpm", fields.get("bpm"))?,
            spo2: decimal_field("spo2", fields.get("spo2"))?,
        })
    }

    pub fn into_record(self, violation_id: String, now: DateTime<Local>) -> ViolationRecord {
        ViolationRecord {
            violation_id,
            timestamp_millis: now.timestamp_millis(),
            timestamp_human: now.format(HUMAN_TIME_FORMAT).to_string(),
            device_id: self.device_id,
            officer_id: self.officer_id,
            officer_name: self.officer_name,
            cccd: self.cccd,
            alcohol_level: self.alcohol_level,
            heart_rate: self.heart_rate,
            spo2: self.spo2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RecordError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

async fn save(log: &dyn ViolationLog, event: &Value) -> Result<ViolationRecord, RecordError> {
    let violation = ViolationEvent::from_event(event)?;
    let record = violation.into_record(uuid::Uuid::new_v4().to_string(), Local::now());
    log.put_violation(record.to_item()).await?;
    Ok(record)
}

/// Stores one new violation per call. Nothing is checked against existing
/// records.
pub async fn record_violation(log: &dyn ViolationLog, event: Value) -> ApiResponse {
    info!("received event: {}", event);
    match save(log, &event).await {
        Ok(record) => {
            info!("saved violation {} for cccd {} at {}", record.violation_id, record.cccd, record.timestamp_human);
            ApiResponse::new(200, format!("Saved successfully. ID: {}", record.violation_id))
        }
        Err(e) => {
            error!("failed to save violation: {}", e);
            ApiResponse::new(500, format!("Error: {}", e))
        }
    }
}

pub async fn function_handler(log: &dyn ViolationLog, event: LambdaEvent<Value>) -> Result<ApiResponse, Error> {
    Ok(record_violation(log, event.payload).await)
}
