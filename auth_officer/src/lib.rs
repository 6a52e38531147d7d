use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};
use violation_store::attribute::attribute_to_json;
use violation_store::{BiometricId, InputError, Notifier, OfficerDirectory, StoreError};

pub const NOT_FOUND_MESSAGE: &str = "User not found";
const UNKNOWN: &str = "Unknown";

/// What the reader is told after a fingerprint scan. Serialized with the
/// status as an upper-case tag, e.g. `{"status":"FAIL","message":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum AuthOutcome {
    Success { name: Value, officer_id: Value },
    Fail { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthRequest {
    pub device_id: String,
    pub finger_id: BiometricId,
}

impl AuthRequest {
    pub fn from_event(event: &Value) -> Result<AuthRequest, InputError> {
        let device_id = match event.get("device_id") {
            Some(Value::String(s)) => s.to_owned(),
            Some(Value::Number(n)) => n.to_string(),
            None | Some(Value::Null) => return Err(InputError::MissingField("device_id")),
            Some(_) => return Err(InputError::UnsupportedType { field: "device_id" })
        };
        let finger_id = BiometricId::from_json(event.get("finger_id").unwrap_or(&Value::Null))?;
        Ok(AuthRequest { device_id, finger_id })
    }
}

#[derive(Debug, thiserror::Error)]
enum AuthError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn attribute_or_unknown(item: &violation_store::Item, key: &str) -> Value {
    item.get(key)
        .and_then(attribute_to_json)
        .unwrap_or_else(|| Value::String(UNKNOWN.to_string()))
}

async fn lookup(directory: &dyn OfficerDirectory, event: &Value) -> Result<AuthOutcome, AuthError> {
    let request = AuthRequest::from_event(event)?;
    match directory.get_officer(&request.device_id, &request.finger_id).await? {
        Some(item) => {
            let name = attribute_or_unknown(&item, "officer_name");
            let officer_id = attribute_or_unknown(&item, "officer_id");
            info!("found officer {}", name);
            Ok(AuthOutcome::Success { name, officer_id })
        }
        None => {
            info!("officer not found for device {} finger {:?}", request.device_id, request.finger_id);
            Ok(AuthOutcome::Fail { message: NOT_FOUND_MESSAGE.to_string() })
        }
    }
}

async fn publish(notifier: &dyn Notifier, topic: &str, outcome: &AuthOutcome) -> Result<(), AuthError> {
    let payload = serde_json::to_vec(outcome).map_err(StoreError::from)?;
    notifier.publish(topic, &payload).await?;
    Ok(())
}

/// Looks the officer up and reports the outcome on `topic`. A failed lookup
/// or a failed report turns into an `ERROR` outcome, which is then reported
/// once more without checking the result.
pub async fn authenticate(
    directory: &dyn OfficerDirectory,
    notifier: &dyn Notifier,
    topic: &str,
    event: Value,
) -> AuthOutcome {
    info!("login request: {}", event);
    let attempt = match lookup(directory, &event).await {
        Ok(outcome) => publish(notifier, topic, &outcome).await.map(|_| outcome),
        Err(e) => Err(e)
    };
    match attempt {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("authentication failed: {}", e);
            let outcome = AuthOutcome::Error { message: e.to_string() };
            if let Err(e) = publish(notifier, topic, &outcome).await {
                warn!("could not report error on {}: {}", topic, e);
            }
            outcome
        }
    }
}

pub async fn function_handler(
    directory: &dyn OfficerDirectory,
    notifier: &dyn Notifier,
    topic: &str,
    event: LambdaEvent<Value>,
) -> Result<AuthOutcome, Error> {
    Ok(authenticate(directory, notifier, topic, event.payload).await)
}
