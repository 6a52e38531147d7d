use std::collections::HashMap;
use std::future::Future;

use auth_officer::{authenticate, AuthOutcome, NOT_FOUND_MESSAGE};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::json;
use violation_store::memory::{MemoryNotifier, MemoryStore};
use violation_store::Item;

const TOPIC: &str = "auth/response";

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn officer(device: &str, finger: AttributeValue, name: &str, id: &str) -> Item {
    HashMap::from([
        ("device_id".to_string(), AttributeValue::S(device.to_string())),
        ("finger_id".to_string(), finger),
        ("officer_name".to_string(), AttributeValue::S(name.to_string())),
        ("officer_id".to_string(), AttributeValue::S(id.to_string())),
    ])
}

fn directory() -> MemoryStore {
    MemoryStore::with_items(vec![
        officer("esp32-01", AttributeValue::N("3".to_string()), "Nguyen Van A", "CB-01"),
        officer("esp32-02", AttributeValue::S("left-thumb".to_string()), "Tran Thi B", "CB-02"),
    ])
}

#[test]
fn known_officer_is_published_and_returned() {
    let store = directory();
    let notifier = MemoryNotifier::new();
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-01", "finger_id": 3})));

    assert_eq!(outcome, AuthOutcome::Success { name: json!("Nguyen Van A"), officer_id: json!("CB-01") });
    assert_eq!(
        notifier.published(),
        vec![(TOPIC.to_string(), json!({"status": "SUCCESS", "name": "Nguyen Van A", "officer_id": "CB-01"}))]
    );
}

#[test]
fn numeric_string_finger_resolves_like_integer() {
    let store = directory();
    let notifier = MemoryNotifier::new();
    let as_string = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-01", "finger_id": "3"})));
    let as_int = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-01", "finger_id": 3})));
    assert_eq!(as_string, as_int);
    assert!(matches!(as_string, AuthOutcome::Success { .. }));
}

#[test]
fn text_finger_ids_are_looked_up_as_strings() {
    let store = directory();
    let notifier = MemoryNotifier::new();
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-02", "finger_id": "left-thumb"})));
    assert_eq!(outcome, AuthOutcome::Success { name: json!("Tran Thi B"), officer_id: json!("CB-02") });
}

#[test]
fn unknown_pair_fails() {
    let store = directory();
    let notifier = MemoryNotifier::new();
    // Right finger, wrong device.
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-02", "finger_id": 3})));
    assert_eq!(outcome, AuthOutcome::Fail { message: NOT_FOUND_MESSAGE.to_string() });
    assert_eq!(notifier.published()[0].1, json!({"status": "FAIL", "message": "User not found"}));
}

#[test]
fn missing_attributes_default_to_unknown() {
    let store = MemoryStore::with_items(vec![HashMap::from([
        ("device_id".to_string(), AttributeValue::S("esp32-09".to_string())),
        ("finger_id".to_string(), AttributeValue::N("1".to_string())),
    ])]);
    let notifier = MemoryNotifier::new();
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-09", "finger_id": 1})));
    assert_eq!(outcome, AuthOutcome::Success { name: json!("Unknown"), officer_id: json!("Unknown") });
}

#[test]
fn store_failure_reports_error() {
    let store = directory();
    store.fail_with("ResourceNotFoundException: table missing");
    let notifier = MemoryNotifier::new();
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-01", "finger_id": 3})));

    assert_eq!(outcome, AuthOutcome::Error { message: "ResourceNotFoundException: table missing".to_string() });
    assert_eq!(notifier.published()[0].1["status"], json!("ERROR"));
}

#[test]
fn malformed_event_reports_error_without_lookup() {
    let store = directory();
    let notifier = MemoryNotifier::new();
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"finger_id": 3})));

    assert!(matches!(outcome, AuthOutcome::Error { ref message } if message.contains("device_id")));
    assert_eq!(store.calls(), 0);
    assert_eq!(notifier.attempts(), 1);
}

#[test]
fn publish_failure_becomes_error_and_is_swallowed() {
    let store = directory();
    let notifier = MemoryNotifier::failing();
    let outcome = block_on(authenticate(&store, &notifier, TOPIC, json!({"device_id": "esp32-01", "finger_id": 3})));

    assert!(matches!(outcome, AuthOutcome::Error { ref message } if message.contains("broker unavailable")));
    // The success report and the best-effort error report.
    assert_eq!(notifier.attempts(), 2);
}
