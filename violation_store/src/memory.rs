//! In-process stand-ins for DynamoDB and IoT Core, used by the handler
//! tests. Each double records how often it was hit and can be told to fail.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::attribute::Item;
use crate::error::StoreError;
use crate::notify::Notifier;
use crate::record::{BiometricId, CCCD};
use crate::store::{OfficerDirectory, ViolationLog};

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    fail_with: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_items(items: Vec<Item>) -> MemoryStore {
        MemoryStore { items: Mutex::new(items), ..MemoryStore::default() }
    }

    /// Every later call fails with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *self.fail_with.lock().unwrap() = Some(reason.to_string());
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(reason) => Err(StoreError::Backend(reason.to_owned())),
            None => Ok(())
        }
    }
}

#[async_trait]
impl OfficerDirectory for MemoryStore {
    async fn get_officer(&self, device_id: &str, finger_id: &BiometricId) -> Result<Option<Item>, StoreError> {
        self.enter()?;
        let device = AttributeValue::S(device_id.to_string());
        let finger = finger_id.to_attribute();
        Ok(self.items.lock().unwrap().iter()
            .find(|item| item.get("device_id") == Some(&device) && item.get("finger_id") == Some(&finger))
            .cloned())
    }
}

#[async_trait]
impl ViolationLog for MemoryStore {
    async fn put_violation(&self, item: Item) -> Result<(), StoreError> {
        self.enter()?;
        self.items.lock().unwrap().push(item);
        Ok(())
    }

    async fn query_by_cccd(&self, cccd: &str) -> Result<Vec<Item>, StoreError> {
        self.enter()?;
        let wanted = AttributeValue::S(cccd.to_string());
        Ok(self.items.lock().unwrap().iter()
            .filter(|item| item.get(CCCD) == Some(&wanted))
            .cloned()
            .collect())
    }

    async fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        self.enter()?;
        Ok(self.items())
    }
}

#[derive(Debug, Default)]
pub struct MemoryNotifier {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    failing: AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> MemoryNotifier {
        MemoryNotifier::default()
    }

    pub fn failing() -> MemoryNotifier {
        MemoryNotifier { failing: AtomicBool::new(true), ..MemoryNotifier::default() }
    }

    /// Published messages as (topic, decoded JSON payload).
    pub fn published(&self) -> Vec<(String, serde_json::Value)> {
        self.published.lock().unwrap().iter()
            .map(|(topic, payload)| (topic.to_owned(), serde_json::from_slice(payload).unwrap_or_default()))
            .collect()
    }

    /// Attempts made, successful or not.
    pub fn attempts(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), StoreError> {
        self.published.lock().unwrap().push((topic.to_string(), payload.to_vec()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Publish { topic: topic.to_string(), reason: "broker unavailable".to_string() })
        }
        Ok(())
    }
}
