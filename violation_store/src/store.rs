use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb as ddb;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::attribute::Item;
use crate::config::Config;
use crate::error::StoreError;
use crate::record::{BiometricId, CCCD};

/// Read access to the officer reference table.
#[async_trait]
pub trait OfficerDirectory: Send + Sync {
    async fn get_officer(&self, device_id: &str, finger_id: &BiometricId) -> Result<Option<Item>, StoreError>;
}

/// The violation table: append-only writes plus the two read paths.
#[async_trait]
pub trait ViolationLog: Send + Sync {
    async fn put_violation(&self, item: Item) -> Result<(), StoreError>;

    /// Every record with the given national-ID, via the secondary index.
    async fn query_by_cccd(&self, cccd: &str) -> Result<Vec<Item>, StoreError>;

    /// Every record in the table.
    async fn scan_all(&self) -> Result<Vec<Item>, StoreError>;
}

fn backend<E: std::error::Error>(err: E) -> StoreError {
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

/// DynamoDB backed store. One instance per process, shared by every
/// invocation.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: ddb::Client,
    table_name: String,
    cccd_index: String,
}

impl DynamoStore {
    pub fn new(sdk_config: &SdkConfig, config: &Config) -> DynamoStore {
        let ddb_config = match &config.dynamodb_endpoint {
            Some(endpoint) => ddb::config::Builder::from(sdk_config).endpoint_url(endpoint).build(),
            None => ddb::config::Builder::from(sdk_config).build()
        };
        DynamoStore {
            client: ddb::Client::from_conf(ddb_config),
            table_name: config.table_name.to_owned(),
            cccd_index: config.cccd_index.to_owned(),
        }
    }
}

#[async_trait]
impl OfficerDirectory for DynamoStore {
    async fn get_officer(&self, device_id: &str, finger_id: &BiometricId) -> Result<Option<Item>, StoreError> {
        let result = self.client.get_item()
            .table_name(self.table_name.to_owned())
            .key("device_id", AttributeValue::S(device_id.to_owned()))
            .key("finger_id", finger_id.to_attribute())
            .send()
            .await
            .map_err(backend)?;
        Ok(result.item)
    }
}

#[async_trait]
impl ViolationLog for DynamoStore {
    async fn put_violation(&self, item: Item) -> Result<(), StoreError> {
        self.client.put_item()
            .table_name(self.table_name.to_owned())
            .set_item(Some(item))
            .send()
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn query_by_cccd(&self, cccd: &str) -> Result<Vec<Item>, StoreError> {
        let mut pages = self.client.query()
            .table_name(self.table_name.to_owned())
            .index_name(self.cccd_index.to_owned())
            .key_condition_expression("#cccd = :cccd")
            .expression_attribute_names("#cccd", CCCD)
            .expression_attribute_values(":cccd", AttributeValue::S(cccd.to_owned()))
            .into_paginator()
            .send();
        let mut items = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(backend)?;
            debug!("query page returned {} items", page.count);
            items.extend(page.items.unwrap_or_default());
        }
        Ok(items)
    }

    async fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        let mut pages = self.client.scan()
            .table_name(self.table_name.to_owned())
            .into_paginator()
            .send();
        let mut items = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(backend)?;
            debug!("scan page returned {} items", page.count);
            items.extend(page.items.unwrap_or_default());
        }
        Ok(items)
    }
}
