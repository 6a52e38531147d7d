use aws_config::meta::region::RegionProviderChain;
use aws_config::SdkConfig;
use std::env;

use crate::error::StoreError;

const TABLE_NAME: &str = "TABLE_NAME";
const DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";
const CCCD_INDEX_NAME: &str = "CCCD_INDEX_NAME";
const AUTH_RESPONSE_TOPIC: &str = "AUTH_RESPONSE_TOPIC";
const IOT_DATA_ENDPOINT: &str = "IOT_DATA_ENDPOINT";

pub const DEFAULT_CCCD_INDEX: &str = "CCCDIndex";
pub const DEFAULT_AUTH_TOPIC: &str = "auth/response";

/// Settings shared by every handler, read once at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub table_name: String,
    pub dynamodb_endpoint: Option<String>,
    pub cccd_index: String,
    pub auth_topic: String,
    pub iot_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Config, StoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let table_name = get(TABLE_NAME)
            .ok_or_else(|| StoreError::Backend(format!("{} is not set", TABLE_NAME)))?;
        Ok(Config {
            table_name,
            dynamodb_endpoint: get(DYNAMODB_ENDPOINT),
            cccd_index: get(CCCD_INDEX_NAME).unwrap_or_else(|| DEFAULT_CCCD_INDEX.to_string()),
            auth_topic: get(AUTH_RESPONSE_TOPIC).unwrap_or_else(|| DEFAULT_AUTH_TOPIC.to_string()),
            iot_endpoint: get(IOT_DATA_ENDPOINT),
        })
    }
}

pub async fn load_sdk_config() -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider().or_else("us-east-1");
    aws_config::from_env().region(region_provider).load().await
}
