use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iotdataplane as iot;
use aws_sdk_iotdataplane::error::DisplayErrorContext;
use aws_sdk_iotdataplane::primitives::Blob;

use crate::config::Config;
use crate::error::StoreError;

/// At-least-once delivery back to devices.
const QOS_AT_LEAST_ONCE: i32 = 1;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), StoreError>;
}

/// Publishes MQTT messages through the IoT Core data plane.
#[derive(Debug, Clone)]
pub struct IotNotifier {
    client: iot::Client,
}

impl IotNotifier {
    pub fn new(sdk_config: &SdkConfig, config: &Config) -> IotNotifier {
        let iot_config = match &config.iot_endpoint {
            Some(endpoint) => iot::config::Builder::from(sdk_config).endpoint_url(endpoint).build(),
            None => iot::config::Builder::from(sdk_config).build()
        };
        IotNotifier { client: iot::Client::from_conf(iot_config) }
    }
}

#[async_trait]
impl Notifier for IotNotifier {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), StoreError> {
        self.client.publish()
            .topic(topic)
            .qos(QOS_AT_LEAST_ONCE)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| StoreError::Publish {
                topic: topic.to_string(),
                reason: DisplayErrorContext(e).to_string(),
            })?;
        Ok(())
    }
}
