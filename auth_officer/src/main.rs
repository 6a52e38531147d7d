use auth_officer::function_handler;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use violation_store::{config, init_tracing, Config, DynamoStore, IotNotifier};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::from_env()?;
    let sdk_config = config::load_sdk_config().await;
    let directory = DynamoStore::new(&sdk_config, &config);
    let notifier = IotNotifier::new(&sdk_config, &config);
    let topic = config.auth_topic.as_str();

    run(service_fn(|event: LambdaEvent<Value>| {
        function_handler(&directory, &notifier, topic, event)
    })).await
}
