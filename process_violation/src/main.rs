use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use process_violation::function_handler;
use serde_json::Value;
use violation_store::{config, init_tracing, Config, DynamoStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::from_env()?;
    let sdk_config = config::load_sdk_config().await;
    let log = DynamoStore::new(&sdk_config, &config);

    run(service_fn(|event: LambdaEvent<Value>| function_handler(&log, event))).await
}
