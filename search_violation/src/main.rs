use lambda_http::{run, service_fn, Error, Request};
use search_violation::function_handler;
use violation_store::{config, init_tracing, Config, DynamoStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::from_env()?;
    let sdk_config = config::load_sdk_config().await;
    let log = DynamoStore::new(&sdk_config, &config);

    run(service_fn(|event: Request| function_handler(&log, event))).await
}
