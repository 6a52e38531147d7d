use lambda_http::{Body, Error, Request, Response};
use tracing::{error, info};
use violation_store::attribute::{item_to_record, sort_newest_first};
use violation_store::http::{ok_json, server_error};
use violation_store::{Record, ViolationLog};

/// Every violation in the table, newest first. Reads the whole table on
/// each call.
pub async fn dashboard(log: &dyn ViolationLog) -> Result<Response<Body>, Error> {
    match log.scan_all().await {
        Ok(items) => {
            let mut records: Vec<Record> = items.iter().map(item_to_record).collect();
            sort_newest_first(&mut records);
            info!("found {} records", records.len());
            ok_json(&records)
        }
        Err(e) => {
            error!("dashboard scan failed: {}", e);
            server_error(&e.to_string())
        }
    }
}

pub async fn function_handler(log: &dyn ViolationLog, event: Request) -> Result<Response<Body>, Error> {
    info!("dashboard request: {} {}", event.method(), event.uri());
    dashboard(log).await
}
