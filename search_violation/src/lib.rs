use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::{error, info};
use violation_store::attribute::{item_to_record, sort_newest_first};
use violation_store::http::{client_error, ok_json, server_error};
use violation_store::{Record, ViolationLog};

pub const CCCD_PARAM: &str = "cccd";
pub const MISSING_CCCD_MESSAGE: &str = "Missing cccd parameter";

/// All violations for one national-ID, newest first. A missing or empty
/// `cccd` is rejected before the store is touched.
pub async fn search(log: &dyn ViolationLog, cccd: Option<&str>) -> Result<Response<Body>, Error> {
    let cccd = match cccd.filter(|c| !c.is_empty()) {
        Some(c) => c,
        None => return client_error(400, MISSING_CCCD_MESSAGE)
    };
    match log.query_by_cccd(cccd).await {
        Ok(items) => {
            let mut records: Vec<Record> = items.iter().map(item_to_record).collect();
            sort_newest_first(&mut records);
            info!("found {} violations for cccd {}", records.len(), cccd);
            ok_json(&records)
        }
        Err(e) => {
            error!("search for cccd {} failed: {}", cccd, e);
            server_error(&e.to_string())
        }
    }
}

pub async fn function_handler(log: &dyn ViolationLog, event: Request) -> Result<Response<Body>, Error> {
    let params = event.query_string_parameters();
    info!("search request: {:?}", params);
    search(log, params.first(CCCD_PARAM)).await
}
