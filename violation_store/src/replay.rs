//! Canned HTTP exchanges for exercising the SDK backed adapters.

use std::future::Future;

use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_runtime_api::http::{Request, Response, StatusCode};
use aws_smithy_types::body::SdkBody;

pub const DYNAMODB_JSON: &str = "application/x-amz-json-1.0";

pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// One request/response pair. The request side is never matched against.
pub fn exchange(status: u16, content_type: &'static str, body: &str) -> ReplayEvent {
    let mut response = Response::new(
        StatusCode::try_from(status).unwrap(),
        SdkBody::from(body.to_string()),
    );
    response.headers_mut().insert("content-type", content_type);
    ReplayEvent::new(Request::new(SdkBody::empty()), response)
}

pub fn sent_json(http_client: &StaticReplayClient) -> Vec<serde_json::Value> {
    http_client.actual_requests()
        .map(|req| serde_json::from_slice(req.body().bytes().unwrap()).unwrap())
        .collect()
}

pub fn sent_headers(http_client: &StaticReplayClient, name: &str) -> Vec<String> {
    http_client.actual_requests()
        .map(|req| req.headers().get(name).unwrap_or_default().to_string())
        .collect()
}
