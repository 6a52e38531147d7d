use lambda_http::{Body, Error, Response};
use serde::Serialize;
use serde_json::json;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

/// 200 with the full set of cross-origin headers for the read endpoints.
pub fn ok_json<T: Serialize>(payload: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload)?;
    Ok(Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .header(ALLOW_ORIGIN, "*")
        .header(ALLOW_HEADERS, "Content-Type")
        .header(ALLOW_METHODS, "GET, OPTIONS")
        .body(body.into())
        .map_err(Box::new)?)
}

fn error_json(status: u16, payload: serde_json::Value) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header(ALLOW_ORIGIN, "*")
        .body(payload.to_string().into())
        .map_err(Box::new)?)
}

/// 4xx carrying `{"message": ...}`.
pub fn client_error(status: u16, message: &str) -> Result<Response<Body>, Error> {
    error_json(status, json!({ "message": message }))
}

/// 5xx carrying `{"error": ...}`.
pub fn server_error(message: &str) -> Result<Response<Body>, Error> {
    error_json(500, json!({ "error": message }))
}
