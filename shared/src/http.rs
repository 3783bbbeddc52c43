//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::json;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Create an error response with the given status code and message.
///
/// The body shape is the flat `{"error": "..."}` the site's frontend
/// expects, for every failure class.
pub fn error_response(
    status: u16,
    message: impl Into<String>,
) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &json!({ "error": message.into() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_is_flat() {
        let response = error_response(400, "Missing required fields").unwrap();
        assert_eq!(response.status(), 400);
        let body = std::str::from_utf8(response.body().as_ref()).unwrap();
        assert_eq!(body, r#"{"error":"Missing required fields"}"#);
    }
}
