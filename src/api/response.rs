// JSON response builders for the query API

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

const FALLBACK_BODY: &[u8] = br#"{"error":"Internal server error"}"#;

/// Serialize `body` compactly and wrap it in a response with the given
/// status. Compact output keeps repeated identical requests
/// byte-identical on the wire.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => json_bytes(status, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            json_bytes(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(FALLBACK_BODY),
            )
        }
    }
}

/// 400 Bad Request carrying a JSON `{error}` body
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    json_bytes(StatusCode::BAD_REQUEST, Bytes::from(body.to_string()))
}

fn json_bytes(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from_static(FALLBACK_BODY)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_json_response_is_compact() {
        #[derive(Serialize)]
        struct Sample {
            a: i64,
            b: Option<i64>,
        }

        let resp = json_response(StatusCode::OK, &Sample { a: 1, b: None });
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from(r#"{"a":1,"b":null}"#));
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let resp = bad_request("mensagem de erro");
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from(r#"{"error":"mensagem de erro"}"#));
    }
}
