//! Response builders for the page and the fallthrough route.
//!
//! Cross-cutting headers (Server, CORS) are applied by the router after
//! dispatch, so these builders only set what is specific to each route.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Fixed body for every unmatched route
pub const NOT_FOUND_BODY: &str = "Rota não encontrada.";

/// 200 page response for `GET /`.
///
/// The bytes are served verbatim; cloning the `Bytes` handle per request
/// is a refcount bump, not a copy.
pub fn build_html_response(page: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .body(Full::new(page))
        .unwrap_or_else(|e| {
            log_build_error("page", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 404 for any method/path pair outside the route table
pub fn build_not_found_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(NOT_FOUND_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_BODY)))
        })
}

fn log_build_error(which: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {which} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_html_response_serves_page_verbatim() {
        let page = Bytes::from_static("<html>consulta</html>".as_bytes());
        let resp = build_html_response(page.clone());

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, page);
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let resp = build_not_found_response();

        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from(NOT_FOUND_BODY));
    }
}
