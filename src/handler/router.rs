//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: dispatch on method and exact
//! path, stamp cross-cutting headers, write one access line per request.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::api;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let mut entry = AccessLogEntry::begin(
        peer_addr.ip().to_string(),
        method.as_str().to_string(),
        path.clone(),
    );
    entry.query = query.clone();
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_string(&req, "referer");
    entry.user_agent = header_string(&req, "user-agent");

    let mut response = route_request(&method, &path, query.as_deref(), &state);

    let headers = response.headers_mut();
    if let Ok(name) = HeaderValue::from_str(&state.config.http.server_name) {
        headers.insert(header::SERVER, name);
    }
    if state.config.http.enable_cors {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch on method and exact pathname.
///
/// The table is matched in order and exhaustive: anything that is not
/// `GET /` or `GET /api/dados` falls through to the fixed 404, including
/// other methods on those paths.
fn route_request(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::GET, "/") => http::build_html_response(state.homepage.clone()),
        (&Method::GET, "/api/dados") => api::handle_dados(query),
        _ => http::build_not_found_response(),
    }
}

fn version_label(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_10 {
        "1.0"
    } else if version == hyper::Version::HTTP_2 {
        "2"
    } else if version == hyper::Version::HTTP_3 {
        "3"
    } else {
        "1.1"
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        let config = Config::load_from("no-such-config-file").unwrap();
        AppState::new(config, Bytes::from_static(b"<html>painel</html>"))
    }

    #[tokio::test]
    async fn test_root_serves_page() {
        let state = test_state();
        let resp = route_request(&Method::GET, "/", None, &state);

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, state.homepage);
    }

    #[test]
    fn test_api_route_dispatches_to_validator() {
        let state = test_state();
        let resp = route_request(
            &Method::GET,
            "/api/dados",
            Some("OLT=OLT01&SLOT=1&PON=2"),
            &state,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let state = test_state();
        let resp = route_request(&Method::GET, "/foo/bar", None, &state);

        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from("Rota não encontrada."));
    }

    #[test]
    fn test_method_and_path_are_checked_jointly() {
        let state = test_state();
        // POST on a known path falls through to 404, never to the API
        let resp = route_request(
            &Method::POST,
            "/api/dados",
            Some("OLT=OLT01&SLOT=1&PON=2"),
            &state,
        );
        assert_eq!(resp.status(), 404);

        let resp = route_request(&Method::HEAD, "/", None, &state);
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_no_trailing_slash_normalization() {
        let state = test_state();
        let resp = route_request(&Method::GET, "/api/dados/", None, &state);
        assert_eq!(resp.status(), 404);
    }
}
