//! Storefront upstream forwarding
//!
//! Pass-through requests are relayed to the configured storefront origin;
//! the edge only decides routing, it renders nothing itself.

use axum::{
    body::Body,
    extract::{Request, State},
    response::Response,
};

use crate::error::{EdgeError, EdgeResult};
use crate::state::AppState;

/// Maximum buffered request body size (2MB).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Headers that must not be relayed between hops.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
    "host",
];

/// Forward a request to the storefront origin and relay the response.
pub async fn forward_to_storefront(
    State(state): State<AppState>,
    req: Request<Body>,
) -> EdgeResult<Response> {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", state.config.storefront_url, path_and_query);

    let (parts, body) = req.into_parts();
    let body_bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| EdgeError::Upstream(format!("request body: {e}")))?;

    let mut headers = parts.headers;
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(*name);
    }

    tracing::debug!(method = %parts.method, url = %url, "Forwarding to storefront");

    let upstream = state
        .http
        .request(parts.method, url.as_str())
        .headers(headers)
        .body(body_bytes)
        .send()
        .await?;

    let status = upstream.status();
    let mut response_headers = upstream.headers().clone();
    for name in HOP_BY_HOP_HEADERS {
        response_headers.remove(*name);
    }

    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::{header, StatusCode};

    fn test_state(storefront_url: &str) -> AppState {
        AppState::new(Config {
            bind_address: "127.0.0.1:0".to_string(),
            medusa_backend_url: "http://backend.internal".to_string(),
            region_cache_ttl_secs: 3600,
            storefront_url: storefront_url.trim_end_matches('/').to_string(),
            upstream_timeout_secs: 5,
            default_region: "us".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_forwards_path_query_and_relays_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/us/store?sort=price")
            .match_header("x-request-id", "edge-1")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>store</html>")
            .create_async()
            .await;

        let state = test_state(&server.url());
        let req = Request::builder()
            .uri("/us/store?sort=price")
            .header("x-request-id", "edge-1")
            .header(header::HOST, "shop.example.com")
            .body(Body::empty())
            .unwrap();

        let response = forward_to_storefront(State(state), req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        let body = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<html>store</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_upstream_error() {
        // Port 9 (discard) is not listening.
        let state = test_state("http://127.0.0.1:9");
        let req = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let err = forward_to_storefront(State(state), req).await.unwrap_err();
        assert!(matches!(err, EdgeError::Upstream(_)));
    }
}
