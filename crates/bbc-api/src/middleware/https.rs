//! # HTTPS Redirect
//!
//! Behind a TLS-terminating proxy, admin routes must not accept credentials
//! over plain HTTP. A request the proxy marks `X-Forwarded-Proto: http` is
//! answered with `301` to the same host and path over `https`.

use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

pub const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub async fn require_https(request: Request, next: Next) -> Response {
    let forwarded_http = request
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("http"));
    if !forwarded_http {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = format!("https://{host}{path}");
    tracing::debug!(%location, "redirecting admin request to https");

    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .route("/pending/apps/1", get(|| async { "ok" }))
            .layer(from_fn(require_https))
    }

    #[tokio::test]
    async fn plain_http_is_redirected() {
        let request = Request::builder()
            .uri("/pending/apps/1?action=approve")
            .header("host", "api.example.org")
            .header(FORWARDED_PROTO, "http")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://api.example.org/pending/apps/1?action=approve"
        );
    }

    #[tokio::test]
    async fn https_and_direct_requests_pass() {
        for proto in [Some("https"), None] {
            let mut builder = Request::builder().uri("/pending/apps/1");
            if let Some(p) = proto {
                builder = builder.header(FORWARDED_PROTO, p);
            }
            let response = test_app()
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
