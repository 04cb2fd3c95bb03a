//! # Moderator Authentication
//!
//! Moderation and delete routes are guarded by HTTP Basic credentials
//! configured at startup. The expected [`AdminCredentials`] are injected as
//! a request extension and compared in constant time.
//!
//! ```text
//! Authorization: Basic base64("{user}:{password}")
//! ```
//!
//! A missing or wrong header yields `401` with a `WWW-Authenticate`
//! challenge so browsers prompt for credentials.

use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;

use crate::error::AppError;

const CHALLENGE: &str = "Basic realm=\"Authorization Required\"";

/// Moderator login.
///
/// Custom `Debug` redacts the password to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AdminCredentials {
    user: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Whether `user`/`password` match, without short-circuiting on the
    /// first mismatch.
    pub fn verify(&self, user: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(user, &self.user);
        let password_ok = constant_time_eq(password, &self.password);
        user_ok & password_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Constant-time string comparison. Unequal lengths still perform a
/// comparison so timing does not reveal the expected length.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Decode a `Basic` authorization header value into `(user, password)`.
pub fn parse_basic(header_value: &str) -> Result<(String, String), &'static str> {
    let (scheme, encoded) = header_value
        .trim()
        .split_once(' ')
        .ok_or("malformed authorization header")?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err("authorization header must use Basic scheme");
    }
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| "malformed basic credentials")?;
    let text = String::from_utf8(decoded).map_err(|_| "malformed basic credentials")?;
    let (user, password) = text
        .split_once(':')
        .ok_or("malformed basic credentials")?;
    Ok((user.to_string(), password.to_string()))
}

/// Reject requests without valid moderator credentials.
///
/// Requires an [`AdminCredentials`] extension; without one every request is
/// refused.
pub async fn require_admin(request: Request, next: Next) -> Response {
    let Some(expected) = request.extensions().get::<AdminCredentials>().cloned() else {
        tracing::error!("admin route reached without configured credentials");
        return unauthorized_response("authentication is not configured");
    };

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match header_value.map(parse_basic) {
        Some(Ok((user, password))) if expected.verify(&user, &password) => next.run(request).await,
        Some(Ok(_)) => {
            tracing::warn!("authentication failed: wrong moderator credentials");
            unauthorized_response("invalid credentials")
        }
        Some(Err(reason)) => {
            tracing::warn!(reason, "authentication failed");
            unauthorized_response(reason)
        }
        None => {
            tracing::warn!("authentication failed: missing authorization header");
            unauthorized_response("missing authorization header")
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    let mut response = AppError::Unauthorized(message.to_string()).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn basic(user: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
    }

    fn test_app(credentials: Option<AdminCredentials>) -> Router {
        let router = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(from_fn(require_admin));
        match credentials {
            Some(c) => router.layer(axum::Extension(c)),
            None => router,
        }
    }

    async fn send(app: Router, authorization: Option<&str>) -> Response {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn valid_credentials_accepted() {
        let app = test_app(Some(AdminCredentials::new("mod", "s3cret")));
        let response = send(app, Some(&basic("mod", "s3cret"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn wrong_password_rejected_with_challenge() {
        let app = test_app(Some(AdminCredentials::new("mod", "s3cret")));
        let response = send(app, Some(&basic("mod", "guess"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            CHALLENGE
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(err["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn missing_header_rejected() {
        let app = test_app(Some(AdminCredentials::new("mod", "s3cret")));
        let response = send(app, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bearer_scheme_rejected() {
        let app = test_app(Some(AdminCredentials::new("mod", "s3cret")));
        let response = send(app, Some("Bearer s3cret")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(err["error"]["message"].as_str().unwrap().contains("Basic scheme"));
    }

    #[tokio::test]
    async fn unconfigured_credentials_refuse_everything() {
        let response = send(test_app(None), Some(&basic("mod", "s3cret"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn parse_basic_handles_colons_in_password() {
        let (user, password) = parse_basic(&basic("mod", "a:b:c")).unwrap();
        assert_eq!(user, "mod");
        assert_eq!(password, "a:b:c");
    }

    #[test]
    fn parse_basic_rejects_garbage() {
        assert!(parse_basic("Basic !!!not-base64").is_err());
        assert!(parse_basic(&format!("Basic {}", STANDARD.encode("no-colon"))).is_err());
        assert!(parse_basic("Basic").is_err());
    }

    #[test]
    fn verify_requires_both_parts() {
        let creds = AdminCredentials::new("mod", "pw");
        assert!(creds.verify("mod", "pw"));
        assert!(!creds.verify("mod", "pw "));
        assert!(!creds.verify("admin", "pw"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", AdminCredentials::new("mod", "hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("mod"));
    }
}
