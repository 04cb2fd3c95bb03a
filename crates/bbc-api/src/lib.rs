//! # bbc-api — HTTP Service for the Connector Directory
//!
//! ## API Surface
//!
//! | Route                               | Module                  | Access          |
//! |-------------------------------------|-------------------------|-----------------|
//! | `GET /{kind}`, `GET /{kind}/{id}`   | [`routes::directory`]   | public, any CORS origin |
//! | `POST /{kind}`                      | [`routes::directory`]   | public, allow-listed CORS |
//! | `DELETE /{kind}/{id}`               | [`routes::directory`]   | admin           |
//! | `GET /pending/{kind}/{pending_id}`  | [`routes::pending`]     | admin           |
//! | `GET /health/liveness`              | here                    | public          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → Extension(AdminCredentials) → per-group layers → Handler
//!   reads:       CORS (any origin)
//!   submissions: CORS (allow-list)
//!   admin:       HTTPS redirect → Basic auth
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes are mounted outside every guard.
pub fn app(state: AppState) -> Router {
    let credentials = state.config.admin.clone();

    let reads = routes::directory::read_router().layer(middleware::cors::public_reads());

    let submissions = routes::directory::submission_router()
        .layer(middleware::cors::submissions(&state.config.submission_origins));

    let admin = Router::new()
        .merge(routes::directory::admin_router())
        .merge(routes::pending::router())
        .route_layer(from_fn(auth::require_admin))
        .route_layer(from_fn(middleware::https::require_https));

    let api = Router::new()
        .merge(reads)
        .merge(submissions)
        .merge(admin)
        .layer(axum::Extension(credentials))
        .with_state(state);

    let health = Router::new().route("/health/liveness", axum::routing::get(liveness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(middleware::tracing_layer::layer())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}
