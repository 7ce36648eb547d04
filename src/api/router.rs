//! Triage API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. The service binds to loopback only, so
//! there is no auth layer; errors come back as structured JSON.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::catalog::DiseaseCatalog;

/// Build the triage API router.
pub fn api_router(catalog: Arc<DiseaseCatalog>) -> Router {
    build_router(ApiContext::new(catalog))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/diseases", get(endpoints::diseases::list))
        .route("/diseases/:name", get(endpoints::diseases::detail))
        .route("/screen", post(endpoints::screen::screen))
        .route("/confirm", post(endpoints::confirm::confirm))
        .route("/sessions", post(endpoints::sessions::create))
        .route(
            "/sessions/:id",
            get(endpoints::sessions::transcript).delete(endpoints::sessions::remove),
        )
        .route(
            "/sessions/:id/messages",
            post(endpoints::sessions::message),
        )
        .with_state(ctx);

    Router::new().nest("/api", routes)
}
