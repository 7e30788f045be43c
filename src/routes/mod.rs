use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod home;

/// URL prefix the static directory is served under
pub const STATIC_URL: &str = "/static";

/// The index page plus the static assets it links to
pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(home::home))
        .nest_service(STATIC_URL, ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
