use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::services::{message_service, page_service};
use crate::state::AppState;
use crate::utils::{render_page, AppError};

/// GET /
///
/// Latest price, day-over-day change and up to two charts.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let now = message_service::now_kst();
    tracing::info!("🏠 Page requested at {}", now.format("%Y-%m-%d %H:%M:%S"));

    let view = page_service::build_page_view(&state, now).await?;

    Ok(Html(render_page(&view)))
}
