use std::path::PathBuf;
use std::sync::Arc;

use crate::services::market_data_service::PriceProvider;

/// Shared application state available to request handlers via axum's
/// `State` extractor.
pub struct AppState {
    /// Where daily prices come from
    pub provider: Arc<dyn PriceProvider>,

    /// Identifier passed to the provider
    pub symbol: String,

    /// Display name used in the page heading and chart titles
    pub stock_name: String,

    /// Directory chart images are written to
    pub images_dir: PathBuf,

    /// URL path the images directory is served under
    pub images_url: String,
}
