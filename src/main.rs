use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use api::krx::KrxClient;
use config::Config;
use state::AppState;

fn init_tracing(debug: bool) {
    let crate_level = if debug { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for directive in [
        format!("samyang_price_board={}", crate_level),
        "tower_http=info".to_string(),
    ] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {}: {}", directive, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_tracing(config.as_ref().map(|c| c.debug).unwrap_or(true));

    info!("📊 Starting Samyang Foods price board...");

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    utils::font::init_chart_font(&config.font_path);

    let images_dir = config.images_dir();
    if let Err(e) = std::fs::create_dir_all(&images_dir) {
        error!("Failed to create image directory {}: {}", images_dir.display(), e);
        return;
    }
    info!("Chart images go to {}", images_dir.display());

    let client = KrxClient::with_base_url(config.service_key.clone(), config.api_base_url.clone());
    let state = Arc::new(AppState {
        provider: Arc::new(client),
        symbol: config.stock_isin.clone(),
        stock_name: config.stock_name.clone(),
        images_dir,
        images_url: format!("{}/{}", routes::STATIC_URL, config::IMAGES_SUBDIR),
    });

    let app = routes::router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}:{}: {}", config.host, config.port, e);
            return;
        }
    };
    info!(
        "Listening on http://{}:{} (debug: {})",
        config.host, config.port, config.debug
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
