use chrono::{DateTime, FixedOffset};
use tracing::{info, warn};

use crate::api::krx::ApiError;
use crate::models::{ChartKind, PageView};
use crate::services::{chart_service, change_service, market_data_service, message_service};
use crate::state::AppState;

/// Build the view for one page request at time `now`.
///
/// Every call refetches prices and redraws both charts. Only provider failures
/// are errors; missing data degrades to a message without charts.
pub async fn build_page_view(
    state: &AppState,
    now: DateTime<FixedOffset>,
) -> Result<PageView, ApiError> {
    let series = market_data_service::fetch_recent_prices(
        state.provider.as_ref(),
        &state.symbol,
        now.date_naive(),
    )
    .await?;

    let mut view = PageView {
        stock_name: state.stock_name.clone(),
        ..PageView::default()
    };

    let (Some(latest), Some(summary)) = (series.latest(), change_service::compute_change(&series))
    else {
        warn!("No price data for {} in the lookback window", state.symbol);
        return Ok(view);
    };

    let label = message_service::price_label(now, latest.date);
    view.message = message_service::format_price_message(latest.date, label, summary.current_price);
    view.change_info = message_service::format_change_info(&summary);

    info!(
        "{} {:?} {} (change {}, {:.2}%)",
        state.stock_name, label, summary.current_price, summary.absolute_change, summary.percent_change
    );

    let rendered = chart_service::render_charts(&series, &state.stock_name, &state.images_dir).await;
    if rendered.two_day {
        view.chart_2day_image_url = Some(chart_url(state, ChartKind::TwoDay));
    }
    if rendered.weekly {
        view.chart_weekly_image_url = Some(chart_url(state, ChartKind::Weekly));
    }

    Ok(view)
}

fn chart_url(state: &AppState, kind: ChartKind) -> String {
    format!("{}/{}", state.images_url.trim_end_matches('/'), kind.file_name())
}
