use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::api::krx::{ApiError, KrxClient};
use crate::models::PriceSeries;

/// Calendar days looked back from today, enough to span a weekend plus a
/// holiday and still usually return two trading days
pub const LOOKBACK_DAYS: i64 = 7;

/// Source of daily prices for one listing
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Provider name (for logging)
    fn name(&self) -> &str;

    /// Daily bars for `symbol` with `start <= date <= end`.
    /// Dates without trading are simply missing; no rows is not an error.
    async fn fetch_daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        symbol: &str,
    ) -> Result<PriceSeries, ApiError>;
}

#[async_trait]
impl PriceProvider for KrxClient {
    fn name(&self) -> &str {
        "data.go.kr stock price service"
    }

    async fn fetch_daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        symbol: &str,
    ) -> Result<PriceSeries, ApiError> {
        // endBasDt is exclusive on the service side
        let end_exclusive = end + Duration::days(1);
        let items = self.get_stock_price_info(symbol, start, end_exclusive).await?;

        let bars = items
            .iter()
            .map(|item| item.to_bar())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::from_unsorted(bars))
    }
}

/// Inclusive `(start, end)` window ending on `today`
pub fn lookback_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(LOOKBACK_DAYS), today)
}

/// Fetch the lookback window ending on `today`. Provider failures propagate.
pub async fn fetch_recent_prices(
    provider: &dyn PriceProvider,
    symbol: &str,
    today: NaiveDate,
) -> Result<PriceSeries, ApiError> {
    let (start, end) = lookback_range(today);
    info!(
        "📈 Fetching {} daily prices {} ~ {} from {}",
        symbol,
        start,
        end,
        provider.name()
    );

    let series = provider.fetch_daily(start, end, symbol).await?;

    match series.latest() {
        Some(latest) => debug!(
            "Received {} trading day(s) for {}, latest {} (volume {})",
            series.len(),
            symbol,
            latest.date,
            latest.volume
        ),
        None => debug!("Received no trading days for {}", symbol),
    }
    Ok(series)
}
