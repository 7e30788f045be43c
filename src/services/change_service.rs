use crate::models::{ChangeSummary, PriceSeries};

/// Compare the latest close against the previous trading day's close.
///
/// Returns `None` for an empty series. With a single bar the change is zero
/// and `previous_price` is absent.
pub fn compute_change(series: &PriceSeries) -> Option<ChangeSummary> {
    let latest = series.latest()?;
    let current_price = latest.close;

    let Some(previous) = series.previous() else {
        return Some(ChangeSummary {
            current_price,
            previous_price: None,
            absolute_change: 0,
            percent_change: 0.0,
        });
    };

    let absolute_change = current_price - previous.close;
    let percent_change = if previous.close != 0 {
        absolute_change as f64 / previous.close as f64 * 100.0
    } else {
        0.0
    };

    Some(ChangeSummary {
        current_price,
        previous_price: Some(previous.close),
        absolute_change,
        percent_change,
    })
}
