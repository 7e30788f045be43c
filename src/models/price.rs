//! Daily price models

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// One trading day of prices, in won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: i64,
    pub high: i64,
    pub low: i64,
    pub close: i64,
    pub volume: u64,
}

/// Daily bars ordered by strictly increasing date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from provider rows in any order.
    /// When a date repeats, the row seen last wins.
    pub fn from_unsorted(bars: Vec<PriceBar>) -> Self {
        let by_date: BTreeMap<NaiveDate, PriceBar> =
            bars.into_iter().map(|bar| (bar.date, bar)).collect();

        Self {
            bars: by_date.into_values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Most recent bar
    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Bar before the most recent one
    pub fn previous(&self) -> Option<&PriceBar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    /// The last `n` bars, or all of them when the series is shorter
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Bar with a 500-won wick above and below the body
    pub fn bar(date: &str, open: i64, close: i64) -> PriceBar {
        PriceBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open,
            high: open.max(close) + 500,
            low: (open.min(close) - 500).max(0),
            close,
            volume: 10_000,
        }
    }

    pub fn series(bars: Vec<PriceBar>) -> PriceSeries {
        PriceSeries::from_unsorted(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::bar;
    use super::*;

    #[test]
    fn test_from_unsorted_orders_by_date() {
        let series = PriceSeries::from_unsorted(vec![
            bar("2024-01-05", 70000, 72000),
            bar("2024-01-03", 69000, 69500),
            bar("2024-01-04", 69500, 70000),
        ]);

        let dates: Vec<String> = series.bars().iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-04", "2024-01-05"]);
    }

    #[test]
    fn test_from_unsorted_keeps_last_duplicate() {
        let series = PriceSeries::from_unsorted(vec![
            bar("2024-01-05", 70000, 71000),
            bar("2024-01-05", 70000, 72000),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().unwrap().close, 72000);
    }

    #[test]
    fn test_latest_and_previous() {
        let series = PriceSeries::from_unsorted(vec![
            bar("2024-01-04", 70000, 70000),
            bar("2024-01-05", 70000, 72000),
        ]);

        assert_eq!(series.latest().unwrap().close, 72000);
        assert_eq!(series.previous().unwrap().close, 70000);
    }

    #[test]
    fn test_single_bar_has_no_previous() {
        let series = PriceSeries::from_unsorted(vec![bar("2024-01-05", 70000, 72000)]);
        assert!(series.previous().is_none());
        assert_eq!(series.tail(2).len(), 1);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::default();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
        assert!(series.tail(2).is_empty());
    }
}
