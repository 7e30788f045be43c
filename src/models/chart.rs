//! Chart artifact models

/// The two charts rendered for every page view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Candles for the last two trading days
    TwoDay,
    /// Closing price line over the whole lookback window
    Weekly,
}

impl ChartKind {
    /// Fixed file name under the image directory, reused by every request
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::TwoDay => "samyang_stock_2day_chart.png",
            ChartKind::Weekly => "samyang_stock_weekly_line_chart.png",
        }
    }
}

/// Which charts were written by one rendering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderedCharts {
    pub two_day: bool,
    pub weekly: bool,
}
