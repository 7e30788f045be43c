//! Day-over-day change models

/// Latest close compared with the previous trading day's close
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSummary {
    pub current_price: i64,
    pub previous_price: Option<i64>,
    pub absolute_change: i64,
    pub percent_change: f64,
}

impl ChangeSummary {
    /// `false` when only one trading day was available
    pub fn has_comparison(&self) -> bool {
        self.previous_price.is_some()
    }
}
