//! Page view model

/// Shown when the provider returned no rows for the lookback window
pub const UNAVAILABLE_MESSAGE: &str = "주가 정보를 가져올 수 없습니다.";

/// Everything the index template needs for one request
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Listing name shown in the title and heading; escaped when rendered
    pub stock_name: String,
    /// Plain text; escaped when rendered
    pub message: String,
    /// Trusted markup inserted as-is
    pub change_info: String,
    pub chart_2day_image_url: Option<String>,
    pub chart_weekly_image_url: Option<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            stock_name: String::new(),
            message: UNAVAILABLE_MESSAGE.to_string(),
            change_info: String::new(),
            chart_2day_image_url: None,
            chart_weekly_image_url: None,
        }
    }
}
