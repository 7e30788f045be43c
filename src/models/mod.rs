//! Data models for the price board
//!
//! Plain data shared between the provider client, the services and the page
//! renderer.

pub mod change;
pub mod chart;
pub mod page;
pub mod price;

// Re-export commonly used types for convenience
pub use change::ChangeSummary;
pub use chart::{ChartKind, RenderedCharts};
pub use page::{PageView, UNAVAILABLE_MESSAGE};
pub use price::{PriceBar, PriceSeries};
