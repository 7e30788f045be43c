pub mod errors;
pub mod font;
pub mod format;
pub mod page;

pub use errors::AppError;
pub use format::{format_axis_price, group_thousands};
pub use page::render_page;
