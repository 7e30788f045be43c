pub mod change_service;
pub mod chart_service;
pub mod market_data_service;
pub mod message_service;
pub mod page_service;
