pub mod client;
pub mod models;

pub use client::KrxClient;
pub use models::ApiError;
