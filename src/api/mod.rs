pub mod client;
pub mod interceptor;
pub mod resource;
pub mod stream;
pub mod types;

pub use client::ApiClient;
pub use interceptor::FetchError;
