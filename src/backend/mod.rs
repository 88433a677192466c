// backend module: HTTP client for the screen-time service

pub mod client;
mod error;

pub use client::BackendClient;
pub use error::BackendError;
