//! HTTP response model.

mod types;

pub use types::Response;
