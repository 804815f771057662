//! Error handling.
//!
//! Errors are split by how they are handled:
//! - **Surfaced**: [`FetchError`] and its sources ([`TransportError`],
//!   [`ParseError`]) abort the whole request and reach the caller.
//! - **Swallowed**: [`CachePersistenceError`] is logged and the cache degrades
//!   to in-memory only.
//! - **Collaborator**: [`SearchError`] wraps a failed search request.
//! - **Start-up**: [`InitializationError`] and [`ConfigValidationError`].

mod types;

// Re-export public API
pub use types::{
    CachePersistenceError, ConfigValidationError, FetchError, InitializationError, ParseError,
    SearchError, TransportError,
};
