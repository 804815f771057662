//! Process-wide initialization.
//!
//! - Logger (plain or JSON)
//! - rustls crypto provider

mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

pub use logger::init_logger_with;

/// Installs the ring crypto provider for rustls.
///
/// Must run before the first TLS connection. Calling it again is harmless.
pub fn init_crypto_provider() {
    let _ = CryptoProvider::install_default(default_provider());
}
