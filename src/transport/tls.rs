//! TLS client setup.

use std::sync::Arc;

use rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::error_handling::TransportError;

/// Builds a connector trusting the Mozilla root set from `webpki-roots`.
pub(crate) fn build_connector() -> TlsConnector {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}

/// Converts a hostname into the SNI server name.
pub(crate) fn server_name(host: &str) -> Result<ServerName<'static>, TransportError> {
    ServerName::try_from(host.to_string())
        .map_err(|e| TransportError::InvalidServerName(format!("{host}: {e}")))
}
