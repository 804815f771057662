//! In-memory [`Transport`] for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error_handling::TransportError;
use crate::transport::{Target, Transport};

/// One request seen by the scripted transport.
#[derive(Debug, Clone)]
pub(crate) struct Exchange {
    pub(crate) target: Target,
    pub(crate) request: String,
}

impl Exchange {
    pub(crate) fn request_line(&self) -> &str {
        self.request.split("\r\n").next().unwrap_or_default()
    }
}

/// Answers requests from a route table keyed by `scheme://host:port/path?query`.
/// Unknown routes fail like a refused connection.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    routes: Arc<HashMap<String, Vec<u8>>>,
    log: Arc<Mutex<Vec<Exchange>>>,
}

impl ScriptedTransport {
    pub(crate) fn new(routes: Vec<(&str, String)>) -> Self {
        Self {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(key, raw)| (key.to_string(), raw.into_bytes()))
                    .collect(),
            ),
            log: Arc::default(),
        }
    }

    pub(crate) fn exchanges(&self) -> Vec<Exchange> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn sockets_opened(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    async fn exchange(&self, target: &Target, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        let request = String::from_utf8_lossy(request).into_owned();
        let path = request
            .split(' ')
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let scheme = if target.tls { "https" } else { "http" };
        let key = format!("{scheme}://{}:{}{}", target.host, target.port, path);

        self.log.lock().unwrap().push(Exchange {
            target: target.clone(),
            request,
        });

        self.routes
            .get(&key)
            .cloned()
            .ok_or_else(|| TransportError::Connect {
                host: target.host.clone(),
                port: target.port,
                source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, key),
            })
    }
}
