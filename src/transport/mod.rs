//! Transport connector.
//!
//! Opens one TCP (or TLS over TCP) connection per attempt, writes the
//! serialized request in one operation and accumulates every received chunk
//! until the peer closes the connection. There is no `Content-Length` based
//! termination, no timeout and no connection reuse.
//!
//! Uses `tokio` sockets and `tokio-rustls` for TLS with SNI set to the hostname.

mod tls;

#[cfg(test)]
pub(crate) mod scripted;

use std::future::Future;
use std::io;

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;

use crate::config::{DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT, READ_CHUNK_SIZE};
use crate::error_handling::{FetchError, TransportError};

/// Where one attempt connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub tls: bool,
}

impl Target {
    /// Resolves the connection target of an `http`/`https` URL.
    ///
    /// The port is the explicit one from the URL, else 443 for `https` and 80
    /// for `http`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::UnsupportedUrl`] for other schemes or host-less URLs.
    pub fn from_url(url: &Url) -> Result<Self, FetchError> {
        let tls = match url.scheme() {
            "https" => true,
            "http" => false,
            _ => return Err(FetchError::UnsupportedUrl(url.to_string())),
        };
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| FetchError::UnsupportedUrl(url.to_string()))?;
        // IPv6 literals come back bracketed; sockets and SNI want them bare
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let default_port = if tls { DEFAULT_HTTPS_PORT } else { DEFAULT_HTTP_PORT };
        Ok(Self {
            host: host.to_string(),
            port: url.port().unwrap_or(default_port),
            tls,
        })
    }
}

/// Exchanges raw request bytes for raw response bytes over one connection.
///
/// Implementations own the connection for the duration of the call and close
/// it before returning.
pub trait Transport: Send + Sync {
    fn exchange(
        &self,
        target: &Target,
        request: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Real sockets: plain TCP for `http`, TLS for `https`.
#[derive(Clone)]
pub struct TcpTransport {
    connector: TlsConnector,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self {
            connector: tls::build_connector(),
        }
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for TcpTransport {
    async fn exchange(&self, target: &Target, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        debug!(
            "Connecting to {}:{} ({})",
            target.host,
            target.port,
            if target.tls { "tls" } else { "tcp" }
        );
        let sock = TcpStream::connect((target.host.as_str(), target.port))
            .await
            .map_err(|source| TransportError::Connect {
                host: target.host.clone(),
                port: target.port,
                source,
            })?;

        let raw = if target.tls {
            let server_name = tls::server_name(&target.host)?;
            let stream = self
                .connector
                .connect(server_name, sock)
                .await
                .map_err(|source| TransportError::Tls {
                    host: target.host.clone(),
                    source,
                })?;
            send_and_drain(stream, &target.host, request).await?
        } else {
            send_and_drain(sock, &target.host, request).await?
        };

        debug!(
            "Connection to {}:{} closed after {} bytes",
            target.host,
            target.port,
            raw.len()
        );
        Ok(raw)
    }
}

/// Writes the request, then reads until end-of-stream.
///
/// A TLS peer that closes without `close_notify` surfaces as `UnexpectedEof`;
/// that is treated as the close signal, like a plain TCP FIN.
async fn send_and_drain<S>(mut stream: S, host: &str, request: &[u8]) -> Result<Vec<u8>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let write_err = |source| TransportError::Write {
        host: host.to_string(),
        source,
    };
    stream.write_all(request).await.map_err(write_err)?;
    stream.flush().await.map_err(write_err)?;

    let mut raw = Vec::new();
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("Peer {host} closed without TLS close_notify");
                break;
            }
            Err(source) => {
                return Err(TransportError::Read {
                    host: host.to_string(),
                    source,
                })
            }
        }
    }

    // Best effort; the peer has already closed its side
    let _ = stream.shutdown().await;
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_default_ports() {
        let target = Target::from_url(&Url::parse("http://example.com/a").unwrap()).unwrap();
        assert_eq!(
            target,
            Target {
                host: "example.com".to_string(),
                port: 80,
                tls: false
            }
        );

        let target = Target::from_url(&Url::parse("https://example.com/").unwrap()).unwrap();
        assert_eq!(target.port, 443);
        assert!(target.tls);
    }

    #[test]
    fn test_target_explicit_port() {
        let target = Target::from_url(&Url::parse("https://localhost:8443/").unwrap()).unwrap();
        assert_eq!(target.host, "localhost");
        assert_eq!(target.port, 8443);
        assert!(target.tls);
    }

    #[test]
    fn test_target_ipv6_host_is_unbracketed() {
        let target = Target::from_url(&Url::parse("http://[::1]:8080/").unwrap()).unwrap();
        assert_eq!(target.host, "::1");
    }

    #[test]
    fn test_target_rejects_other_schemes() {
        let err = Target::from_url(&Url::parse("ftp://example.com/").unwrap()).unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedUrl(_)));
    }

    #[tokio::test]
    async fn test_connect_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let target = Target {
            host: "127.0.0.1".to_string(),
            port,
            tls: false,
        };
        let err = TcpTransport::new()
            .exchange(&target, b"GET / HTTP/1.1\r\n\r\n")
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }));
    }

    #[tokio::test]
    async fn test_plaintext_peer_fails_tls_handshake() {
        // Answers before reading anything, so the ClientHello gets plain HTTP back
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok")
                    .await;
                // Hold the socket open until the client gives up
                let mut rest = Vec::new();
                let _ = socket.read_to_end(&mut rest).await;
            }
        });

        let target = Target {
            host: "127.0.0.1".to_string(),
            port,
            tls: true,
        };
        let err = TcpTransport::new()
            .exchange(&target, b"GET / HTTP/1.1\r\n\r\n")
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Tls { ref host, .. } if host == "127.0.0.1"));
        assert!(err.to_string().contains("TLS handshake with 127.0.0.1 failed"));
    }

    #[tokio::test]
    async fn test_unexpected_eof_counts_as_close() {
        let stream = truncated_stream(b"HTTP/1.1 200 OK\r\n\r\npartial");
        let raw = send_and_drain(stream, "peer.test", b"GET / HTTP/1.1\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(raw, b"HTTP/1.1 200 OK\r\n\r\npartial");
    }

    /// Stream that yields `data`, then fails reads with `UnexpectedEof` the way
    /// a TLS session does when the peer skips `close_notify`.
    fn truncated_stream(data: &'static [u8]) -> TruncatedStream {
        TruncatedStream { data, sent: false }
    }

    struct TruncatedStream {
        data: &'static [u8],
        sent: bool,
    }

    impl AsyncRead for TruncatedStream {
        fn poll_read(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            if self.sent {
                return std::task::Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "peer closed connection without sending TLS close_notify",
                )));
            }
            buf.put_slice(self.data);
            self.sent = true;
            std::task::Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for TruncatedStream {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &[u8],
        ) -> std::task::Poll<io::Result<usize>> {
            std::task::Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }
}
