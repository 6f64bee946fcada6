#![deny(unsafe_code)]
//! One-shot HTTP(S) GET over the coprocessor socket API
//!
//! A request resolves the host, opens a socket, applies the receive timeout
//! (and the TLS options for secure requests), connects, writes the request
//! head once and reads the response once into a caller-owned buffer. The
//! response is returned as raw bytes; no HTTP parsing happens here.

use core::fmt::Write as _;
use core::net::SocketAddrV4;

use heapless::String;
use netstack_hal::{AddressFamily, Resolver, SocketApi, SocketKind, SocketOption};

use super::config::{HttpConfig, LineEnding};
use super::dns;
use super::error::NetworkError;
use super::socket::{with_socket, SocketGuard};
use super::tls::TlsOptions;

/// Capacity of the request head buffer
pub const REQUEST_CAPACITY: usize = 256;

/// Customary response buffer size for [`HttpClient::get`]
pub const RESPONSE_CAPACITY: usize = 1024;

/// Port for plain requests
pub const HTTP_PORT: u16 = 80;

/// Port for secure requests
pub const HTTPS_PORT: u16 = 443;

/// Request head text
pub type RequestBuffer = String<REQUEST_CAPACITY>;

/// A single GET request
#[derive(Debug, Clone, Copy)]
pub struct ConnectionRequest<'a> {
    /// Server hostname (also sent as the `Host` header)
    pub host: &'a str,
    /// Request path, e.g. `/index.html`
    pub path: &'a str,
    /// TLS options; `None` for plain HTTP
    pub tls: Option<TlsOptions<'a>>,
}

impl<'a> ConnectionRequest<'a> {
    /// Plain HTTP request on port 80
    pub const fn plain(host: &'a str, path: &'a str) -> Self {
        Self {
            host,
            path,
            tls: None,
        }
    }

    /// HTTPS request on port 443 with the default secure options
    pub const fn secure(host: &'a str, path: &'a str, trust_anchor: Option<&'a str>) -> Self {
        Self::with_tls(host, path, TlsOptions::secure(trust_anchor))
    }

    /// HTTPS request on port 443 with explicit TLS options
    pub const fn with_tls(host: &'a str, path: &'a str, tls: TlsOptions<'a>) -> Self {
        Self {
            host,
            path,
            tls: Some(tls),
        }
    }

    /// Whether this request uses a secure socket
    pub const fn is_secure(&self) -> bool {
        self.tls.is_some()
    }

    /// Remote port implied by the security mode
    pub const fn port(&self) -> u16 {
        if self.is_secure() {
            HTTPS_PORT
        } else {
            HTTP_PORT
        }
    }
}

/// Build the request head with bare line feeds
///
/// `GET {path} HTTP/1.1\nHost: {host}\n\n`
///
/// # Errors
///
/// Returns `NetworkError::RequestTooLarge` if the text exceeds
/// [`REQUEST_CAPACITY`].
pub fn build_request(host: &str, path: &str) -> Result<RequestBuffer, NetworkError> {
    build_request_with(host, path, LineEnding::Lf)
}

/// Build the request head with the given line terminator
///
/// # Errors
///
/// Returns `NetworkError::RequestTooLarge` if the text exceeds
/// [`REQUEST_CAPACITY`].
pub fn build_request_with(
    host: &str,
    path: &str,
    line_ending: LineEnding,
) -> Result<RequestBuffer, NetworkError> {
    let eol = line_ending.as_str();
    let mut request = RequestBuffer::new();
    write!(request, "GET {path} HTTP/1.1{eol}Host: {host}{eol}{eol}").map_err(|_| {
        error!("Request for {} on {} exceeds {} bytes", path, host, REQUEST_CAPACITY);
        NetworkError::RequestTooLarge
    })?;
    Ok(request)
}

/// Write the request once, then read once into `response`
///
/// Returns the number of bytes received; bytes of `response` past that count
/// are left untouched.
///
/// # Errors
///
/// Returns `NetworkError::SendError` or `NetworkError::ReceiveError` from the
/// failing step.
pub fn exchange<S: SocketApi>(
    socket: &mut SocketGuard<'_, S>,
    request: &[u8],
    response: &mut [u8],
) -> Result<usize, NetworkError> {
    let sent = socket.send(request)?;
    if sent < request.len() {
        warn!("Short write: {} of {} bytes sent", sent, request.len());
    } else {
        debug!("Sent {} bytes", sent);
    }

    let received = socket.recv(response)?;
    info!("Received {} bytes", received);
    Ok(received)
}

/// Blocking HTTP(S) client
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClient {
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self {
            config: HttpConfig::default(),
        }
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Perform one GET request, reading the response into `response`
    ///
    /// The sequence is resolve, open, receive timeout, TLS options (secure
    /// requests only), connect, send, receive. The first failing step ends
    /// the request; a socket opened along the way is always closed before
    /// this returns. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the `NetworkError` of the first step that failed.
    pub fn get<D>(
        &self,
        driver: &mut D,
        request: &ConnectionRequest<'_>,
        response: &mut [u8],
    ) -> Result<usize, NetworkError>
    where
        D: Resolver + SocketApi,
    {
        info!(
            "GET {} from {}:{}",
            request.path,
            request.host,
            request.port()
        );
        let head = build_request_with(request.host, request.path, self.config.line_ending)?;
        let addr = dns::resolve(driver, request.host)?;
        let remote = SocketAddrV4::new(addr, request.port());

        with_socket(
            driver,
            AddressFamily::Inet,
            SocketKind::Stream,
            request.is_secure(),
            |socket| {
                socket.set_option(&SocketOption::ReceiveTimeout(self.config.receive_timeout))?;
                if let Some(tls) = &request.tls {
                    tls.apply(socket)?;
                }
                socket.connect(remote)?;
                exchange(socket, head.as_bytes(), response)
            },
        )
    }
}
