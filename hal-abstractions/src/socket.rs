#![deny(unsafe_code)]
//! Handle-based stream socket API
//!
//! Mirrors the shape of the socket API found on WiFi network coprocessors:
//! a socket is opened into an opaque handle, configured with option calls,
//! connected, used for blocking send/receive and finally closed. Secure
//! sockets are plain stream sockets opened with [`Protocol::Secure`] and
//! configured with the TLS options before `connect`.

use core::net::SocketAddrV4;
use core::time::Duration;

/// Socket address family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressFamily {
    /// IPv4
    Inet,
}

/// Socket type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocketKind {
    /// Connection oriented byte stream
    Stream,
    /// Connectionless datagrams
    Datagram,
}

/// Transport protocol selected at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// Plain TCP
    Tcp,
    /// Plain UDP
    Udp,
    /// TCP with the coprocessor's TLS engine in front
    Secure,
}

/// Handshake method for a secure socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecureMethod {
    /// TLS 1.0 only (legacy servers)
    Tlsv1,
    /// Negotiate anything from SSLv3 up to TLS 1.2
    Sslv3Tlsv12,
}

/// Cipher suite mask for a secure socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CipherSuite {
    /// TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA
    EcdheRsaWithAes256CbcSha,
}

/// Option applied to an open socket before `connect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketOption<'a> {
    /// Upper bound on a single blocking receive
    ReceiveTimeout(Duration),
    /// Secure sockets only: handshake method
    SecureMethod(SecureMethod),
    /// Secure sockets only: permitted cipher suites
    CipherMask(CipherSuite),
    /// Secure sockets only: path of the CA certificate on the device file system
    TrustAnchor(&'a str),
}

impl SocketOption<'_> {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReceiveTimeout(_) => "receive timeout",
            Self::SecureMethod(_) => "secure method",
            Self::CipherMask(_) => "cipher mask",
            Self::TrustAnchor(_) => "trust anchor",
        }
    }
}

/// Blocking, handle-based socket API
///
/// Every handle returned by [`SocketApi::open`] must eventually be passed to
/// [`SocketApi::close`] exactly once. Callers in `netstack-core` enforce this
/// with a scoped guard.
pub trait SocketApi {
    /// Opaque socket handle
    type Handle: Copy + core::fmt::Debug;
    /// Driver error type
    type Error: embedded_io::Error;

    /// Allocate a socket handle.
    fn open(
        &mut self,
        family: AddressFamily,
        kind: SocketKind,
        protocol: Protocol,
    ) -> Result<Self::Handle, Self::Error>;

    /// Apply one option. Must be called before `connect`.
    fn set_option(
        &mut self,
        handle: Self::Handle,
        option: &SocketOption<'_>,
    ) -> Result<(), Self::Error>;

    /// Connect to the remote endpoint (runs the TLS handshake on secure sockets).
    fn connect(&mut self, handle: Self::Handle, remote: SocketAddrV4) -> Result<(), Self::Error>;

    /// Write `data` once, returning the number of bytes accepted.
    fn send(&mut self, handle: Self::Handle, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read once into `buf`, blocking up to the configured receive timeout.
    fn recv(&mut self, handle: Self::Handle, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Release the handle.
    fn close(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;
}
