#![deny(unsafe_code)]
//! TLS socket options
//!
//! The coprocessor runs the TLS handshake itself during `connect`; the
//! client only selects the handshake method, the cipher mask and the CA
//! certificate beforehand. The driver validates each option as it is set and
//! rejects them out of this order, so [`TlsOptions::options`] always yields
//! method, then cipher mask, then trust anchor.

use heapless::Vec;
use netstack_hal::{CipherSuite, SecureMethod, SocketApi, SocketOption};

use super::error::NetworkError;
use super::socket::SocketGuard;

/// Options for a secure socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsOptions<'a> {
    /// Handshake method
    pub method: SecureMethod,
    /// Permitted cipher suites
    pub cipher: CipherSuite,
    /// CA certificate path on the device file system
    pub trust_anchor: Option<&'a str>,
}

impl<'a> TlsOptions<'a> {
    /// SSLv3 up to TLS 1.2 with ECDHE-RSA-AES256-CBC-SHA
    pub const fn secure(trust_anchor: Option<&'a str>) -> Self {
        Self {
            method: SecureMethod::Sslv3Tlsv12,
            cipher: CipherSuite::EcdheRsaWithAes256CbcSha,
            trust_anchor,
        }
    }

    /// TLS 1.0 only, for legacy servers
    pub const fn legacy(trust_anchor: Option<&'a str>) -> Self {
        Self {
            method: SecureMethod::Tlsv1,
            cipher: CipherSuite::EcdheRsaWithAes256CbcSha,
            trust_anchor,
        }
    }

    /// Option calls in the order the driver requires
    ///
    /// Without a trust anchor the server certificate is not verified and the
    /// third option is left out.
    pub fn options(&self) -> Vec<SocketOption<'a>, 3> {
        let mut options = Vec::new();
        options.extend([
            SocketOption::SecureMethod(self.method),
            SocketOption::CipherMask(self.cipher),
        ]);
        options.extend(self.trust_anchor.map(SocketOption::TrustAnchor));
        options
    }

    /// Apply every option to an open secure socket
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::SocketConfigError` on the first rejected option;
    /// the remaining options are not attempted.
    pub fn apply<S: SocketApi>(&self, socket: &mut SocketGuard<'_, S>) -> Result<(), NetworkError> {
        if self.trust_anchor.is_none() {
            warn!("No trust anchor configured, server certificate will not be verified");
        }
        debug!("Applying TLS options: method {:?}", self.method);
        for option in self.options().iter() {
            socket.set_option(option)?;
        }
        Ok(())
    }
}

impl Default for TlsOptions<'_> {
    fn default() -> Self {
        Self::secure(None)
    }
}
