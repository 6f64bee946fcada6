#![deny(unsafe_code)]
//! Socket lifecycle management
//!
//! A [`SocketGuard`] owns one open handle and closes it when dropped, so every
//! handle that was opened is closed exactly once on every exit path, whether
//! the operation completed or a step failed part way. [`with_socket`] scopes
//! a guard to a closure: the socket is closed after the closure's last use of
//! it and before the result reaches the caller.

use core::net::SocketAddrV4;

use netstack_hal::{AddressFamily, Protocol, SocketApi, SocketKind, SocketOption};

use super::error::{kind_name, NetworkError};

/// Open socket handle, closed on drop
pub struct SocketGuard<'a, S: SocketApi> {
    api: &'a mut S,
    handle: S::Handle,
}

impl<'a, S: SocketApi> SocketGuard<'a, S> {
    /// Allocate a socket handle
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::SocketOpenError` if the driver refuses. Nothing
    /// was allocated in that case, so nothing is closed.
    pub fn open(
        api: &'a mut S,
        family: AddressFamily,
        kind: SocketKind,
        protocol: Protocol,
    ) -> Result<Self, NetworkError> {
        let handle = api.open(family, kind, protocol).map_err(|e| {
            error!("Failed to open {:?} socket: {}", protocol, kind_name(&e));
            NetworkError::SocketOpenError
        })?;
        debug!("Opened {:?} socket", protocol);
        Ok(Self { api, handle })
    }

    /// Apply one socket option
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::SocketConfigError` if the option is rejected.
    pub fn set_option(&mut self, option: &SocketOption<'_>) -> Result<(), NetworkError> {
        self.api.set_option(self.handle, option).map_err(|e| {
            error!("Failed to set {}: {}", option.name(), kind_name(&e));
            NetworkError::SocketConfigError
        })?;
        trace!("Set {}", option.name());
        Ok(())
    }

    /// Connect to `remote`
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ConnectError` if the connection (or the TLS
    /// handshake on a secure socket) fails.
    pub fn connect(&mut self, remote: SocketAddrV4) -> Result<(), NetworkError> {
        self.api.connect(self.handle, remote).map_err(|e| {
            error!(
                "Failed to connect to {:?}:{}: {}",
                remote.ip().octets(),
                remote.port(),
                kind_name(&e)
            );
            NetworkError::ConnectError
        })?;
        info!(
            "Connected to {:?}:{}",
            remote.ip().octets(),
            remote.port()
        );
        Ok(())
    }

    /// Write `data` once
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::SendError` if the write fails.
    pub fn send(&mut self, data: &[u8]) -> Result<usize, NetworkError> {
        self.api.send(self.handle, data).map_err(|e| {
            error!("Failed to send: {}", kind_name(&e));
            NetworkError::SendError
        })
    }

    /// Read once into `buf`
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ReceiveError` if the read fails or the receive
    /// timeout expires.
    pub fn recv(&mut self, buf: &mut [u8]) -> Result<usize, NetworkError> {
        self.api.recv(self.handle, buf).map_err(|e| {
            error!("Failed to receive: {}", kind_name(&e));
            NetworkError::ReceiveError
        })
    }
}

impl<S: SocketApi> Drop for SocketGuard<'_, S> {
    fn drop(&mut self) {
        match self.api.close(self.handle) {
            Ok(()) => debug!("Socket closed"),
            Err(e) => warn!("Socket close returned error: {}", kind_name(&e)),
        }
    }
}

/// Run `body` against a freshly opened socket, closing it afterwards
///
/// `secure` selects [`Protocol::Secure`] for stream sockets. The result is
/// whatever `body` returns; a failure while closing is logged and never
/// replaces it.
///
/// # Errors
///
/// Returns `NetworkError::SocketOpenError` if the socket cannot be opened,
/// otherwise the first error raised by `body`.
pub fn with_socket<S, T, F>(
    api: &mut S,
    family: AddressFamily,
    kind: SocketKind,
    secure: bool,
    body: F,
) -> Result<T, NetworkError>
where
    S: SocketApi,
    F: FnOnce(&mut SocketGuard<'_, S>) -> Result<T, NetworkError>,
{
    let protocol = match (kind, secure) {
        (SocketKind::Stream, true) => Protocol::Secure,
        (SocketKind::Stream, false) => Protocol::Tcp,
        (SocketKind::Datagram, _) => Protocol::Udp,
    };
    let mut socket = SocketGuard::open(api, family, kind, protocol)?;
    let result = body(&mut socket);
    drop(socket);
    result
}
