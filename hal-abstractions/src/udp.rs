#![deny(unsafe_code)]
//! Connectionless datagram socket

use core::net::SocketAddrV4;

/// UDP socket owned by a single exchange
///
/// The socket is bound once, used for one request/response pair and then
/// closed. `poll_recv` never blocks.
pub trait DatagramSocket {
    /// Driver error type
    type Error: embedded_io::Error;

    /// Bind to a local port and start listening.
    fn bind(&mut self, local_port: u16) -> Result<(), Self::Error>;

    /// Transmit one datagram to `remote`.
    fn send_to(&mut self, remote: SocketAddrV4, data: &[u8]) -> Result<(), Self::Error>;

    /// Copy a pending datagram into `buf`.
    ///
    /// Returns `Ok(None)` when nothing has arrived yet. Datagrams larger than
    /// `buf` are truncated.
    fn poll_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    /// Stop listening and release the local port.
    fn close(&mut self);
}
