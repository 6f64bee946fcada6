//! Hardware abstraction traits for network coprocessor firmware
//!
//! This crate defines traits that abstract over the socket API exposed by
//! the network coprocessor (or its host driver). BSPs implement these traits;
//! `netstack-core` drives them.
//!
//! - **`socket`**: handle-based stream sockets with option setting, including
//!   the secure (TLS) variant
//! - **`dns`**: hostname to IPv4 address resolution
//! - **`udp`**: connectionless datagram socket with non-blocking receive
//!
//! All driver error types implement [`embedded_io::Error`] so that callers can
//! classify failures (for example a receive timeout) without knowing the driver.

#![no_std]
#![deny(unsafe_code)]

pub mod dns;
pub mod socket;
pub mod udp;

pub use dns::Resolver;
pub use socket::{
    AddressFamily, CipherSuite, Protocol, SecureMethod, SocketApi, SocketKind, SocketOption,
};
pub use udp::DatagramSocket;
