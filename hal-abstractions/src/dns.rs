#![deny(unsafe_code)]
//! Name resolution

use core::net::Ipv4Addr;

/// Resolves hostnames to IPv4 addresses
///
/// Implementations block until the coprocessor answers or its own
/// resolver timeout expires.
pub trait Resolver {
    /// Driver error type
    type Error: embedded_io::Error;

    /// Resolve `hostname` to a single IPv4 address.
    fn resolve(&mut self, hostname: &str) -> Result<Ipv4Addr, Self::Error>;
}
