#![deny(unsafe_code)]
//! Hostname resolution gate
//!
//! Runs before any socket is allocated, so a resolver failure never leaves a
//! handle behind.

use core::net::Ipv4Addr;

use netstack_hal::Resolver;

use super::error::{kind_name, NetworkError};

/// Resolve `hostname` to an IPv4 address
///
/// IPv4 literals are parsed locally and never reach the resolver.
///
/// # Errors
///
/// Returns `NetworkError::DnsError` for an empty hostname or when the
/// resolver fails.
pub fn resolve<R: Resolver>(resolver: &mut R, hostname: &str) -> Result<Ipv4Addr, NetworkError> {
    if hostname.is_empty() {
        error!("Cannot resolve an empty hostname");
        return Err(NetworkError::DnsError);
    }

    if let Ok(addr) = hostname.parse::<Ipv4Addr>() {
        debug!("{} is an address literal", hostname);
        return Ok(addr);
    }

    let addr = resolver.resolve(hostname).map_err(|e| {
        error!("DNS query for {} failed: {}", hostname, kind_name(&e));
        NetworkError::DnsError
    })?;
    info!("Resolved {} to {:?}", hostname, addr.octets());
    Ok(addr)
}
