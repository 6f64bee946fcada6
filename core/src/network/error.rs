#![deny(unsafe_code)]
//! Network and time-sync error types

use embedded_io::ErrorKind;

/// Network client operation errors
///
/// The first failing step of an operation decides the variant. Driver error
/// detail is logged where it happens and not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// DNS resolution failed
    DnsError,
    /// Socket handle allocation (or datagram bind) failed
    SocketOpenError,
    /// A socket option was rejected
    SocketConfigError,
    /// Connect (including the TLS handshake) failed
    ConnectError,
    /// Send failed
    SendError,
    /// Receive failed or timed out
    ReceiveError,
    /// No usable NTP reply within the poll budget
    TimeSyncError,
    /// NTP reply too short
    InvalidResponse,
    /// Request text does not fit the request buffer
    RequestTooLarge,
    /// Device clock rejected the new date-time
    ClockError,
}

impl core::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DnsError => write!(f, "DNS resolution failed"),
            Self::SocketOpenError => write!(f, "Socket open failed"),
            Self::SocketConfigError => write!(f, "Socket option rejected"),
            Self::ConnectError => write!(f, "Connect failed"),
            Self::SendError => write!(f, "Send failed"),
            Self::ReceiveError => write!(f, "Receive failed"),
            Self::TimeSyncError => write!(f, "Time synchronization failed"),
            Self::InvalidResponse => write!(f, "Invalid response"),
            Self::RequestTooLarge => write!(f, "Request too large"),
            Self::ClockError => write!(f, "Device clock error"),
        }
    }
}

// Implement core::error::Error for no_std compatibility
impl core::error::Error for NetworkError {}

impl embedded_io::Error for NetworkError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DnsError => ErrorKind::NotFound,
            Self::ConnectError => ErrorKind::ConnectionRefused,
            Self::SendError | Self::ReceiveError => ErrorKind::BrokenPipe,
            Self::TimeSyncError => ErrorKind::TimedOut,
            Self::InvalidResponse => ErrorKind::InvalidData,
            Self::RequestTooLarge => ErrorKind::OutOfMemory,
            _ => ErrorKind::Other,
        }
    }
}

/// Short name of a driver error kind for log output
pub(crate) fn kind_name<E: embedded_io::Error>(e: &E) -> &'static str {
    match e.kind() {
        ErrorKind::TimedOut => "timed out",
        ErrorKind::NotFound => "not found",
        ErrorKind::ConnectionRefused => "connection refused",
        ErrorKind::ConnectionReset => "connection reset",
        ErrorKind::ConnectionAborted => "connection aborted",
        ErrorKind::NotConnected => "not connected",
        ErrorKind::BrokenPipe => "broken pipe",
        ErrorKind::InvalidInput => "invalid input",
        ErrorKind::InvalidData => "invalid data",
        ErrorKind::OutOfMemory => "out of memory",
        ErrorKind::Unsupported => "unsupported",
        _ => "other",
    }
}
