#![deny(unsafe_code)]
//! Network module
//!
//! This module provides the request path of the firmware:
//! - **`config`**: Configuration structs with `Default` implementations
//! - **`dns`**: Hostname resolution, run before any socket is allocated
//! - **`error`**: Simple error enum for network and time-sync operations
//! - **`http`**: One-shot HTTP(S) GET into a caller-owned buffer
//! - **`socket`**: Scoped socket handle that always closes exactly once
//! - **`tls`**: Secure socket options applied before connect
//!
//! ## Architecture
//!
//! Everything is blocking and single-threaded. Each request owns its socket
//! handle and buffers for its whole lifetime and releases the handle before
//! returning; no state is shared between calls.

pub mod config;
pub mod dns;
pub mod error;
pub mod http;
pub mod socket;
pub mod tls;

// Re-export commonly used types
pub use config::{HttpConfig, LineEnding, SntpConfig};
pub use error::NetworkError;
pub use http::{build_request, ConnectionRequest, HttpClient, RESPONSE_CAPACITY};
pub use socket::{with_socket, SocketGuard};
pub use tls::TlsOptions;
