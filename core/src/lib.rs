//! Platform-agnostic network logic for WiFi coprocessor firmware
//!
//! This crate contains the request and time-keeping logic that sits on top of
//! the coprocessor's socket API. It has NO hardware dependencies: boards
//! provide the socket, resolver, datagram and clock implementations through
//! the traits in `netstack-hal` and [`time::DeviceClock`].
//!
//! - **`network`**: name resolution, socket lifecycle, TLS options and the
//!   one-shot HTTP(S) GET
//! - **`time`**: NTP fetch and the Unix to civil date-time conversion
//!
//! ## Logging
//!
//! Enable the `defmt` feature on firmware builds, or `log` on hosted builds.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod network;
pub mod time;

pub use network::{
    ConnectionRequest, HttpClient, HttpConfig, LineEnding, NetworkError, SntpConfig, TlsOptions,
    RESPONSE_CAPACITY,
};
pub use time::{to_civil, try_to_civil, CivilDateTime, DeviceClock, PollBudget, SntpClient};
