#![deny(unsafe_code)]
//! Network configuration structures

use core::time::Duration;

use crate::time::PollBudget;

/// Line terminator used in the request head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEnding {
    /// Bare `\n`, as the deployed servers expect
    Lf,
    /// Standard HTTP `\r\n`
    CrLf,
}

impl LineEnding {
    /// Terminator text
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Upper bound on the single blocking receive
    pub receive_timeout: Duration,
    /// Request head line terminator
    pub line_ending: LineEnding,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_secs(45),
            line_ending: LineEnding::Lf,
        }
    }
}

/// SNTP client configuration
#[derive(Debug, Clone, Copy)]
pub struct SntpConfig {
    /// NTP server, IPv4 literal or hostname
    pub server: &'static str,
    /// Server port
    pub port: u16,
    /// Local UDP port to bind for the exchange
    pub local_port: u16,
    /// How long to wait for the reply, and how often to poll for it
    pub budget: PollBudget,
}

impl Default for SntpConfig {
    fn default() -> Self {
        Self {
            server: "129.6.15.29",
            port: 123,
            local_port: 2390,
            budget: PollBudget::default(),
        }
    }
}
