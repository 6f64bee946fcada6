#![deny(unsafe_code)]
//! Network time module
//!
//! - **`sntp`**: one-shot SNTP fetch with a bounded poll for the reply
//! - **`calendar`**: Unix seconds to civil UTC date-time and back, integer
//!   arithmetic only
//! - **`clock`**: the device clock the synchronized time is written to
//!
//! ## Usage
//! ```ignore
//! let client = SntpClient::new();
//! match client.sync_device_clock(&mut wifi, &mut delay, &mut rtc) {
//!     Ok(now) => info!("Clock set to {}", now),
//!     Err(e) => warn!("Time sync failed: {:?}", e),
//! }
//! ```

mod calendar;
mod clock;
mod sntp;

// Re-export public API
pub use calendar::{days_in_month, is_leap_year, to_civil, try_to_civil, CivilDateTime, LEAPOCH};
pub use clock::DeviceClock;
pub use sntp::{
    fetch_network_seconds, ntp_to_unix, NtpPacket, PollBudget, SntpClient, NTP_PACKET_SIZE,
    NTP_UNIX_OFFSET,
};
