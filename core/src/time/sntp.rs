#![deny(unsafe_code)]
//! SNTP client
//!
//! Sends a single client-mode request over UDP, waits for the reply within a
//! [`PollBudget`] and extracts the transmit timestamp's seconds field. A reply
//! that never arrives, or that carries a zero timestamp, is a
//! `NetworkError::TimeSyncError`; a zero is never passed on as a time.

use core::net::SocketAddrV4;

use embedded_hal::delay::DelayNs;
use netstack_hal::{DatagramSocket, Resolver};

use super::calendar::{to_civil, CivilDateTime};
use super::clock::DeviceClock;
use crate::network::config::SntpConfig;
use crate::network::dns;
use crate::network::error::{kind_name, NetworkError};

/// NTP packet size without extension fields
pub const NTP_PACKET_SIZE: usize = 48;

/// NTP epoch offset (1900-01-01 to 1970-01-01 in seconds)
pub const NTP_UNIX_OFFSET: u32 = 2_208_988_800;

/// LI = 0 (no warning), VN = 4, Mode = 3 (client)
const LI_VN_MODE: u8 = 0b1110_0011;

/// Offset of the transmit timestamp in the packet
const TRANSMIT_TIMESTAMP: usize = 40;

/// How long to wait for a reply and how often to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    /// Total time to wait after sending the request
    pub timeout_ms: u32,
    /// Pause between polls
    pub interval_ms: u32,
}

impl PollBudget {
    /// Create a new budget
    pub const fn new(timeout_ms: u32, interval_ms: u32) -> Self {
        Self {
            timeout_ms,
            interval_ms,
        }
    }
}

impl Default for PollBudget {
    /// 100 polls, 100 ms apart
    fn default() -> Self {
        Self::new(10_000, 100)
    }
}

/// 48-byte NTP packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtpPacket {
    bytes: [u8; NTP_PACKET_SIZE],
}

impl NtpPacket {
    /// Client request: header byte, poll and precision set, reference ID
    /// `1N14`, everything else zero
    pub fn client_request() -> Self {
        let mut bytes = [0u8; NTP_PACKET_SIZE];
        bytes[0] = LI_VN_MODE;
        bytes[1] = 0; // Stratum, or type of clock
        bytes[2] = 6; // Polling interval
        bytes[3] = 0xEC; // Peer clock precision
        // 8 bytes of zero for root delay and root dispersion
        bytes[12..16].copy_from_slice(&[49, 0x4E, 49, 52]);
        Self { bytes }
    }

    /// Take the first 48 bytes of a received datagram
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidResponse` if fewer than 48 bytes are given.
    pub fn from_bytes(data: &[u8]) -> Result<Self, NetworkError> {
        let bytes = data
            .get(..NTP_PACKET_SIZE)
            .and_then(|head| <[u8; NTP_PACKET_SIZE]>::try_from(head).ok())
            .ok_or(NetworkError::InvalidResponse)?;
        Ok(Self { bytes })
    }

    /// Raw packet bytes
    pub fn as_bytes(&self) -> &[u8; NTP_PACKET_SIZE] {
        &self.bytes
    }

    /// Transmit timestamp seconds since 1900, fraction ignored
    pub fn transmit_seconds(&self) -> u32 {
        let b = &self.bytes[TRANSMIT_TIMESTAMP..TRANSMIT_TIMESTAMP + 4];
        let high = u16::from_be_bytes([b[0], b[1]]);
        let low = u16::from_be_bytes([b[2], b[3]]);
        (u32::from(high) << 16) | u32::from(low)
    }
}

/// Convert NTP seconds to Unix seconds
///
/// Values before 1970 wrap around, as unsigned arithmetic does.
pub const fn ntp_to_unix(ntp_secs: u32) -> u32 {
    ntp_secs.wrapping_sub(NTP_UNIX_OFFSET)
}

/// Fetch the server's transmit seconds (since 1900)
///
/// Binds `local_port`, sends one request to `server` and polls for the reply
/// within `budget`. The socket is closed before returning whenever the bind
/// succeeded.
///
/// # Errors
///
/// - `NetworkError::SocketOpenError` if the bind fails
/// - `NetworkError::SendError` / `NetworkError::ReceiveError` on driver errors
/// - `NetworkError::TimeSyncError` if no reply arrives within the budget or
///   the reply's timestamp is zero
/// - `NetworkError::InvalidResponse` if the reply is shorter than 48 bytes
pub fn fetch_network_seconds<U, D>(
    socket: &mut U,
    delay: &mut D,
    server: SocketAddrV4,
    local_port: u16,
    budget: PollBudget,
) -> Result<u32, NetworkError>
where
    U: DatagramSocket,
    D: DelayNs,
{
    socket.bind(local_port).map_err(|e| {
        error!("Failed to bind UDP port {}: {}", local_port, kind_name(&e));
        NetworkError::SocketOpenError
    })?;

    let result = exchange(socket, delay, server, budget);
    socket.close();
    result
}

fn exchange<U, D>(
    socket: &mut U,
    delay: &mut D,
    server: SocketAddrV4,
    budget: PollBudget,
) -> Result<u32, NetworkError>
where
    U: DatagramSocket,
    D: DelayNs,
{
    let request = NtpPacket::client_request();
    socket.send_to(server, request.as_bytes()).map_err(|e| {
        error!("Failed to send NTP request: {}", kind_name(&e));
        NetworkError::SendError
    })?;
    info!(
        "Sent NTP request to {:?}:{}",
        server.ip().octets(),
        server.port()
    );

    let mut response = [0u8; NTP_PACKET_SIZE];
    let len = wait_for_reply(socket, delay, &mut response, budget)?;
    debug!("Received {} bytes", len);

    let reply = NtpPacket::from_bytes(&response[..len]).map_err(|e| {
        warn!("NTP reply too short: {} bytes", len);
        e
    })?;

    let secs = reply.transmit_seconds();
    if secs == 0 {
        warn!("NTP reply carries a zero transmit timestamp");
        return Err(NetworkError::TimeSyncError);
    }
    info!("NTP transmit timestamp: {} s since 1900", secs);
    Ok(secs)
}

/// Poll until a datagram arrives or the budget is spent
///
/// Polls once immediately, then after each interval, never waiting longer
/// than `budget.timeout_ms` in total.
fn wait_for_reply<U, D>(
    socket: &mut U,
    delay: &mut D,
    buf: &mut [u8],
    budget: PollBudget,
) -> Result<usize, NetworkError>
where
    U: DatagramSocket,
    D: DelayNs,
{
    let interval = budget.interval_ms.max(1);
    let mut waited_ms: u32 = 0;
    loop {
        match socket.poll_recv(buf) {
            Ok(Some(len)) => return Ok(len.min(buf.len())),
            Ok(None) => {}
            Err(e) => {
                error!("Failed to receive NTP reply: {}", kind_name(&e));
                return Err(NetworkError::ReceiveError);
            }
        }

        if waited_ms >= budget.timeout_ms {
            warn!("No NTP reply after {} ms", waited_ms);
            return Err(NetworkError::TimeSyncError);
        }
        let step = interval.min(budget.timeout_ms - waited_ms);
        delay.delay_ms(step);
        waited_ms += step;
    }
}

/// SNTP client for time synchronization
#[derive(Debug, Clone, Copy, Default)]
pub struct SntpClient {
    config: SntpConfig,
}

impl SntpClient {
    /// Create a new SNTP client with default configuration
    pub fn new() -> Self {
        Self {
            config: SntpConfig::default(),
        }
    }

    /// Create a new SNTP client with custom configuration
    pub fn with_config(config: SntpConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &SntpConfig {
        &self.config
    }

    /// Resolve the configured server and fetch its seconds since 1900
    ///
    /// # Errors
    ///
    /// `NetworkError::DnsError` if the server name does not resolve, otherwise
    /// as [`fetch_network_seconds`].
    pub fn fetch_network_seconds<N, D>(&self, net: &mut N, delay: &mut D) -> Result<u32, NetworkError>
    where
        N: Resolver + DatagramSocket,
        D: DelayNs,
    {
        info!("Starting SNTP request to {}", self.config.server);
        let addr = dns::resolve(net, self.config.server)?;
        fetch_network_seconds(
            net,
            delay,
            SocketAddrV4::new(addr, self.config.port),
            self.config.local_port,
            self.config.budget,
        )
    }

    /// Fetch network time as Unix seconds
    ///
    /// # Errors
    ///
    /// As [`SntpClient::fetch_network_seconds`].
    pub fn fetch_unix_time<N, D>(&self, net: &mut N, delay: &mut D) -> Result<u32, NetworkError>
    where
        N: Resolver + DatagramSocket,
        D: DelayNs,
    {
        self.fetch_network_seconds(net, delay).map(ntp_to_unix)
    }

    /// Fetch network time as a civil UTC date-time
    ///
    /// # Errors
    ///
    /// As [`SntpClient::fetch_network_seconds`].
    pub fn fetch_civil_time<N, D>(
        &self,
        net: &mut N,
        delay: &mut D,
    ) -> Result<CivilDateTime, NetworkError>
    where
        N: Resolver + DatagramSocket,
        D: DelayNs,
    {
        let unix_secs = self.fetch_unix_time(net, delay)?;
        let now = to_civil(unix_secs);
        info!("Network time: {}", now);
        Ok(now)
    }

    /// Fetch network time and program it into `clock`
    ///
    /// The clock is left untouched unless a valid time was received.
    ///
    /// # Errors
    ///
    /// As [`SntpClient::fetch_network_seconds`], or `NetworkError::ClockError`
    /// if the clock rejects the value.
    pub fn sync_device_clock<N, D, C>(
        &self,
        net: &mut N,
        delay: &mut D,
        clock: &mut C,
    ) -> Result<CivilDateTime, NetworkError>
    where
        N: Resolver + DatagramSocket,
        D: DelayNs,
        C: DeviceClock,
    {
        let now = self.fetch_civil_time(net, delay)?;
        clock.set_date_time(&now).map_err(|_| {
            error!("Failed to set device clock to {}", now);
            NetworkError::ClockError
        })?;
        info!("Device clock set to {}", now);
        Ok(now)
    }
}
