//! Fault-injection driver shared by the integration tests
//!
//! `FakeDriver` implements the resolver, stream socket and datagram socket
//! traits, records every call, and fails whichever step the test selects.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_io::ErrorKind;
use netstack_core::{CivilDateTime, DeviceClock};
use netstack_hal::{
    AddressFamily, CipherSuite, DatagramSocket, Protocol, Resolver, SecureMethod, SocketApi,
    SocketKind, SocketOption,
};

/// Driver error carrying an `embedded_io` kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError(pub ErrorKind);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fake driver error: {:?}", self.0)
    }
}

impl std::error::Error for FakeError {}

impl embedded_io::Error for FakeError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Step the driver should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Resolve,
    Open,
    /// The n-th `set_option` call, counting from 0
    SetOption(usize),
    Connect,
    Send,
    Recv,
    Close,
    Bind,
    SendTo,
    PollRecv,
}

/// Owned copy of a socket option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opt {
    ReceiveTimeout(Duration),
    SecureMethod(SecureMethod),
    CipherMask(CipherSuite),
    TrustAnchor(String),
}

impl From<&SocketOption<'_>> for Opt {
    fn from(option: &SocketOption<'_>) -> Self {
        match *option {
            SocketOption::ReceiveTimeout(timeout) => Opt::ReceiveTimeout(timeout),
            SocketOption::SecureMethod(method) => Opt::SecureMethod(method),
            SocketOption::CipherMask(cipher) => Opt::CipherMask(cipher),
            SocketOption::TrustAnchor(path) => Opt::TrustAnchor(path.to_string()),
        }
    }
}

/// Recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Resolve(String),
    Open(Protocol),
    SetOption(Opt),
    Connect(SocketAddrV4),
    Send(Vec<u8>),
    Recv,
    Close,
    Bind(u16),
    SendTo(SocketAddrV4, Vec<u8>),
    PollRecv,
    CloseDatagram,
}

pub struct FakeDriver {
    pub calls: Vec<Call>,
    pub fail: Option<Step>,
    pub fail_kind: ErrorKind,
    pub address: Ipv4Addr,
    /// Bytes returned by the single stream `recv`
    pub response: Vec<u8>,
    /// Bytes accepted by `send`; `None` accepts everything
    pub accept: Option<usize>,
    /// Results of successive `poll_recv` calls; empty means nothing pending
    pub datagrams: VecDeque<Option<Vec<u8>>>,
    pub open_handles: Vec<u16>,
    pub opens: usize,
    pub closes: usize,
    pub datagram_closes: usize,
    next_handle: u16,
    set_option_calls: usize,
}

impl Default for FakeDriver {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            fail: None,
            fail_kind: ErrorKind::Other,
            address: Ipv4Addr::new(93, 184, 216, 34),
            response: b"HTTP/1.1 200 OK\n\nhello".to_vec(),
            accept: None,
            datagrams: VecDeque::new(),
            open_handles: Vec::new(),
            opens: 0,
            closes: 0,
            datagram_closes: 0,
            next_handle: 1,
            set_option_calls: 0,
        }
    }
}

impl FakeDriver {
    pub fn failing_at(step: Step) -> Self {
        Self {
            fail: Some(step),
            ..Self::default()
        }
    }

    pub fn with_address(address: Ipv4Addr) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    pub fn with_response(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            ..Self::default()
        }
    }

    /// Driver whose `send` accepts at most `limit` bytes
    pub fn accepting(limit: usize) -> Self {
        Self {
            accept: Some(limit),
            ..Self::default()
        }
    }

    fn check(&self, step: Step) -> Result<(), FakeError> {
        if self.fail == Some(step) {
            Err(FakeError(self.fail_kind))
        } else {
            Ok(())
        }
    }

    /// Queue an NTP reply carrying `ntp_secs` in the transmit timestamp
    pub fn queue_ntp_reply(&mut self, ntp_secs: u32) {
        let mut reply = vec![0u8; 48];
        reply[0] = 0x24; // LI 0, VN 4, mode 4 (server)
        reply[1] = 1;
        reply[40..44].copy_from_slice(&ntp_secs.to_be_bytes());
        self.datagrams.push_back(Some(reply));
    }

    /// Queue `count` empty polls
    pub fn queue_silence(&mut self, count: usize) {
        for _ in 0..count {
            self.datagrams.push_back(None);
        }
    }

    pub fn polls(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::PollRecv).count()
    }
}

impl Resolver for FakeDriver {
    type Error = FakeError;

    fn resolve(&mut self, hostname: &str) -> Result<Ipv4Addr, Self::Error> {
        self.calls.push(Call::Resolve(hostname.to_string()));
        self.check(Step::Resolve)?;
        Ok(self.address)
    }
}

impl SocketApi for FakeDriver {
    type Handle = u16;
    type Error = FakeError;

    fn open(
        &mut self,
        family: AddressFamily,
        kind: SocketKind,
        protocol: Protocol,
    ) -> Result<Self::Handle, Self::Error> {
        assert_eq!(family, AddressFamily::Inet);
        assert_eq!(kind, SocketKind::Stream);
        self.calls.push(Call::Open(protocol));
        self.check(Step::Open)?;
        let handle = self.next_handle;
        self.next_handle += 1;
        self.opens += 1;
        self.open_handles.push(handle);
        Ok(handle)
    }

    fn set_option(
        &mut self,
        handle: Self::Handle,
        option: &SocketOption<'_>,
    ) -> Result<(), Self::Error> {
        assert!(self.open_handles.contains(&handle), "option on closed socket");
        self.calls.push(Call::SetOption(Opt::from(option)));
        let index = self.set_option_calls;
        self.set_option_calls += 1;
        self.check(Step::SetOption(index))
    }

    fn connect(&mut self, handle: Self::Handle, remote: SocketAddrV4) -> Result<(), Self::Error> {
        assert!(self.open_handles.contains(&handle), "connect on closed socket");
        self.calls.push(Call::Connect(remote));
        self.check(Step::Connect)
    }

    fn send(&mut self, handle: Self::Handle, data: &[u8]) -> Result<usize, Self::Error> {
        assert!(self.open_handles.contains(&handle), "send on closed socket");
        self.calls.push(Call::Send(data.to_vec()));
        self.check(Step::Send)?;
        Ok(self.accept.unwrap_or(data.len()).min(data.len()))
    }

    fn recv(&mut self, handle: Self::Handle, buf: &mut [u8]) -> Result<usize, Self::Error> {
        assert!(self.open_handles.contains(&handle), "recv on closed socket");
        self.calls.push(Call::Recv);
        self.check(Step::Recv)?;
        let len = self.response.len().min(buf.len());
        buf[..len].copy_from_slice(&self.response[..len]);
        Ok(len)
    }

    fn close(&mut self, handle: Self::Handle) -> Result<(), Self::Error> {
        let position = self
            .open_handles
            .iter()
            .position(|&h| h == handle)
            .expect("close of a handle that is not open");
        self.open_handles.remove(position);
        self.calls.push(Call::Close);
        self.closes += 1;
        self.check(Step::Close)
    }
}

impl DatagramSocket for FakeDriver {
    type Error = FakeError;

    fn bind(&mut self, local_port: u16) -> Result<(), Self::Error> {
        self.calls.push(Call::Bind(local_port));
        self.check(Step::Bind)
    }

    fn send_to(&mut self, remote: SocketAddrV4, data: &[u8]) -> Result<(), Self::Error> {
        self.calls.push(Call::SendTo(remote, data.to_vec()));
        self.check(Step::SendTo)
    }

    fn poll_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        self.calls.push(Call::PollRecv);
        self.check(Step::PollRecv)?;
        match self.datagrams.pop_front().flatten() {
            Some(datagram) => {
                let len = datagram.len().min(buf.len());
                buf[..len].copy_from_slice(&datagram[..len]);
                Ok(Some(len))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.calls.push(Call::CloseDatagram);
        self.datagram_closes += 1;
    }
}

/// Delay that records requested waits instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
    pub total_ns: u64,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Clock that stores the last value it was given
#[derive(Debug, Default)]
pub struct RecordingClock {
    pub now: Option<CivilDateTime>,
    pub reject: bool,
}

impl DeviceClock for RecordingClock {
    type Error = ();

    fn set_date_time(&mut self, now: &CivilDateTime) -> Result<(), Self::Error> {
        if self.reject {
            return Err(());
        }
        self.now = Some(*now);
        Ok(())
    }
}
