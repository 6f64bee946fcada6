#![deny(unsafe_code)]
//! Device clock collaborator

use super::calendar::CivilDateTime;

/// Real-time clock that accepts a civil UTC date-time
///
/// Implemented by the board, typically by writing the coprocessor's or the
/// MCU's RTC registers.
pub trait DeviceClock {
    /// Clock error type
    type Error: core::fmt::Debug;

    /// Program the clock to `now`.
    fn set_date_time(&mut self, now: &CivilDateTime) -> Result<(), Self::Error>;
}
