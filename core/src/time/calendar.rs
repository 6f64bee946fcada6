#![deny(unsafe_code)]
//! Calendar date/time conversions without floating point
//!
//! [`to_civil`] decomposes a Unix second count by counting whole 400-, 100-,
//! 4- and 1-year cycles from 2000-03-01, the first day after a leap day that
//! starts a 400-year cycle. Counting years from March puts February, and with
//! it the leap day, at the end of each cycle year, so a single 12-entry month
//! table covers both leap and common years.
//!
//! [`CivilDateTime::to_unix`] goes the other way using Howard Hinnant's
//! days_from_civil algorithm.
//! Reference: http://howardhinnant.github.io/date_algorithms.html
//!
//! **Limitations**:
//! - UTC only (no timezone support)
//! - No leap seconds (NTP ignores them too)
//! - Proleptic Gregorian calendar; [`try_to_civil`] covers years within `i32`

const SECS_PER_DAY: i64 = 86_400;
const DAYS_PER_WEEK: i64 = 7;
const DAYS_OF_YEAR: i64 = 365;
const DAYS_PER_400Y: i64 = DAYS_OF_YEAR * 400 + 97;
const DAYS_PER_100Y: i64 = DAYS_OF_YEAR * 100 + 24;
const DAYS_PER_4Y: i64 = DAYS_OF_YEAR * 4 + 1;

/// 2000-03-01T00:00:00Z as Unix seconds
pub const LEAPOCH: i64 = 946_684_800 + SECS_PER_DAY * (31 + 29);

/// Month lengths starting at March; February's 29 is only reached in leap years
const DAYS_IN_MONTH: [i64; 12] = [31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 29];

/// Civil date-time in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CivilDateTime {
    /// 0-59
    pub second: u8,
    /// 0-59
    pub minute: u8,
    /// 0-23
    pub hour: u8,
    /// 1-31
    pub day: u8,
    /// 1-12, January = 1
    pub month: u8,
    /// Absolute year, e.g. 2024
    pub year: i32,
    /// 0-6, Sunday = 0
    pub weekday: u8,
    /// 0-365, January 1st = 0
    pub yearday: u16,
}

impl CivilDateTime {
    /// Convert back to Unix seconds
    ///
    /// Ignores `weekday` and `yearday`; they are derived fields.
    pub fn to_unix(&self) -> i64 {
        let days = days_from_civil(self.year, self.month, self.day);
        days * SECS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }
}

impl core::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Check if year is a leap year (Gregorian calendar)
///
/// - Divisible by 4: leap year
/// - EXCEPT divisible by 100: not a leap year
/// - EXCEPT divisible by 400: leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Convert a Unix timestamp to a civil date-time
///
/// Total over the whole `u32` range (1970-01-01 to 2106-02-07).
pub fn to_civil(unix_secs: u32) -> CivilDateTime {
    let (mut civil, year) = decompose(i64::from(unix_secs) - LEAPOCH);
    // Years 1970..=2106 always fit
    civil.year = year as i32;
    civil
}

/// Convert signed Unix seconds to a civil date-time
///
/// Returns `None` when the year does not fit in `i32`.
pub fn try_to_civil(unix_secs: i64) -> Option<CivilDateTime> {
    let (mut civil, year) = decompose(unix_secs.checked_sub(LEAPOCH)?);
    civil.year = i32::try_from(year).ok()?;
    Some(civil)
}

/// Split seconds relative to [`LEAPOCH`] into civil fields
///
/// The absolute year is returned separately; `year` in the returned value is 0.
fn decompose(secs: i64) -> (CivilDateTime, i64) {
    let mut days = secs / SECS_PER_DAY;
    let mut remsecs = secs % SECS_PER_DAY;
    if remsecs < 0 {
        remsecs += SECS_PER_DAY;
        days -= 1;
    }

    // 2000-03-01 was a Wednesday
    let mut wday = (3 + days) % DAYS_PER_WEEK;
    if wday < 0 {
        wday += DAYS_PER_WEEK;
    }

    let mut qc_cycles = days / DAYS_PER_400Y;
    let mut remdays = days % DAYS_PER_400Y;
    if remdays < 0 {
        remdays += DAYS_PER_400Y;
        qc_cycles -= 1;
    }

    // The last day of a 400-year cycle belongs to the fourth century,
    // likewise for the last day of a 4-year cycle and the fourth year.
    let mut c_cycles = remdays / DAYS_PER_100Y;
    if c_cycles == 4 {
        c_cycles -= 1;
    }
    remdays -= c_cycles * DAYS_PER_100Y;

    let mut q_cycles = remdays / DAYS_PER_4Y;
    if q_cycles == 25 {
        q_cycles -= 1;
    }
    remdays -= q_cycles * DAYS_PER_4Y;

    let mut remyears = remdays / DAYS_OF_YEAR;
    if remyears == 4 {
        remyears -= 1;
    }
    remdays -= remyears * DAYS_OF_YEAR;

    // Leap flag of the calendar year this March belongs to
    let leap = i64::from(remyears == 0 && (q_cycles != 0 || c_cycles == 0));
    let mut yday = remdays + 31 + 28 + leap;
    if yday >= DAYS_OF_YEAR + leap {
        yday -= DAYS_OF_YEAR + leap;
    }

    let mut years = remyears + 4 * q_cycles + 100 * c_cycles + 400 * qc_cycles;

    let mut month = 0;
    while DAYS_IN_MONTH[month] <= remdays {
        remdays -= DAYS_IN_MONTH[month];
        month += 1;
    }

    // Rotate March-based months back to January-based
    month += 2;
    if month >= 12 {
        month -= 12;
        years += 1;
    }

    let civil = CivilDateTime {
        second: (remsecs % 60) as u8,
        minute: (remsecs / 60 % 60) as u8,
        hour: (remsecs / 3600) as u8,
        day: (remdays + 1) as u8,
        month: (month + 1) as u8,
        year: 0,
        weekday: wday as u8,
        yearday: yday as u16,
    };
    (civil, years + 2000)
}

/// Convert civil date (year, month, day) to days since Unix epoch
///
/// Howard Hinnant's days_from_civil algorithm.
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);
    let d = i64::from(day);

    // Adjust year and month to make March = month 0, February = month 11
    let (y, m) = if m <= 2 { (y - 1, m + 9) } else { (y, m - 3) };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // year of era [0, 399]
    let doy = (153 * m + 2) / 5 + d - 1; // day of year [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era [0, 146096]

    era * 146_097 + doe - 719_468 // 719468 = days from 0000-03-01 to 1970-01-01
}
