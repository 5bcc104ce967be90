//! Station operating hours.
//!
//! Station data gives first and last train times as "HH:MM" strings. This
//! module parses them into wall-clock times and answers whether a station is
//! open at a given time of day.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a wall-clock time from "HH:MM" format.
///
/// The hour may be written with one digit ("5:30"); the minute always has two.
/// A trailing ":SS" is accepted and dropped, so exported "05:30:00" values
/// load as 05:30.
///
/// # Examples
///
/// ```
/// use metro_router::domain::parse_hhmm;
///
/// assert!(parse_hhmm("00:00").is_ok());
/// assert!(parse_hhmm("23:59").is_ok());
/// assert!(parse_hhmm("5:30").is_ok());
/// assert_eq!(parse_hhmm("05:30:45"), parse_hhmm("05:30"));
///
/// assert!(parse_hhmm("1430").is_err());
/// assert!(parse_hhmm("14:3").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    let mut parts = s.trim().split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return Err(TimeError::new("expected HH:MM format"));
    };
    let second = parts.next();
    if parts.next().is_some() {
        return Err(TimeError::new("expected HH:MM format"));
    }

    if hour.is_empty() || hour.len() > 2 {
        return Err(TimeError::new("hour must have one or two digits"));
    }
    if minute.len() != 2 {
        return Err(TimeError::new("minute must have two digits"));
    }

    let hour = parse_digits(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute = parse_digits(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    if let Some(second) = second {
        if second.len() != 2 {
            return Err(TimeError::new("second must have two digits"));
        }
        let second =
            parse_digits(second).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse a short run of ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    s.chars()
        .try_fold(0u32, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}

/// The window during which trains call at a station.
///
/// A station is open at time `t` when `first_train <= t <= last_train`. Both
/// ends are inclusive. Windows are not wrapped past midnight: if the first
/// train is later than the last train, the station is never open.
///
/// # Examples
///
/// ```
/// use metro_router::domain::{OperatingHours, parse_hhmm};
///
/// let hours = OperatingHours::default();
/// assert!(hours.is_open_at(parse_hhmm("05:00").unwrap()));
/// assert!(hours.is_open_at(parse_hhmm("23:30").unwrap()));
/// assert!(!hours.is_open_at(parse_hhmm("23:31").unwrap()));
/// assert!(!hours.is_open_at(parse_hhmm("04:59").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatingHours {
    first_train: NaiveTime,
    last_train: NaiveTime,
}

impl OperatingHours {
    /// Create operating hours from first and last train times.
    pub fn new(first_train: NaiveTime, last_train: NaiveTime) -> Self {
        Self {
            first_train,
            last_train,
        }
    }

    /// Parse operating hours from two "HH:MM" strings.
    pub fn parse(first_train: &str, last_train: &str) -> Result<Self, TimeError> {
        Ok(Self::new(parse_hhmm(first_train)?, parse_hhmm(last_train)?))
    }

    /// Returns the first train time.
    pub fn first_train(&self) -> NaiveTime {
        self.first_train
    }

    /// Returns the last train time.
    pub fn last_train(&self) -> NaiveTime {
        self.last_train
    }

    /// Returns true if the station is open at the given time of day.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        self.first_train <= time && time <= self.last_train
    }
}

impl OperatingHours {
    /// First train when a station has no schedule of its own.
    pub const DEFAULT_FIRST_TRAIN: NaiveTime = NaiveTime::from_hms_opt(5, 0, 0).unwrap();

    /// Last train when a station has no schedule of its own.
    pub const DEFAULT_LAST_TRAIN: NaiveTime = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FIRST_TRAIN, Self::DEFAULT_LAST_TRAIN)
    }
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.first_train.hour(),
            self.first_train.minute(),
            self.last_train.hour(),
            self.last_train.minute()
        )
    }
}
