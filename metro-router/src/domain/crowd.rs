//! Station crowd level.

use std::fmt;

/// Error returned when a crowd level is outside 1-5.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid crowd level {value}: must be between 1 and 5")]
pub struct InvalidCrowdLevel {
    value: i64,
}

/// How crowded a station usually is, from 1 (quiet) to 5 (packed).
///
/// # Examples
///
/// ```
/// use metro_router::domain::CrowdLevel;
///
/// assert_eq!(CrowdLevel::default().get(), 3);
/// assert_eq!(CrowdLevel::new(5).unwrap().get(), 5);
/// assert!(CrowdLevel::new(0).is_err());
/// assert!(CrowdLevel::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrowdLevel(u8);

impl CrowdLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a crowd level, rejecting values outside 1-5.
    pub fn new(value: i64) -> Result<Self, InvalidCrowdLevel> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidCrowdLevel { value })
        }
    }

    /// Returns the level as a number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for CrowdLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}
