//! Station name type.

use std::borrow::Borrow;
use std::fmt;

/// A normalized station name.
///
/// Station names are the identity of a station, so every name that enters
/// the system is normalized the same way: surrounding whitespace is trimmed
/// and the name is title-cased. The first letter of each run of letters is
/// upper-cased and the rest are lower-cased; anything that is not a letter
/// ends the run and is kept as-is. Interior whitespace is left alone.
///
/// # Examples
///
/// ```
/// use metro_router::domain::StationName;
///
/// assert_eq!(StationName::new("mg road").as_str(), "Mg Road");
/// assert_eq!(StationName::new(" MG Road ").as_str(), "Mg Road");
/// assert_eq!(StationName::new("kr puram-1").as_str(), "Kr Puram-1");
///
/// // Normalization is idempotent
/// let once = StationName::new("BAIYAPPANAHALLI");
/// assert_eq!(StationName::new(once.as_str()), once);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(String);

impl StationName {
    /// Normalize a raw station name.
    pub fn new(raw: &str) -> Self {
        Self(title_case(raw.trim()))
    }

    /// Returns the normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Title-case a string the way station names are keyed.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && in_word {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = cased;
    }

    out
}

impl From<&str> for StationName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for StationName {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
