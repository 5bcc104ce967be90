//! Optimization modes and queue ordering.
//!
//! A request names what to optimize as a string. Each recognized mode maps
//! to a [`Strategy`], which decides the order in which partial routes leave
//! the priority queue. There is no strategy that orders by cost: any mode
//! other than `"time"` is searched by crowding, `"cost"` included.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::StationName;

/// The optimization mode requested by the caller.
///
/// # Examples
///
/// ```
/// use metro_router::planner::{Optimize, Strategy};
///
/// assert_eq!(Optimize::parse("time"), Optimize::Time);
/// assert_eq!(Optimize::parse("least_crowded").strategy(), Strategy::ByCrowd);
///
/// // Unrecognized modes are kept and searched by crowding
/// let cost = Optimize::parse("cost");
/// assert_eq!(cost.as_str(), "cost");
/// assert_eq!(cost.strategy(), Strategy::ByCrowd);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Optimize {
    /// Fastest route
    #[default]
    Time,
    /// Least crowded route
    LeastCrowded,
    /// Any other mode string, echoed back as given
    Other(String),
}

impl Optimize {
    /// Parse a mode string. Never fails: unknown strings become `Other`.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "time" => Optimize::Time,
            "least_crowded" => Optimize::LeastCrowded,
            other => Optimize::Other(other.to_string()),
        }
    }

    /// Returns the mode as the caller spelled it.
    pub fn as_str(&self) -> &str {
        match self {
            Optimize::Time => "time",
            Optimize::LeastCrowded => "least_crowded",
            Optimize::Other(mode) => mode,
        }
    }

    /// The queue ordering used for this mode.
    pub fn strategy(&self) -> Strategy {
        match self {
            Optimize::Time => Strategy::ByTime,
            Optimize::LeastCrowded | Optimize::Other(_) => Strategy::ByCrowd,
        }
    }
}

impl From<&str> for Optimize {
    fn from(mode: &str) -> Self {
        Self::parse(mode)
    }
}

impl From<String> for Optimize {
    fn from(mode: String) -> Self {
        Self::parse(&mode)
    }
}

impl fmt::Display for Optimize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How queued partial routes are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Time, then cost, then crowd.
    ByTime,
    /// Crowd, then time, then cost.
    ByCrowd,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::ByTime => f.write_str("by-time"),
            Strategy::ByCrowd => f.write_str("by-crowd"),
        }
    }
}

/// Sort key of a queued label.
///
/// Orders by the strategy's criteria, then by station name, then by push
/// order, so the search is deterministic. Smaller keys are better.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Priority<'a> {
    pub strategy: Strategy,
    pub time: f64,
    pub cost: f64,
    pub crowd: u32,
    pub station: &'a StationName,
    pub seq: usize,
}

impl Ord for Priority<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let criteria = match self.strategy {
            Strategy::ByTime => self
                .time
                .total_cmp(&other.time)
                .then(self.cost.total_cmp(&other.cost))
                .then(self.crowd.cmp(&other.crowd)),
            Strategy::ByCrowd => self
                .crowd
                .cmp(&other.crowd)
                .then(self.time.total_cmp(&other.time))
                .then(self.cost.total_cmp(&other.cost)),
        };

        criteria
            .then_with(|| self.station.cmp(other.station))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Priority<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Priority<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority<'_> {}
