//! Route types returned by the planner.

use std::fmt;

use crate::domain::{Line, StationName};

use super::Optimize;

/// One station on a route, with the line used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub station: StationName,
    /// `None` for the starting station.
    pub line: Option<Line>,
}

impl PathStep {
    pub fn new(station: StationName, line: Option<Line>) -> Self {
        Self { station, line }
    }
}

/// A route found by the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Stations in travel order, starting at the origin.
    pub path: Vec<PathStep>,

    /// Total travel time in minutes, including line-change penalties.
    pub time: f64,

    /// Total fare, including line-change penalties.
    pub cost: f64,

    /// Mean crowd level of the stations on the path.
    pub crowd_score: f64,

    /// The mode the route was searched with.
    pub optimization: Optimize,
}

impl Route {
    /// Returns the first station.
    pub fn origin(&self) -> Option<&StationName> {
        self.path.first().map(|step| &step.station)
    }

    /// Returns the last station.
    pub fn destination(&self) -> Option<&StationName> {
        self.path.last().map(|step| &step.station)
    }

    /// Station names in travel order.
    pub fn stations(&self) -> impl Iterator<Item = &StationName> + '_ {
        self.path.iter().map(|step| &step.station)
    }

    /// Number of stations on the path, origin included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns true if the path has no stations.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of times the route switches from one line to another.
    pub fn line_changes(&self) -> usize {
        self.path
            .windows(2)
            .filter(|pair| match (&pair[0].line, &pair[1].line) {
                (Some(prev), Some(next)) => prev != next,
                _ => false,
            })
            .count()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.path.iter().enumerate() {
            match &step.line {
                Some(line) if i > 0 => writeln!(f, "  -> {} ({})", step.station, line)?,
                _ => writeln!(f, "  {}", step.station)?,
            }
        }
        write!(
            f,
            "time: {} min, cost: {}, crowd score: {:.2} (optimized for {})",
            self.time, self.cost, self.crowd_score, self.optimization
        )
    }
}
