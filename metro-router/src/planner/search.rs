//! Best-first route search.
//!
//! Finds a route between two stations by repeatedly taking the best partial
//! route off a priority queue and extending it along every connection.
//! A station is finalized the first time it is taken off the queue, whatever
//! line reached it; later labels for that station are dropped. Changing
//! line costs a fixed time and fare penalty, and stations closed at the
//! departure time are never entered.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Utc};
use tracing::{debug, trace};

use crate::domain::{Line, StationName};
use crate::network::{Network, StationId};

use super::config::SearchConfig;
use super::route::{PathStep, Route};
use super::strategy::{Optimize, Priority, Strategy};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start and/or end station is not in the network
    #[error("station not found: {}", UnknownStations(.names))]
    StationNotFound { names: Vec<StationName> },

    /// Search created more labels than allowed
    #[error("search exceeded {limit} labels")]
    ExplorationLimit { limit: usize },
}

/// Formats a list of station names for error messages.
struct UnknownStations<'a>(&'a [StationName]);

impl fmt::Display for UnknownStations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{name}\"")?;
        }
        Ok(())
    }
}

/// A partial route ending at a station.
///
/// Labels are stored in an arena; `parent` points at the label this one
/// extends, which is how the path is rebuilt once the destination is reached.
#[derive(Debug, Clone, Copy)]
struct Label<'a> {
    station: StationId,
    line: Option<&'a Line>,
    time: f64,
    cost: f64,
    crowd: u32,
    parent: Option<usize>,
}

/// Route planner over a loaded network.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Find a route from `start` to `end`, departing at `departure`.
    ///
    /// Station names are normalized before lookup. Only the time of day of
    /// `departure` is used: every station on the route must be open at that
    /// time, except the starting station, which is never checked.
    ///
    /// Returns `Ok(None)` if no route exists, and an error if either station
    /// is unknown.
    pub fn find_path(
        &self,
        start: &str,
        end: &str,
        mode: impl Into<Optimize>,
        departure: NaiveDateTime,
    ) -> Result<Option<Route>, SearchError> {
        let mode = mode.into();
        let (start, end) = self.resolve(start, end)?;
        let strategy = mode.strategy();

        if let Optimize::Other(requested) = &mode {
            debug!(mode = %requested, "unrecognized mode, ordering by crowd");
        }
        debug!(
            start = %self.network.station_by_id(start).name(),
            end = %self.network.station_by_id(end).name(),
            %strategy,
            departure = %departure,
            "Starting route search"
        );

        let found = self.search(start, end, strategy, departure.time())?;
        Ok(found.map(|(labels, last)| self.build_route(&labels, last, mode)))
    }

    /// Find a route departing now, in the network's local time.
    pub fn find_path_now(
        &self,
        start: &str,
        end: &str,
        mode: impl Into<Optimize>,
    ) -> Result<Option<Route>, SearchError> {
        let now = Utc::now()
            .with_timezone(&self.config.utc_offset())
            .naive_local();
        self.find_path(start, end, mode, now)
    }

    /// Look up both stations, reporting every name that is missing.
    fn resolve(&self, start: &str, end: &str) -> Result<(StationId, StationId), SearchError> {
        match (self.network.id_of(start), self.network.id_of(end)) {
            (Some(start), Some(end)) => Ok((start, end)),
            (start_id, end_id) => {
                let mut names = Vec::new();
                if start_id.is_none() {
                    names.push(StationName::new(start));
                }
                let end = StationName::new(end);
                if end_id.is_none() && !names.contains(&end) {
                    names.push(end);
                }
                Err(SearchError::StationNotFound { names })
            }
        }
    }

    /// Run the search. On success returns the label arena and the index of
    /// the label that reached `end`.
    fn search(
        &self,
        start: StationId,
        end: StationId,
        strategy: Strategy,
        at: NaiveTime,
    ) -> Result<Option<(Vec<Label<'a>>, usize)>, SearchError> {
        let network = self.network;
        let mut labels: Vec<Label<'a>> = Vec::new();
        let mut queue: BinaryHeap<Reverse<Priority<'a>>> = BinaryHeap::new();
        let mut visited = vec![false; network.len()];

        let origin = network.station_by_id(start);
        labels.push(Label {
            station: start,
            line: None,
            time: 0.0,
            cost: 0.0,
            crowd: u32::from(origin.crowd_level().get()),
            parent: None,
        });
        queue.push(Reverse(self.priority(strategy, &labels[0], 0)));

        while let Some(Reverse(next)) = queue.pop() {
            let index = next.seq;
            let label = labels[index];
            if visited[label.station.index()] {
                continue;
            }
            visited[label.station.index()] = true;

            let station = network.station_by_id(label.station);
            trace!(
                station = %station.name(),
                time = label.time,
                cost = label.cost,
                crowd = label.crowd,
                "Finalized station"
            );

            if label.station == end {
                debug!(labels = labels.len(), "Route found");
                return Ok(Some((labels, index)));
            }

            for (neighbor_id, connection) in station.connections() {
                if visited[neighbor_id.index()] {
                    continue;
                }

                let neighbor = network.station_by_id(neighbor_id);
                if !neighbor.schedule().is_open_at(at) {
                    trace!(station = %neighbor.name(), "Skipping closed station");
                    continue;
                }

                let changes_line = label.line.is_some_and(|line| *line != connection.line);
                let (time_penalty, cost_penalty) = if changes_line {
                    (
                        self.config.line_change_time_penalty,
                        self.config.line_change_cost_penalty,
                    )
                } else {
                    (0.0, 0.0)
                };

                if labels.len() >= self.config.max_labels {
                    debug!(limit = self.config.max_labels, "Label limit reached");
                    return Err(SearchError::ExplorationLimit {
                        limit: self.config.max_labels,
                    });
                }

                let extended = Label {
                    station: neighbor_id,
                    line: Some(&connection.line),
                    time: label.time + connection.time + time_penalty,
                    cost: label.cost + connection.cost + cost_penalty,
                    crowd: label.crowd + u32::from(neighbor.crowd_level().get()),
                    parent: Some(index),
                };
                let seq = labels.len();
                labels.push(extended);
                queue.push(Reverse(self.priority(strategy, &extended, seq)));
            }
        }

        debug!(labels = labels.len(), "No route found");
        Ok(None)
    }

    fn priority(&self, strategy: Strategy, label: &Label<'a>, seq: usize) -> Priority<'a> {
        let network: &'a Network = self.network;
        Priority {
            strategy,
            time: label.time,
            cost: label.cost,
            crowd: label.crowd,
            station: network.station_by_id(label.station).name(),
            seq,
        }
    }

    /// Walk parent links back from the final label to build the route.
    fn build_route(&self, labels: &[Label<'a>], last: usize, mode: Optimize) -> Route {
        let mut path = Vec::new();
        let mut next = Some(last);
        while let Some(index) = next {
            let label = &labels[index];
            let name = self.network.station_by_id(label.station).name().clone();
            path.push(PathStep::new(name, label.line.cloned()));
            next = label.parent;
        }
        path.reverse();

        let finish = &labels[last];
        Route {
            crowd_score: f64::from(finish.crowd) / path.len() as f64,
            path,
            time: finish.time,
            cost: finish.cost,
            optimization: mode,
        }
    }
}
