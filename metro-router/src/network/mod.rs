//! In-memory metro network.
//!
//! Stations live in an arena indexed by [`StationId`], with a name index for
//! lookups. Each station keeps its own map of neighbor to [`Connection`].
//! Connections are always registered in both directions, and a station pair
//! holds at most one connection per direction: registering the pair again
//! replaces the earlier connection.
//!
//! The network is built once (usually by [`load_from_path`]) and is then
//! read-only while routes are searched.

mod loader;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{CrowdLevel, Line, Location, OperatingHours, StationName};

pub use loader::{
    ConnectionRecord, LoadError, ScheduleRecord, StationRecord, load_from_path, load_from_reader,
    load_records,
};

/// Dense index of a station within a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(usize);

impl StationId {
    /// Returns the position of the station in the network's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A connection from one station to a neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Travel time in minutes.
    pub time: f64,
    /// Fare for the hop.
    pub cost: f64,
    /// Line the connection runs on.
    pub line: Line,
}

impl Connection {
    /// Create a connection.
    pub fn new(time: f64, cost: f64, line: impl Into<Line>) -> Self {
        Self {
            time,
            cost,
            line: line.into(),
        }
    }
}

/// A station and its outgoing connections.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: StationName,
    schedule: OperatingHours,
    crowd_level: CrowdLevel,
    location: Location,
    connections: BTreeMap<StationId, Connection>,
}

impl Station {
    fn new(id: StationId, name: StationName) -> Self {
        Self {
            id,
            name,
            schedule: OperatingHours::default(),
            crowd_level: CrowdLevel::default(),
            location: Location::default(),
            connections: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    pub fn schedule(&self) -> OperatingHours {
        self.schedule
    }

    pub fn crowd_level(&self) -> CrowdLevel {
        self.crowd_level
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Outgoing connections, ordered by neighbor id.
    pub fn connections(&self) -> impl Iterator<Item = (StationId, &Connection)> + '_ {
        self.connections.iter().map(|(id, conn)| (*id, conn))
    }

    /// The connection to a given neighbor, if any.
    pub fn connection_to(&self, neighbor: StationId) -> Option<&Connection> {
        self.connections.get(&neighbor)
    }

    /// Number of neighbors.
    pub fn degree(&self) -> usize {
        self.connections.len()
    }
}

/// The metro network: every station and connection.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationName, StationId>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station with default schedule, crowd level and location.
    ///
    /// The name is normalized first. Adding a station that already exists
    /// changes nothing. Either way the station's id is returned.
    pub fn add_station(&mut self, name: &str) -> StationId {
        let name = StationName::new(name);
        if let Some(id) = self.index.get(&name) {
            return *id;
        }

        let id = StationId(self.stations.len());
        self.stations.push(Station::new(id, name.clone()));
        self.index.insert(name, id);
        id
    }

    /// Connect two existing stations in both directions.
    ///
    /// Both directions get the same time, cost and line, replacing any
    /// connection already registered between the pair. If either station is
    /// unknown nothing is registered and `false` is returned.
    pub fn add_connection(
        &mut self,
        from: &str,
        to: &str,
        time: f64,
        cost: f64,
        line: impl Into<Line>,
    ) -> bool {
        let (Some(a), Some(b)) = (self.id_of(from), self.id_of(to)) else {
            debug!(from, to, "ignoring connection to unknown station");
            return false;
        };

        let connection = Connection::new(time, cost, line);
        self.stations[b.0].connections.insert(a, connection.clone());
        self.stations[a.0].connections.insert(b, connection);
        true
    }

    /// Replace a station's operating hours. Returns `false` if unknown.
    pub fn set_schedule(&mut self, name: &str, schedule: OperatingHours) -> bool {
        self.station_mut(name)
            .map(|station| station.schedule = schedule)
            .is_some()
    }

    /// Replace a station's crowd level. Returns `false` if unknown.
    pub fn set_crowd_level(&mut self, name: &str, crowd_level: CrowdLevel) -> bool {
        self.station_mut(name)
            .map(|station| station.crowd_level = crowd_level)
            .is_some()
    }

    /// Replace a station's location. Returns `false` if unknown.
    pub fn set_location(&mut self, name: &str, location: Location) -> bool {
        self.station_mut(name)
            .map(|station| station.location = location)
            .is_some()
    }

    /// Look up a station id by (raw) name.
    pub fn id_of(&self, name: &str) -> Option<StationId> {
        self.index.get(StationName::new(name).as_str()).copied()
    }

    /// Look up a station by (raw) name.
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.id_of(name).map(|id| &self.stations[id.0])
    }

    /// Returns the station with the given id.
    ///
    /// Ids are only handed out by this network, so they are always in range.
    pub fn station_by_id(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    /// Returns true if a station with this (raw) name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.id_of(name).is_some()
    }

    /// Operating hours of a station.
    pub fn schedule(&self, name: &str) -> Option<OperatingHours> {
        self.station(name).map(Station::schedule)
    }

    /// Crowd level of a station.
    pub fn crowd_level(&self, name: &str) -> Option<CrowdLevel> {
        self.station(name).map(Station::crowd_level)
    }

    /// Neighbors of a station, keyed by neighbor name.
    pub fn connections(&self, name: &str) -> Option<Vec<(&StationName, &Connection)>> {
        let station = self.station(name)?;
        Some(
            station
                .connections()
                .map(|(id, conn)| (&self.stations[id.0].name, conn))
                .collect(),
        )
    }

    /// The connection from one station to another, if any.
    pub fn connection(&self, from: &str, to: &str) -> Option<&Connection> {
        let to = self.id_of(to)?;
        self.station(from)?.connection_to(to)
    }

    /// All stations, in the order they were added.
    pub fn stations(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of connected station pairs (A-B and B-A count once).
    pub fn connection_count(&self) -> usize {
        let directed: usize = self.stations.iter().map(Station::degree).sum();
        let self_loops = self
            .stations
            .iter()
            .filter(|s| s.connections.contains_key(&s.id))
            .count();
        (directed + self_loops) / 2
    }

    fn station_mut(&mut self, name: &str) -> Option<&mut Station> {
        let id = self.id_of(name)?;
        Some(&mut self.stations[id.0])
    }
}
