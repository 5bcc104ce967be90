//! Network loading from station records.
//!
//! Station data is exported as a JSON array of station records, one per
//! station, each listing its outgoing connections. Loading replays the
//! records into a fresh [`Network`] and hands it back; nothing keeps a handle
//! to the source afterwards.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    CrowdLevel, InvalidCrowdLevel, Location, OperatingHours, StationName, TimeError,
};

use super::Network;

/// Errors that can occur while loading a network.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be read
    #[error("failed to read network data: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not a valid list of station records
    #[error("failed to parse network data: {0}")]
    Json(#[from] serde_json::Error),

    /// A first/last train time is not HH:MM
    #[error("invalid schedule for station {station}: {source}")]
    InvalidSchedule {
        station: StationName,
        source: TimeError,
    },

    /// A crowd level is outside 1-5
    #[error("invalid crowd level for station {station}: {source}")]
    InvalidCrowdLevel {
        station: StationName,
        source: InvalidCrowdLevel,
    },
}

/// First and last train times, as "HH:MM" strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub first_train: String,
    pub last_train: String,
}

/// One outgoing connection of a station record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Name of the neighboring station.
    pub station: String,
    pub time: f64,
    pub cost: f64,
    pub line: String,
}

/// A station as stored in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_level: Option<i64>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl StationRecord {
    /// A record with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schedule: None,
            location: None,
            crowd_level: None,
            connections: Vec::new(),
        }
    }
}

/// Build a network from station records.
///
/// Records are applied in order. Each record adds its station and sets any
/// schedule, location or crowd level it carries. Each connection adds the
/// neighbor with default attributes if it has not been seen yet, then
/// connects the pair. A later record for the same station overrides its
/// attributes but keeps the connections already registered.
pub fn load_records(
    records: impl IntoIterator<Item = StationRecord>,
) -> Result<Network, LoadError> {
    let mut network = Network::new();

    for record in records {
        let station = StationName::new(&record.name);
        network.add_station(station.as_str());

        if let Some(schedule) = &record.schedule {
            let hours = OperatingHours::parse(&schedule.first_train, &schedule.last_train)
                .map_err(|source| LoadError::InvalidSchedule {
                    station: station.clone(),
                    source,
                })?;
            network.set_schedule(station.as_str(), hours);
        }

        if let Some(location) = record.location {
            network.set_location(station.as_str(), location);
        }

        if let Some(level) = record.crowd_level {
            let level = CrowdLevel::new(level).map_err(|source| LoadError::InvalidCrowdLevel {
                station: station.clone(),
                source,
            })?;
            network.set_crowd_level(station.as_str(), level);
        }

        for conn in record.connections {
            network.add_station(&conn.station);
            network.add_connection(
                station.as_str(),
                &conn.station,
                conn.time,
                conn.cost,
                conn.line,
            );
        }
    }

    info!(
        stations = network.len(),
        connections = network.connection_count(),
        "Loaded metro network"
    );

    Ok(network)
}

/// Build a network from a JSON array of station records.
pub fn load_from_reader(reader: impl Read) -> Result<Network, LoadError> {
    let records: Vec<StationRecord> = serde_json::from_reader(reader)?;
    load_records(records)
}

/// Build a network from a JSON file of station records.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Network, LoadError> {
    let file = File::open(path.as_ref())?;
    load_from_reader(BufReader::new(file))
}
