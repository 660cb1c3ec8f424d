//! Id-keyed station lookup shared across lines.

use std::collections::HashMap;

use crate::identifiers::StationId;
use crate::models::types::{Result, Station, SubwayError};

/// Read-mostly registry of stations, keyed by id.
///
/// Stations referenced by many lines are owned here, never by a line;
/// lines and route plans carry [`StationId`]s only, and the directory
/// turns an id sequence back into station records for presentation.
#[derive(Clone, Debug, Default)]
pub struct StationDirectory {
    stations: HashMap<StationId, Station>,
}

impl StationDirectory {
    pub fn new() -> Self {
        Self {
            stations: HashMap::new(),
        }
    }

    /// Register a station, replacing any previous record with the same id.
    pub fn insert(&mut self, station: Station) {
        self.stations.insert(station.id, station);
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Resolve an id sequence (e.g. a route plan) to station records.
    ///
    /// Fails on the first id the directory has never seen.
    pub fn resolve(&self, ids: &[StationId]) -> Result<Vec<&Station>> {
        ids.iter()
            .map(|&id| {
                self.stations
                    .get(&id)
                    .ok_or(SubwayError::StationNotFound(id))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<Station> for StationDirectory {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        let mut directory = Self::new();
        for station in iter {
            directory.insert(station);
        }
        directory
    }
}
