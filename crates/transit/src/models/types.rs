//! Core data types and errors for the subway network.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::identifiers::{LineId, StationId};

// ============================================================================
// Station
// ============================================================================

/// A subway station.
///
/// Identity is the id alone: two stations are equal iff their ids match,
/// whatever their display names say. Stations are shared across lines, so
/// they live in a [`StationDirectory`](crate::directory::StationDirectory)
/// and lines refer to them by [`StationId`] only.
#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationId,
    pub name: Arc<str>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Section
// ============================================================================

/// A directed edge between two stations on one line.
///
/// The distance is a positive integer. A section is owned by exactly one
/// [`Sections`](crate::models::Sections) chain; the only mutation it ever
/// sees after construction is the endpoint/distance adjustment a chain
/// split or merge applies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    line: LineId,
    up: StationId,
    down: StationId,
    distance: u32,
}

impl Section {
    /// Create a section, rejecting equal endpoints and zero distances.
    pub fn new(line: LineId, up: StationId, down: StationId, distance: u32) -> Result<Self> {
        if up == down {
            return Err(SubwayError::SameStation(up));
        }
        if distance == 0 {
            return Err(SubwayError::InvalidDistance {
                existing: 0,
                inserted: 0,
            });
        }
        Ok(Self {
            line,
            up,
            down,
            distance,
        })
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    /// The station this section departs from.
    pub fn up(&self) -> StationId {
        self.up
    }

    /// The station this section arrives at.
    pub fn down(&self) -> StationId {
        self.down
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Move the up end to `up` and shorten to `distance` (chain split).
    pub(crate) fn shrink_up(&mut self, up: StationId, distance: u32) {
        self.up = up;
        self.distance = distance;
    }

    /// Move the down end to `down` and shorten to `distance` (chain split).
    pub(crate) fn shrink_down(&mut self, down: StationId, distance: u32) {
        self.down = down;
        self.distance = distance;
    }

    /// Combine two adjacent sections into one spanning section.
    ///
    /// `incoming.down == outgoing.up` is the caller's invariant; the merged
    /// endpoints are distinct because a chain never cycles.
    pub(crate) fn merge(incoming: &Section, outgoing: &Section) -> Section {
        Section {
            line: incoming.line,
            up: incoming.up,
            down: outgoing.down,
            distance: incoming.distance + outgoing.distance,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubwayError {
    #[error("both endpoints of the section are already in the chain")]
    DuplicateSection,

    #[error("neither endpoint of the section is in the chain")]
    DisconnectedSection,

    #[error("invalid distance: a section of {inserted} does not fit in the {existing} available")]
    InvalidDistance { existing: u32, inserted: u32 },

    #[error("a line must keep at least one section")]
    MinimumSection,

    #[error("station not found: {0}")]
    StationNotFound(StationId),

    #[error("source and target station are the same: {0}")]
    SameStation(StationId),

    #[error("no path between {from} and {to}")]
    NoPath { from: StationId, to: StationId },
}

pub type Result<T> = std::result::Result<T, SubwayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_equality_by_id_only() {
        let a = Station::new(StationId::new(1), "Gangnam");
        let b = Station::new(StationId::new(1), "Renamed");
        let c = Station::new(StationId::new(2), "Gangnam");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_section_rejects_equal_endpoints() {
        let station = StationId::new(1);
        let result = Section::new(LineId::new(1), station, station, 10);

        assert_eq!(result, Err(SubwayError::SameStation(station)));
    }

    #[test]
    fn test_section_rejects_zero_distance() {
        let result = Section::new(LineId::new(1), StationId::new(1), StationId::new(2), 0);

        assert!(matches!(result, Err(SubwayError::InvalidDistance { .. })));
    }

    #[test]
    fn test_merge_sums_distances() {
        let line = LineId::new(1);
        let (a, b, c) = (StationId::new(1), StationId::new(2), StationId::new(3));
        let incoming = Section::new(line, a, b, 7).unwrap();
        let outgoing = Section::new(line, b, c, 5).unwrap();

        let merged = Section::merge(&incoming, &outgoing);

        assert_eq!(merged.up(), a);
        assert_eq!(merged.down(), c);
        assert_eq!(merged.distance(), 12);
    }
}
