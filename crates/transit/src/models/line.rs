//! A subway line: display metadata plus its section chain.

use std::sync::Arc;

use crate::identifiers::{LineId, StationId};
use crate::models::sections::Sections;
use crate::models::types::{Result, Section};

/// One line of the network.
///
/// Holds no topology invariant of its own; section mutations delegate to
/// [`Sections`] with identical contracts.
#[derive(Clone, Debug)]
pub struct Line {
    id: LineId,
    name: Arc<str>,
    color: Arc<str>,
    sections: Sections,
}

impl Line {
    /// Create a line with an empty chain.
    pub fn new(id: LineId, name: impl Into<Arc<str>>, color: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            sections: Sections::new(),
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Replace the display metadata.
    pub fn update(&mut self, name: impl Into<Arc<str>>, color: impl Into<Arc<str>>) {
        self.name = name.into();
        self.color = color.into();
    }

    pub fn add_section(&mut self, section: Section) -> Result<()> {
        self.sections.add(section)
    }

    pub fn remove_station(&mut self, station: StationId) -> Result<()> {
        self.sections.remove(station)
    }

    /// Ordered station ids from the up terminus to the down terminus.
    pub fn stations(&self) -> Vec<StationId> {
        self.sections.connected_stations()
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }
}
