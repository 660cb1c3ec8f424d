//! The section chain of a single line.
//!
//! A chain is a single simple path: every station appears as the up end of
//! at most one section and as the down end of at most one section, with no
//! cycles. Inserting a section in the middle of the chain splits the
//! section it overlaps; removing an interior station merges the two
//! sections that meet there. Distances are reconciled exactly in both
//! directions.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::identifiers::StationId;
use crate::models::types::{Result, Section, SubwayError};

/// Which endpoints of a candidate section are already present in the chain.
///
/// Computed once per `add` so the insertion logic can branch on a single
/// tag instead of re-testing membership along the way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EndpointMatch {
    None,
    Up,
    Down,
    Both,
}

/// Ordered chain of sections scoped to one line.
///
/// Storage order is insertion order, not chain order; the chain order is
/// derived by adjacency (see [`connected_stations`](Sections::connected_stations)).
#[derive(Clone, Debug, Default)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The raw section records, in insertion order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// End-to-end length of the chain.
    pub fn total_distance(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.distance()))
            .sum()
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.sections
            .iter()
            .any(|s| s.up() == station || s.down() == station)
    }

    /// Insert a section anywhere along the chain.
    ///
    /// An empty chain accepts any section. Otherwise exactly one endpoint
    /// of the new section must already be in the chain: the section then
    /// either extends a terminus or splits the section it overlaps (the
    /// overlapped section keeps `old_distance - new_distance`, which must
    /// stay positive). Errors leave the chain untouched.
    pub fn add(&mut self, section: Section) -> Result<()> {
        if self.sections.is_empty() {
            debug!(up = %section.up(), down = %section.down(), "starting new chain");
            self.sections.push(section);
            return Ok(());
        }

        match self.classify(&section) {
            EndpointMatch::Both => Err(SubwayError::DuplicateSection),
            EndpointMatch::None => Err(SubwayError::DisconnectedSection),
            EndpointMatch::Up => self.attach_by_up(section),
            EndpointMatch::Down => self.attach_by_down(section),
        }
    }

    /// Remove a station, dropping a terminus section or merging the two
    /// sections that meet at an interior station.
    ///
    /// Merging preserves the end-to-end distance exactly. Errors leave the
    /// chain untouched.
    pub fn remove(&mut self, station: StationId) -> Result<()> {
        if !self.contains(station) {
            return Err(SubwayError::StationNotFound(station));
        }
        if self.sections.len() == 1 {
            return Err(SubwayError::MinimumSection);
        }

        if self.up_terminus() == Some(station) {
            let Some(idx) = self.sections.iter().position(|s| s.up() == station) else {
                return Err(SubwayError::StationNotFound(station));
            };
            debug!(station = %station, "removing up terminus");
            self.sections.remove(idx);
            return Ok(());
        }

        if self.down_terminus() == Some(station) {
            let Some(idx) = self.sections.iter().position(|s| s.down() == station) else {
                return Err(SubwayError::StationNotFound(station));
            };
            debug!(station = %station, "removing down terminus");
            self.sections.remove(idx);
            return Ok(());
        }

        // Interior station: exactly one section arrives and one departs.
        let Some(incoming_idx) = self.sections.iter().position(|s| s.down() == station) else {
            return Err(SubwayError::StationNotFound(station));
        };
        let Some(outgoing_idx) = self.sections.iter().position(|s| s.up() == station) else {
            return Err(SubwayError::StationNotFound(station));
        };

        let merged = Section::merge(&self.sections[incoming_idx], &self.sections[outgoing_idx]);
        debug!(
            station = %station,
            merged_distance = merged.distance(),
            "merging sections around removed station"
        );

        let (first, second) = if incoming_idx > outgoing_idx {
            (incoming_idx, outgoing_idx)
        } else {
            (outgoing_idx, incoming_idx)
        };
        self.sections.remove(first);
        self.sections.remove(second);
        self.sections.push(merged);
        Ok(())
    }

    /// Ordered station ids from the up terminus to the down terminus.
    ///
    /// Walks the chain by adjacency; for a chain of `n` sections the result
    /// holds `n + 1` distinct stations. Empty chain yields an empty vec.
    pub fn connected_stations(&self) -> Vec<StationId> {
        let Some(mut current) = self.up_terminus() else {
            return Vec::new();
        };

        let next: HashMap<StationId, StationId> = self
            .sections
            .iter()
            .map(|s| (s.up(), s.down()))
            .collect();

        let mut ordered = Vec::with_capacity(self.sections.len() + 1);
        ordered.push(current);
        while let Some(&station) = next.get(&current) {
            ordered.push(station);
            current = station;
        }
        ordered
    }

    /// The station with no incoming section, if the chain is non-empty.
    pub fn up_terminus(&self) -> Option<StationId> {
        let downs: HashSet<StationId> = self.sections.iter().map(|s| s.down()).collect();
        self.sections
            .iter()
            .map(|s| s.up())
            .find(|up| !downs.contains(up))
    }

    /// The station with no outgoing section, if the chain is non-empty.
    pub fn down_terminus(&self) -> Option<StationId> {
        let ups: HashSet<StationId> = self.sections.iter().map(|s| s.up()).collect();
        self.sections
            .iter()
            .map(|s| s.down())
            .find(|down| !ups.contains(down))
    }

    /// The station the chain continues to after `station`, if any.
    pub fn next_station(&self, station: StationId) -> Option<StationId> {
        self.section_from(station).map(Section::down)
    }

    /// The section departing `station`, if any.
    pub fn section_from(&self, station: StationId) -> Option<&Section> {
        self.sections.iter().find(|s| s.up() == station)
    }

    /// The section arriving at `station`, if any.
    pub fn section_to(&self, station: StationId) -> Option<&Section> {
        self.sections.iter().find(|s| s.down() == station)
    }

    /// The chain section sharing an up or down endpoint with `candidate`.
    pub fn section_sharing_endpoint(&self, candidate: &Section) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.up() == candidate.up() || s.down() == candidate.down())
    }

    fn classify(&self, section: &Section) -> EndpointMatch {
        match (self.contains(section.up()), self.contains(section.down())) {
            (true, true) => EndpointMatch::Both,
            (true, false) => EndpointMatch::Up,
            (false, true) => EndpointMatch::Down,
            (false, false) => EndpointMatch::None,
        }
    }

    /// The new section's up end is in the chain: append past the down
    /// terminus, or split the section departing the shared station.
    fn attach_by_up(&mut self, section: Section) -> Result<()> {
        if self.down_terminus() == Some(section.up()) {
            debug!(station = %section.down(), "extending chain at down terminus");
            self.sections.push(section);
            return Ok(());
        }

        let Some(idx) = self.sections.iter().position(|s| s.up() == section.up()) else {
            return Err(SubwayError::DisconnectedSection);
        };
        let remaining = split_remaining(self.sections[idx].distance(), section.distance())?;
        debug!(station = %section.down(), remaining, "splitting section at shared up end");
        self.sections[idx].shrink_up(section.down(), remaining);
        self.sections.insert(idx, section);
        Ok(())
    }

    /// The new section's down end is in the chain: prepend above the up
    /// terminus, or split the section arriving at the shared station.
    fn attach_by_down(&mut self, section: Section) -> Result<()> {
        if self.up_terminus() == Some(section.down()) {
            debug!(station = %section.up(), "extending chain at up terminus");
            self.sections.push(section);
            return Ok(());
        }

        let Some(idx) = self
            .sections
            .iter()
            .position(|s| s.down() == section.down())
        else {
            return Err(SubwayError::DisconnectedSection);
        };
        let remaining = split_remaining(self.sections[idx].distance(), section.distance())?;
        debug!(station = %section.up(), remaining, "splitting section at shared down end");
        self.sections[idx].shrink_down(section.up(), remaining);
        self.sections.insert(idx + 1, section);
        Ok(())
    }
}

/// Distance left for the overlapped section after a split; never clamps.
fn split_remaining(existing: u32, inserted: u32) -> Result<u32> {
    if inserted >= existing {
        return Err(SubwayError::InvalidDistance { existing, inserted });
    }
    Ok(existing - inserted)
}
