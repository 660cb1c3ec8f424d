//! # subway-transit
//!
//! Subway network modeling: per-line section chains with topology
//! invariants, and cross-line shortest-path search.
//!
//! ## Features
//!
//! - **Chain invariants**: a line's sections always form a single simple
//!   path; insertion and removal anywhere along the chain reconcile
//!   distances via split and merge
//! - **Shortest paths**: all lines assemble into one weighted graph and
//!   answer minimum-distance queries between any two stations
//! - **Typed errors**: every failure mode is a [`SubwayError`] variant
//! - **Id-based identity**: lines hold [`StationId`]s; station records live
//!   in a shared [`StationDirectory`]
//!
//! ## Example
//!
//! ```
//! use subway_transit::prelude::*;
//!
//! let line_id = LineId::new(1);
//! let (a, b, c) = (StationId::new(1), StationId::new(2), StationId::new(3));
//!
//! let mut line = Line::new(line_id, "Line 2", "green");
//! line.add_section(Section::new(line_id, a, b, 10)?)?;
//! line.add_section(Section::new(line_id, b, c, 4)?)?;
//!
//! let lines = [line];
//! let graph = NetworkGraph::from_lines(&lines);
//! let route = graph.shortest_path(a, c)?;
//! assert_eq!(route.stations, vec![a, b, c]);
//! assert_eq!(route.distance, 14);
//! # Ok::<(), subway_transit::SubwayError>(())
//! ```

pub mod directory;
pub mod identifiers;
pub mod models;
pub mod routing;

// Re-exports for convenience
pub mod prelude {
    pub use crate::directory::StationDirectory;
    pub use crate::identifiers::{LineId, StationId};
    pub use crate::models::{Line, Result, Section, Sections, Station, SubwayError};
    pub use crate::routing::{NetworkGraph, RoutePlan};
}

pub use prelude::*;
