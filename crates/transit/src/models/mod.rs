//! Subway network models: stations, sections, lines.

pub mod line;
pub mod sections;
pub mod types;

// Re-exports for convenience
pub use line::Line;
pub use sections::Sections;
pub use types::{Result, Section, Station, SubwayError};
