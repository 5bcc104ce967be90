//! Domain types for the metro route finder.
//!
//! These are the validated value types shared by the network model and the
//! planner. Each type enforces its invariants at construction time.

mod crowd;
mod line;
mod location;
mod schedule;
mod station;

pub use crowd::{CrowdLevel, InvalidCrowdLevel};
pub use line::Line;
pub use location::Location;
pub use schedule::{OperatingHours, TimeError, parse_hhmm};
pub use station::StationName;
