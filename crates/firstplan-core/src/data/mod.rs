//! The pace database view: race types, equivalent times, segments, and the
//! pace table.

mod database;
mod segment;

pub use database::{PaceDatabase, PaceRow, PlanInstructionSet};
pub use segment::Segment;
