//! FIRST running plan generation.
//!
//! A [`data::PaceDatabase`] maps a race target time to a row of training
//! paces. Instruction lines such as `"1 1 warmup#8x(400m#400 m@RI)cooldown"`
//! are parsed against that row into [`step::Step`] trees, and a
//! [`plan::Plan`] lays the resulting workouts out on the calendar before race
//! day. [`export`] renders plans as text, TCX, JSON, or HTML.

pub mod data;
pub mod error;
pub mod export;
pub mod instruction;
pub mod plan;
pub mod race;
pub mod step;
pub mod units;
pub mod workout;

pub use error::{Error, Result};
