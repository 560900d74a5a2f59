//! Serde types for the pace database file.
//!
//! These map directly to the JSON/TOML on-disk format. Values stay in their
//! textual form (`"0:20:13"`, `"min per mile"`); the core crate validates and
//! converts them into typed quantities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level structure of a pace database file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseFile {
    /// Human-readable database name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Race types, in the column order of `race_times`.
    pub race_types: Vec<RaceTypeRecord>,
    /// Equivalent-time table: one row per level, one `H:MM:SS` per race type.
    pub race_times: Vec<Vec<String>>,
    /// Named workout segments, in the column order of `pace_lines`.
    pub segments: Vec<SegmentRecord>,
    /// Race type whose times index the pace table.
    pub reference_race: String,
    /// Pace unit string, e.g. `"min per mile"`.
    pub pace_unit: String,
    /// Pace table lines: `"<H:MM:SS> <MM:SS> <MM:SS> ..."`.
    pub pace_lines: Vec<String>,
    /// Instruction sets, one per race type.
    #[serde(default)]
    pub plan_instructions: Vec<PlanInstructionsRecord>,
}

/// A distance value as stored in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceRecord {
    pub value: f64,
    pub unit: String,
}

/// A race type (e.g. `Marathon`, `42.195 km`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceTypeRecord {
    pub name: String,
    pub distance: DistanceRecord,
}

// ---------------------------------------------------------------------------

/// Kind of a segment definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SegmentKind {
    Distance,
    Time,
    Pace,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Distance => "DISTANCE",
            Self::Time => "TIME",
            Self::Pace => "PACE",
        };
        f.write_str(s)
    }
}

impl FromStr for SegmentKind {
    type Err = SegmentKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISTANCE" => Ok(Self::Distance),
            "TIME" => Ok(Self::Time),
            "PACE" => Ok(Self::Pace),
            other => Err(SegmentKindParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`SegmentKind`] string.
#[derive(Debug, Clone)]
pub struct SegmentKindParseError(pub String);

impl fmt::Display for SegmentKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid segment kind: {:?}", self.0)
    }
}

impl std::error::Error for SegmentKindParseError {}

/// A segment definition.
///
/// `distance` is read for `DISTANCE` segments, `duration` and
/// `ref_pace_name` for `TIME` segments, `ref_pace_name` optionally for
/// `PACE` segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<DistanceRecord>,
    /// `H:MM:SS` duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_pace_name: Option<String>,
}

/// Ordered workout instructions for one race type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanInstructionsRecord {
    pub name: String,
    pub race_name: String,
    pub instructions: Vec<String>,
}
