use std::fmt;

use firstplan_db::models::{DistanceRecord, SegmentKind, SegmentRecord};

use crate::error::{Error, Result};
use crate::units::{Distance, LengthUnit, Pace, Time};

/// A named column of the pace table.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Fixed distance; the pace comes from the segment's own column.
    Distance { name: String, distance: Distance },
    /// Fixed duration run at the pace of another segment.
    Time {
        name: String,
        duration: Time,
        ref_pace_name: String,
    },
    /// A pure pace reference with no magnitude of its own.
    Pace {
        name: String,
        ref_pace_name: Option<String>,
    },
}

impl Segment {
    pub fn name(&self) -> &str {
        match self {
            Self::Distance { name, .. } | Self::Time { name, .. } | Self::Pace { name, .. } => name,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Distance { .. } => SegmentKind::Distance,
            Self::Time { .. } => SegmentKind::Time,
            Self::Pace { .. } => SegmentKind::Pace,
        }
    }

    /// Name of the segment whose pace column this segment runs at.
    pub fn pace_column_name(&self) -> &str {
        match self {
            Self::Distance { name, .. } => name,
            Self::Time { ref_pace_name, .. } => ref_pace_name,
            Self::Pace {
                name,
                ref_pace_name,
            } => ref_pace_name.as_deref().unwrap_or(name),
        }
    }

    /// The pace implied by one pace-table cell for this segment.
    ///
    /// DISTANCE cells hold the time for the whole segment, PACE cells a time
    /// per `pace_unit`. TIME segments have no column.
    pub(crate) fn pace_from_cell(&self, cell: Time, pace_unit: LengthUnit) -> Result<Pace> {
        match self {
            Self::Distance { distance, .. } => {
                Pace::from_time_distance(&cell, distance, Some(pace_unit))
            }
            Self::Pace { .. } => Ok(Pace::from_time(cell, pace_unit)),
            Self::Time { name, .. } => Err(Error::syntax(
                name,
                "duration segment has its own reference pace",
            )),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance { name, distance } => write!(f, "{name}  distance  {distance}"),
            Self::Time {
                name,
                duration,
                ref_pace_name,
            } => write!(f, "{name}  time  {duration}  {ref_pace_name}"),
            Self::Pace {
                name,
                ref_pace_name: Some(reference),
            } => write!(f, "{name}  pace  {reference}"),
            Self::Pace { name, .. } => write!(f, "{name}  pace"),
        }
    }
}

pub(crate) fn distance_from_record(record: &DistanceRecord) -> Result<Distance> {
    Distance::new(record.value, record.unit.parse()?)
}

impl TryFrom<&SegmentRecord> for Segment {
    type Error = Error;

    fn try_from(record: &SegmentRecord) -> Result<Self> {
        let name = record.name.clone();
        match record.kind {
            SegmentKind::Distance => {
                let distance = record.distance.as_ref().ok_or_else(|| {
                    Error::format("segment", &record.name, "DISTANCE segment needs a distance")
                })?;
                Ok(Self::Distance {
                    name,
                    distance: distance_from_record(distance)?,
                })
            }
            SegmentKind::Time => {
                let duration = record.duration.as_deref().ok_or_else(|| {
                    Error::format("segment", &record.name, "TIME segment needs a duration")
                })?;
                let ref_pace_name = record.ref_pace_name.clone().ok_or_else(|| {
                    Error::format("segment", &record.name, "TIME segment needs a reference pace")
                })?;
                Ok(Self::Time {
                    name,
                    duration: Time::parse(duration)?,
                    ref_pace_name,
                })
            }
            SegmentKind::Pace => Ok(Self::Pace {
                name,
                ref_pace_name: record.ref_pace_name.clone(),
            }),
        }
    }
}
