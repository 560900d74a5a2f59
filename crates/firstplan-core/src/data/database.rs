use std::collections::HashMap;

use firstplan_db::models::{DatabaseFile, PlanInstructionsRecord};
use tracing::debug;

use crate::data::segment::{Segment, distance_from_record};
use crate::error::{Error, Result};
use crate::race::RaceType;
use crate::units::{LengthUnit, Pace, Time};

/// Faster than the fastest tabulated time by more than this is out of range.
const LOWER_GUARD_SECONDS: i64 = 10 * 60;

/// One row of the pace table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaceRow {
    /// Target time for the reference race.
    pub reference_time: Time,
    /// One pace per segment, in segment order. TIME segments have no column,
    /// so the row may be shorter than the segment list.
    pub paces: Vec<Pace>,
}

impl PaceRow {
    /// Parse `"<H:MM:SS> <MM:SS> <MM:SS> ..."` against the segment list.
    pub fn parse(line: &str, segments: &[Segment], pace_unit: LengthUnit) -> Result<Self> {
        let mut values = line.split_whitespace();
        let first = values
            .next()
            .ok_or_else(|| Error::syntax(line, "empty pace line"))?;
        let reference_time = Time::parse(first)?;

        let mut paces = Vec::new();
        for (index, value) in values.enumerate() {
            let segment = segments.get(index).ok_or_else(|| {
                Error::syntax(line, format!("more pace columns than the {} segments", segments.len()))
            })?;
            if let Segment::Time { name, .. } = segment {
                return Err(Error::syntax(
                    line,
                    format!(
                        "column {} belongs to duration segment {name:?}, which has its own reference pace",
                        index + 1
                    ),
                ));
            }
            let cell = Time::parse(&format!("0:{value}"))?;
            paces.push(segment.pace_from_cell(cell, pace_unit)?);
        }
        Ok(Self {
            reference_time,
            paces,
        })
    }
}

/// An ordered list of workout instructions for one race type.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInstructionSet {
    pub name: String,
    pub race_name: String,
    /// `"<week> <keyrun> <instruction>"` lines.
    pub instructions: Vec<String>,
}

impl From<&PlanInstructionsRecord> for PlanInstructionSet {
    fn from(record: &PlanInstructionsRecord) -> Self {
        Self {
            name: record.name.clone(),
            race_name: record.race_name.clone(),
            instructions: record.instructions.clone(),
        }
    }
}

/// Read-only view of a FIRST pace database.
///
/// Built from a [`DatabaseFile`]; every time, distance, and pace is
/// validated on construction so lookups only fail on bad queries.
#[derive(Debug, Clone)]
pub struct PaceDatabase {
    name: String,
    note: Option<String>,
    race_types: Vec<RaceType>,
    race_times: Vec<Vec<Time>>,
    segments: Vec<Segment>,
    segment_lookup: HashMap<String, usize>,
    reference_race: String,
    pace_unit: String,
    pace_length_unit: LengthUnit,
    pace_rows: Vec<PaceRow>,
    plan_instructions: Vec<PlanInstructionSet>,
}

impl PaceDatabase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn race_types(&self) -> &[RaceType] {
        &self.race_types
    }

    pub fn race_times(&self) -> &[Vec<Time>] {
        &self.race_times
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn reference_race(&self) -> &str {
        &self.reference_race
    }

    /// Pace unit text, e.g. `"min per mile"`.
    pub fn pace_unit(&self) -> &str {
        &self.pace_unit
    }

    /// Unit the pace table is expressed per.
    pub fn pace_length_unit(&self) -> LengthUnit {
        self.pace_length_unit
    }

    pub fn pace_rows(&self) -> &[PaceRow] {
        &self.pace_rows
    }

    pub fn plan_instruction_sets(&self) -> &[PlanInstructionSet] {
        &self.plan_instructions
    }

    // -- race types ---------------------------------------------------------

    pub fn race_type_index(&self, name: &str) -> Result<usize> {
        self.race_types
            .iter()
            .position(|rt| rt.name == name)
            .ok_or_else(|| Error::not_found("race type", name))
    }

    pub fn race_type(&self, name: &str) -> Result<&RaceType> {
        Ok(&self.race_types[self.race_type_index(name)?])
    }

    /// Equivalent finishing time in another race type.
    ///
    /// Returns the `to_index` column of the first row whose `from_index`
    /// column is at or above `time_from`. Times more than ten minutes faster
    /// than the first row, or slower than the last row, are out of range.
    pub fn equivalent_time(&self, time_from: &Time, from_index: usize, to_index: usize) -> Result<Time> {
        let num_races = self.race_types.len();
        for index in [from_index, to_index] {
            if index >= num_races {
                return Err(Error::Range(format!(
                    "race index must be between 0 and {}, got {index}",
                    num_races.saturating_sub(1)
                )));
            }
        }

        let first = self
            .race_times
            .first()
            .ok_or_else(|| Error::Range("equivalent time table is empty".into()))?;
        let lower_guard = first[from_index]
            .offset(-LOWER_GUARD_SECONDS)
            .unwrap_or_default();
        if *time_from < lower_guard {
            return Err(Error::Range(format!(
                "{time_from} is faster than the fastest tabulated time"
            )));
        }

        let found = self
            .race_times
            .iter()
            .find(|row| *time_from <= row[from_index])
            .map(|row| row[to_index])
            .ok_or_else(|| {
                Error::Range(format!("{time_from} is slower than the slowest tabulated time"))
            })?;
        debug!(%time_from, from_index, to_index, equivalent = %found, "equivalent time");
        Ok(found)
    }

    /// Equivalent time between race types given by name.
    pub fn equivalent_time_by_name(&self, time_from: &Time, from: &str, to: &str) -> Result<Time> {
        self.equivalent_time(time_from, self.race_type_index(from)?, self.race_type_index(to)?)
    }

    /// Index of the pace row for a target time in `race_name`.
    pub fn pace_row_index_for_target_time(&self, time: &Time, race_name: &str) -> Result<usize> {
        let reference_time = self.equivalent_time_by_name(time, race_name, &self.reference_race)?;
        let index = self
            .pace_rows
            .iter()
            .position(|row| row.reference_time >= reference_time)
            .ok_or_else(|| Error::not_found("pace row for reference time", &reference_time.to_string()))?;
        debug!(%time, race_name, %reference_time, index, "pace row selected");
        Ok(index)
    }

    // -- segments -----------------------------------------------------------

    pub fn segment_index(&self, name: &str) -> Result<usize> {
        self.segment_lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found("segment", name))
    }

    pub fn segment_by_name(&self, name: &str) -> Result<&Segment> {
        Ok(&self.segments[self.segment_index(name)?])
    }

    /// Pace of segment `name` in pace row `row`, following its reference
    /// pace name when it has one.
    pub fn segment_pace(&self, row: usize, name: &str) -> Result<Pace> {
        let column_name = self.segment_by_name(name)?.pace_column_name();
        let column = self.segment_index(column_name)?;
        let pace_row = self.pace_rows.get(row).ok_or_else(|| {
            Error::Range(format!(
                "pace row must be between 0 and {}, got {row}",
                self.pace_rows.len().saturating_sub(1)
            ))
        })?;
        pace_row
            .paces
            .get(column)
            .copied()
            .ok_or_else(|| Error::not_found("pace column", column_name))
    }

    // -- instructions -------------------------------------------------------

    /// The instruction set written for `race_name`.
    pub fn plan_instructions(&self, race_name: &str) -> Result<&PlanInstructionSet> {
        self.plan_instructions
            .iter()
            .find(|p| p.race_name == race_name)
            .ok_or_else(|| Error::not_found("plan instructions for race type", race_name))
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl TryFrom<&DatabaseFile> for PaceDatabase {
    type Error = Error;

    fn try_from(file: &DatabaseFile) -> Result<Self> {
        let race_types = file
            .race_types
            .iter()
            .map(|r| Ok(RaceType::new(r.name.clone(), distance_from_record(&r.distance)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut race_times: Vec<Vec<Time>> = Vec::with_capacity(file.race_times.len());
        for row in &file.race_times {
            if row.len() != race_types.len() {
                return Err(Error::syntax(
                    &row.join(" "),
                    format!("expected {} times, one per race type", race_types.len()),
                ));
            }
            let times = row.iter().map(|t| Time::parse(t)).collect::<Result<Vec<_>>>()?;
            if let Some(previous) = race_times.last() {
                if times.iter().zip(previous).any(|(t, p)| t < p) {
                    return Err(Error::Range(format!(
                        "equivalent time rows must be ascending; {} follows a slower row",
                        row.join(" ")
                    )));
                }
            }
            race_times.push(times);
        }

        let segments = file
            .segments
            .iter()
            .map(Segment::try_from)
            .collect::<Result<Vec<_>>>()?;
        let mut segment_lookup = HashMap::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            if segment_lookup.insert(segment.name().to_owned(), index).is_some() {
                return Err(Error::Argument(format!(
                    "segment {:?} is defined twice",
                    segment.name()
                )));
            }
        }
        for segment in &segments {
            let column = segment.pace_column_name();
            if !segment_lookup.contains_key(column) {
                return Err(Error::not_found("reference pace segment", column));
            }
        }

        if !race_types.iter().any(|rt| rt.name == file.reference_race) {
            return Err(Error::not_found("reference race", &file.reference_race));
        }

        let pace_length_unit: LengthUnit = file
            .pace_unit
            .split_whitespace()
            .last()
            .ok_or_else(|| Error::format("pace unit", &file.pace_unit, "empty"))?
            .parse()?;

        let mut pace_rows: Vec<PaceRow> = Vec::with_capacity(file.pace_lines.len());
        for line in &file.pace_lines {
            let row = PaceRow::parse(line, &segments, pace_length_unit)?;
            if let Some(previous) = pace_rows.last() {
                if row.reference_time < previous.reference_time {
                    return Err(Error::Range(format!(
                        "pace rows must be ascending; {} follows {}",
                        row.reference_time, previous.reference_time
                    )));
                }
            }
            pace_rows.push(row);
        }

        let plan_instructions = file
            .plan_instructions
            .iter()
            .map(PlanInstructionSet::from)
            .collect();

        debug!(
            name = %file.name,
            race_types = race_types.len(),
            segments = segments.len(),
            pace_rows = pace_rows.len(),
            "pace database validated"
        );

        Ok(Self {
            name: file.name.clone(),
            note: file.note.clone(),
            race_types,
            race_times,
            segments,
            segment_lookup,
            reference_race: file.reference_race.clone(),
            pace_unit: file.pace_unit.clone(),
            pace_length_unit,
            pace_rows,
            plan_instructions,
        })
    }
}

impl TryFrom<DatabaseFile> for PaceDatabase {
    type Error = Error;

    fn try_from(file: DatabaseFile) -> Result<Self> {
        Self::try_from(&file)
    }
}
