//! JSON documents for plans and workouts.
//!
//! The document shapes are plain serde structs built from the domain types;
//! `unit` re-expresses step distances, paces, and distance totals.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::plan::Plan;
use crate::race::{Race, Runner};
use crate::step::{BodyStep, RepeatStep, Step, StepDuration, Total};
use crate::units::{Distance, LengthUnit, Pace, Time, TimeUnit};
use crate::workout::Workout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeJson {
    pub seconds: u64,
    pub time: String,
}

impl From<Time> for TimeJson {
    fn from(t: Time) -> Self {
        Self {
            seconds: t.total_seconds(),
            time: t.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceJson {
    pub distance: f64,
    pub unit: String,
}

impl DistanceJson {
    fn new(distance: &Distance, unit: Option<LengthUnit>) -> Self {
        let unit = unit.unwrap_or(distance.unit());
        Self {
            distance: distance.convert_to(unit),
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceJson {
    pub length_unit: String,
    pub pace: String,
    pub time: TimeJson,
}

impl PaceJson {
    fn new(pace: &Pace, unit: Option<LengthUnit>) -> Result<Self> {
        let pace = match unit {
            Some(unit) => pace.convert_to(unit)?,
            None => *pace,
        };
        Ok(Self {
            length_unit: pace.unit().to_string(),
            pace: pace.to_string(),
            time: pace.time().into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepJson {
    Body {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        time: Option<TimeJson>,
        #[serde(skip_serializing_if = "Option::is_none")]
        distance: Option<DistanceJson>,
        pace: PaceJson,
    },
    Repeat {
        name: String,
        repeat: u32,
        steps: Vec<StepJson>,
    },
}

impl StepJson {
    pub fn new(step: &Step, unit: Option<LengthUnit>) -> Result<Self> {
        match step {
            Step::Body(body) => Self::body(body, unit),
            Step::Repeat(repeat) => Self::repeat(repeat, unit),
        }
    }

    fn body(body: &BodyStep, unit: Option<LengthUnit>) -> Result<Self> {
        let (time, distance) = match body.duration() {
            StepDuration::Time(t) => (Some(t.into()), None),
            StepDuration::Distance(d) => (None, Some(DistanceJson::new(&d, unit))),
        };
        Ok(Self::Body {
            name: body.name().to_owned(),
            time,
            distance,
            pace: PaceJson::new(&body.pace(), unit)?,
        })
    }

    fn repeat(repeat: &RepeatStep, unit: Option<LengthUnit>) -> Result<Self> {
        Ok(Self::Repeat {
            name: repeat.name().to_owned(),
            repeat: repeat.count(),
            steps: repeat
                .steps()
                .iter()
                .map(|s| Self::new(s, unit))
                .collect::<Result<_>>()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalTimeJson {
    pub time: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutJson {
    pub name: String,
    pub note: Option<String>,
    pub status: String,
    pub date: String,
    pub steps: Vec<StepJson>,
    pub total_distance: DistanceJson,
    pub total_time: TotalTimeJson,
}

impl WorkoutJson {
    /// Totals are in `unit`, miles when absent, and minutes.
    pub fn new(workout: &Workout, unit: Option<LengthUnit>) -> Result<Self> {
        let total_unit = unit.unwrap_or(LengthUnit::Mile);
        Ok(Self {
            name: workout.name.clone(),
            note: workout.note.clone(),
            status: workout.status.to_string(),
            date: workout.date.to_string(),
            steps: workout
                .steps
                .iter()
                .map(|s| StepJson::new(s, unit))
                .collect::<Result<_>>()?,
            total_distance: DistanceJson {
                distance: workout.total(Total::Distance(total_unit))?,
                unit: total_unit.to_string(),
            },
            total_time: TotalTimeJson {
                time: workout.total(Total::Time(TimeUnit::Minute))?,
                unit: TimeUnit::Minute.to_string(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceJson {
    pub name: String,
    pub race_type: String,
    pub distance: DistanceJson,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_time: Option<TimeJson>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<TimeJson>,
}

impl From<&Race> for RaceJson {
    fn from(race: &Race) -> Self {
        Self {
            name: race.name.clone(),
            race_type: race.race_type.name.clone(),
            distance: DistanceJson::new(&race.race_type.distance, None),
            date: race.date.to_string(),
            target_time: race.target_time.map(Into::into),
            status: race.status.to_string(),
            actual_time: race.actual_time.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub length_unit: String,
}

impl From<&Runner> for RunnerJson {
    fn from(runner: &Runner) -> Self {
        Self {
            name: runner.name.clone(),
            age: runner.age,
            gender: runner.gender.clone(),
            email: runner.email.clone(),
            length_unit: runner.length_unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanJson {
    pub name: String,
    pub weekly_schedule: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race: Option<RaceJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner: Option<RunnerJson>,
    pub workouts: Vec<WorkoutJson>,
}

impl PlanJson {
    pub fn new(plan: &Plan, unit: Option<LengthUnit>) -> Result<Self> {
        Ok(Self {
            name: plan.name.clone(),
            weekly_schedule: plan.weekly_schedule.names().map(str::to_owned).to_vec(),
            race: plan.race.as_ref().map(RaceJson::from),
            runner: plan.runner.as_ref().map(RunnerJson::from),
            workouts: plan
                .workouts
                .iter()
                .map(|w| WorkoutJson::new(w, unit))
                .collect::<Result<_>>()?,
        })
    }
}

/// Pretty-printed plan document.
pub fn plan_document(plan: &Plan, unit: Option<LengthUnit>) -> Result<String> {
    let doc = PlanJson::new(plan, unit)?;
    serde_json::to_string_pretty(&doc)
        .map_err(|e| Error::Argument(format!("cannot encode plan {:?} as JSON: {e}", plan.name)))
}
