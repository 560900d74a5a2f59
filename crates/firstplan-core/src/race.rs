//! Races, race types, and the runner profile.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::units::{Distance, LengthUnit, Pace, Time};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Progress of a race or workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Scheduled,
    Done,
    Skipped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::Done => "done",
            Self::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "done" => Ok(Self::Done),
            "skipped" => Ok(Self::Skipped),
            other => Err(Error::Argument(format!(
                "unknown status {other:?} (expected scheduled, done, or skipped)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Race types and races
// ---------------------------------------------------------------------------

/// A race category with its canonical distance, e.g. `Marathon - 42.195 km`.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceType {
    pub name: String,
    pub distance: Distance,
}

impl RaceType {
    pub fn new(name: impl Into<String>, distance: Distance) -> Self {
        Self {
            name: name.into(),
            distance,
        }
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.distance)
    }
}

/// A concrete race the plan builds toward.
#[derive(Debug, Clone, PartialEq)]
pub struct Race {
    pub race_type: RaceType,
    pub name: String,
    pub date: NaiveDate,
    pub target_time: Option<Time>,
    pub status: Status,
    pub actual_time: Option<Time>,
}

impl Race {
    pub fn new(race_type: RaceType, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            race_type,
            name: name.into(),
            date,
            target_time: None,
            status: Status::Scheduled,
            actual_time: None,
        }
    }

    pub fn with_target_time(mut self, target: Time) -> Self {
        self.target_time = Some(target);
        self
    }

    /// Record the finishing time; marks the race done.
    pub fn finish(&mut self, actual: Time) {
        self.actual_time = Some(actual);
        self.status = Status::Done;
    }

    /// Pace needed to run the race distance in the target time.
    pub fn race_pace(&self) -> Result<Pace> {
        let target = self.target_time.ok_or_else(|| {
            Error::Argument(format!("race {:?} has no target time", self.name))
        })?;
        Pace::from_time_distance(&target, &self.race_type.distance, None)
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// The athlete a plan is written for. Identity fields are stored as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Runner {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub email: Option<String>,
    /// Preferred unit for reports.
    pub length_unit: LengthUnit,
}

impl Runner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            gender: None,
            email: None,
            length_unit: LengthUnit::Mile,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marathon() -> RaceType {
        RaceType::new("Marathon", Distance::parse("42.195 km").unwrap())
    }

    #[test]
    fn status_roundtrip() {
        for status in [Status::Scheduled, Status::Done, Status::Skipped] {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
        let err = "lulu".parse::<Status>().unwrap_err();
        assert!(matches!(err, Error::Argument(_)), "got: {err}");
    }

    #[test]
    fn race_type_display() {
        assert_eq!(marathon().to_string(), "Marathon - 42.195 km");
    }

    #[test]
    fn race_pace_from_target_time() {
        let race = Race::new(marathon(), "SFM", NaiveDate::from_ymd_opt(2017, 7, 23).unwrap())
            .with_target_time(Time::new(3, 0, 0));
        // 10800 s / 42.195 km = 255.95 s per km.
        assert_eq!(race.race_pace().unwrap().to_string(), "0:04:16 min per km");
    }

    #[test]
    fn race_pace_requires_target() {
        let race = Race::new(marathon(), "SFM", NaiveDate::from_ymd_opt(2017, 7, 23).unwrap());
        let err = race.race_pace().unwrap_err();
        assert!(matches!(err, Error::Argument(_)), "got: {err}");
    }

    #[test]
    fn finishing_marks_done() {
        let mut race = Race::new(marathon(), "SFM", NaiveDate::from_ymd_opt(2017, 7, 23).unwrap());
        assert_eq!(race.status, Status::Scheduled);
        race.finish(Time::new(3, 55, 2));
        assert_eq!(race.status, Status::Done);
        assert_eq!(race.actual_time, Some(Time::new(3, 55, 2)));
    }

    #[test]
    fn runner_defaults_to_miles() {
        let runner = Runner::new("DBD").with_age(56).with_gender("m");
        assert_eq!(runner.length_unit, LengthUnit::Mile);
        assert_eq!(runner.age, Some(56));
        assert!(runner.email.is_none());
    }
}
