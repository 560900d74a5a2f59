//! Training plans: weekly key-run days, the target race, and the generated
//! workouts.

mod schedule;

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::error::{Error, Result};
use crate::race::{Race, Runner};
use crate::units::Time;
use crate::workout::Workout;

pub use schedule::{KEYRUNS_PER_WEEK, first_week_dates};

/// Short day names, Monday first.
pub const DAY_NAMES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

// ---------------------------------------------------------------------------
// WeeklySchedule
// ---------------------------------------------------------------------------

/// The three weekdays key-runs fall on, `0` = Monday through `6` = Sunday,
/// strictly ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule([u8; 3]);

impl WeeklySchedule {
    pub fn new(days: [u8; 3]) -> Result<Self> {
        let [d0, d1, d2] = days;
        if d1 <= d0 || d2 <= d1 {
            return Err(Error::Argument(format!(
                "weekly schedule days must be distinct and ascending, got {days:?}"
            )));
        }
        if d2 > 6 {
            return Err(Error::Argument(format!(
                "weekly schedule days must be between 0 (Mon) and 6 (Sun), got {days:?}"
            )));
        }
        Ok(Self(days))
    }

    /// Build from a slice that must hold exactly three days.
    pub fn from_days(days: &[u8]) -> Result<Self> {
        let days: [u8; 3] = days.try_into().map_err(|_| {
            Error::Argument(format!("weekly schedule needs 3 days, got {}", days.len()))
        })?;
        Self::new(days)
    }

    pub fn days(&self) -> [u8; 3] {
        self.0
    }

    pub fn weekdays(&self) -> [Weekday; 3] {
        self.0.map(weekday)
    }

    /// Short lowercase names, e.g. `["mon", "wed", "sat"]`.
    pub fn names(&self) -> [&'static str; 3] {
        self.0.map(|d| DAY_NAMES[usize::from(d)])
    }
}

fn weekday(day: u8) -> Weekday {
    match day {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(" "))
    }
}

/// Parses three day names in any order and case, e.g. `"mon wed sat"`.
impl FromStr for WeeklySchedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut days = s
            .split_whitespace()
            .map(|name| {
                let lower = name.to_ascii_lowercase();
                DAY_NAMES
                    .iter()
                    .position(|d| *d == lower)
                    .map(|d| d as u8)
                    .ok_or_else(|| {
                        Error::Argument(format!(
                            "unknown day {name:?} (expected one of {})",
                            DAY_NAMES.join(", ")
                        ))
                    })
            })
            .collect::<Result<Vec<u8>>>()?;
        days.sort_unstable();
        Self::from_days(&days)
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// A training plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub name: String,
    pub weekly_schedule: WeeklySchedule,
    pub race: Option<Race>,
    pub runner: Option<Runner>,
    pub workouts: Vec<Workout>,
}

impl Plan {
    pub fn new(name: impl Into<String>, weekly_schedule: WeeklySchedule) -> Self {
        Self {
            name: name.into(),
            weekly_schedule,
            race: None,
            runner: None,
            workouts: Vec::new(),
        }
    }

    pub fn with_race(mut self, race: Race) -> Self {
        self.race = Some(race);
        self
    }

    pub fn with_runner(mut self, runner: Runner) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn add_workout(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// The race and its target time, which generation requires.
    pub fn can_generate_workouts(&self) -> Result<(&Race, Time)> {
        let race = self
            .race
            .as_ref()
            .ok_or_else(|| Error::Argument("a race is required to generate workouts".into()))?;
        let target = race.target_time.ok_or_else(|| {
            Error::Argument("a race target time is required to generate workouts".into())
        })?;
        Ok((race, target))
    }
}
