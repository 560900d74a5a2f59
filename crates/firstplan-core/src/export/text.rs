//! Plain-text plan reports.
//!
//! `level` controls detail: 0 prints headers and workout dates, 1 adds race
//! and runner details and per-workout totals, 2 and above list every step.

use crate::error::Result;
use crate::plan::Plan;
use crate::race::{Race, Runner, Status};
use crate::step::{Step, Total};
use crate::units::{LengthUnit, TimeUnit};
use crate::workout::Workout;

/// Capitalized short day names for reports.
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Report settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextReport {
    pub level: usize,
    /// Unit for workout distance totals.
    pub unit: LengthUnit,
}

impl Default for TextReport {
    fn default() -> Self {
        Self {
            level: 0,
            unit: LengthUnit::Mile,
        }
    }
}

impl TextReport {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn plan(&self, plan: &Plan, indent: &str) -> Result<String> {
        let mut out = format!("{indent}Training Plan:\n{indent}Name - \"{}\"\n", plan.name);
        let days: Vec<&str> = plan
            .weekly_schedule
            .days()
            .iter()
            .map(|d| DAY_LABELS[usize::from(*d)])
            .collect();
        out.push_str(&format!("{indent}Workout days: {}\n", days.join(", ")));

        if let Some(race) = &plan.race {
            out.push_str(&self.race(race, indent));
        }
        if let Some(runner) = &plan.runner {
            out.push_str(&self.runner(runner, indent));
        }
        if !plan.workouts.is_empty() {
            out.push_str(indent);
            out.push_str("Workouts:\n");
            let nested = format!("{indent}  ");
            for workout in &plan.workouts {
                out.push_str(&self.workout(workout, &nested)?);
            }
            out.push_str(&format!("{indent}Total {} workouts\n", plan.workouts.len()));
        }
        Ok(out)
    }

    pub fn race(&self, race: &Race, indent: &str) -> String {
        let mut out = format!(
            "{indent}Race:\n{indent}  Name - \"{}\" of type {}\n",
            race.name, race.race_type
        );
        if self.level > 0 {
            out.push_str(&format!("{indent}  On {}\n", race.date));
            if let Some(target) = race.target_time {
                out.push_str(&format!("{indent}  Target time - {target}\n"));
            }
            out.push_str(&format!("{indent}  Status - {}\n", race.status));
            if let (Status::Done, Some(actual)) = (race.status, race.actual_time) {
                out.push_str(&format!("{indent}  Actual time - {actual}\n"));
            }
        }
        out
    }

    pub fn runner(&self, runner: &Runner, indent: &str) -> String {
        let mut out = format!("{indent}Runner:\n{indent}  Name - \"{}\"\n", runner.name);
        if self.level > 0 {
            if let Some(age) = runner.age {
                out.push_str(&format!("{indent}  Age - {age}\n"));
            }
            if let Some(gender) = &runner.gender {
                out.push_str(&format!("{indent}  Gender - {gender}\n"));
            }
            if let Some(email) = &runner.email {
                out.push_str(&format!("{indent}  Email - {email}\n"));
            }
        }
        out
    }

    pub fn workout(&self, workout: &Workout, indent: &str) -> Result<String> {
        let mut out = format!(
            "{indent}\"{}\"\n{indent}  {}\n{indent}  {}\n",
            workout.name,
            workout.date.format("%a %Y-%m-%d"),
            workout.status
        );
        if self.level > 0 {
            if self.level > 1 {
                let nested = format!("{indent}  ");
                for step in &workout.steps {
                    out.push_str(&step_details(step, &nested));
                }
            }
            let distance = workout.total(Total::Distance(self.unit))?;
            let minutes = workout.total(Total::Time(TimeUnit::Minute))?;
            out.push_str(&format!(
                "{indent}  Totals: distance = {distance:.2} {}   duration = {minutes:.2} minutes\n",
                unit_label(self.unit)
            ));
        }
        Ok(out)
    }
}

/// One step and, for repeats, its children one level deeper.
pub fn step_details(step: &Step, indent: &str) -> String {
    let mut out = format!("{indent}Step: \"{}\"\n", step.name());
    match step {
        Step::Body(body) => {
            out.push_str(&format!("{indent}  {}  at  {}\n", body.duration(), body.pace()));
        }
        Step::Repeat(repeat) => {
            let nested = format!("{indent}  ");
            for child in repeat.steps() {
                out.push_str(&step_details(child, &nested));
            }
        }
    }
    out
}

/// Plural label for totals.
pub(crate) fn unit_label(unit: LengthUnit) -> &'static str {
    match unit {
        LengthUnit::Mile => "miles",
        LengthUnit::Kilometer => "km",
        LengthUnit::Meter => "meters",
        LengthUnit::Foot => "feet",
    }
}
