//! A dated workout: a named list of steps.

use chrono::NaiveDate;

use crate::error::Result;
use crate::race::Status;
use crate::step::{Step, Total, sum_totals};

/// One scheduled key-run.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub name: String,
    pub date: NaiveDate,
    pub status: Status,
    pub note: Option<String>,
    pub steps: Vec<Step>,
}

impl Workout {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            status: Status::Scheduled,
            note: None,
            steps: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn add_step(&mut self, step: impl Into<Step>) {
        self.steps.push(step.into());
    }

    /// Sum of `what` over the top-level steps.
    pub fn total(&self, what: Total) -> Result<f64> {
        sum_totals(&self.steps, what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{BodyStep, RepeatStep, StepDuration, StepIds};
    use crate::units::{Distance, LengthUnit, Pace, Time, TimeUnit};

    #[test]
    fn totals_cover_all_steps() {
        let mut ids = StepIds::new();
        let easy = Pace::parse("0:10:00 min per mile").unwrap();
        let fast = Pace::parse("0:08:00 min per mile").unwrap();
        let lap = Distance::parse("400 m").unwrap();

        let mut wo = Workout::new("Week 1 Keyrun 1", NaiveDate::from_ymd_opt(2017, 6, 24).unwrap());
        wo.add_step(BodyStep::new(&mut ids, "warm up", easy, StepDuration::Time(Time::new(0, 15, 0))));
        let mut repeat = RepeatStep::new(&mut ids, "repeat X 8", 8).unwrap();
        repeat.add_step(BodyStep::new(&mut ids, "fast", fast, StepDuration::Distance(lap)).into());
        repeat.add_step(BodyStep::new(&mut ids, "rest", easy, StepDuration::Distance(lap)).into());
        wo.add_step(repeat);
        wo.add_step(BodyStep::new(&mut ids, "cool down", easy, StepDuration::Time(Time::new(0, 10, 0))));

        assert_eq!(wo.status, Status::Scheduled);
        let miles = wo.total(Total::Distance(LengthUnit::Mile)).unwrap();
        // 1.5 + 8 * 0.497 + 1.0
        assert!((miles - 6.47680).abs() < 1e-4, "{miles}");
        // 15 + 8 * (119 + 149) / 60 + 10
        let minutes = wo.total(Total::Time(TimeUnit::Minute)).unwrap();
        assert!((minutes - 60.7333).abs() < 1e-4, "{minutes}");
    }

    #[test]
    fn empty_workout_totals_zero() {
        let wo = Workout::new("rest day", NaiveDate::from_ymd_opt(2017, 6, 25).unwrap()).with_note("off");
        assert_eq!(wo.total(Total::Distance(LengthUnit::Mile)).unwrap(), 0.0);
        assert_eq!(wo.note.as_deref(), Some("off"));
    }
}
