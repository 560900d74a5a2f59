//! The step tree: leaf body steps and composite repeat steps.

use std::fmt;

use crate::error::{Error, Result};
use crate::units::{Distance, LengthUnit, Pace, Time, TimeUnit};

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Sequential step id source for one generation pass.
///
/// Ids start at 0 and increase by one per constructed step. Each plan
/// generation owns a fresh counter.
#[derive(Debug, Default)]
pub struct StepIds {
    next: u32,
}

impl StepIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// What to add up over a step tree, and in which unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
    Distance(LengthUnit),
    Time(TimeUnit),
}

impl Total {
    /// Build from a `what` (`distance` or `time`) and a unit name.
    pub fn parse(what: &str, unit: &str) -> Result<Self> {
        match what {
            "distance" => unit
                .parse()
                .map(Self::Distance)
                .map_err(|_| Error::Argument(format!("{unit:?} is not a length unit"))),
            "time" => unit
                .parse()
                .map(Self::Time)
                .map_err(|_| Error::Argument(format!("{unit:?} is not a time unit"))),
            other => Err(Error::Argument(format!(
                "what must be \"distance\" or \"time\", got {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Body steps
// ---------------------------------------------------------------------------

/// How long a body step lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepDuration {
    Distance(Distance),
    Time(Time),
}

impl fmt::Display for StepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance(d) => fmt::Display::fmt(d, f),
            Self::Time(t) => fmt::Display::fmt(t, f),
        }
    }
}

/// A single run at one pace, for a fixed distance or a fixed time.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyStep {
    id: u32,
    name: String,
    pace: Pace,
    duration: StepDuration,
}

impl BodyStep {
    pub fn new(ids: &mut StepIds, name: impl Into<String>, pace: Pace, duration: StepDuration) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            pace,
            duration,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn duration(&self) -> StepDuration {
        self.duration
    }

    /// Distance or time of this step, projecting through the pace when the
    /// step is measured the other way.
    pub fn total(&self, what: Total) -> Result<f64> {
        match (what, self.duration) {
            (Total::Distance(unit), StepDuration::Distance(d)) => Ok(d.convert_to(unit)),
            (Total::Distance(unit), StepDuration::Time(t)) => self.pace.to_distance(&t, unit),
            (Total::Time(unit), StepDuration::Time(t)) => Ok(t.convert_to(unit)),
            (Total::Time(unit), StepDuration::Distance(d)) => Ok(self.pace.to_time(&d, unit)),
        }
    }
}

// ---------------------------------------------------------------------------
// Repeat steps
// ---------------------------------------------------------------------------

/// A group of steps run `count` times.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStep {
    id: u32,
    name: String,
    count: u32,
    steps: Vec<Step>,
}

impl RepeatStep {
    /// Create an empty group. The id is taken before any child's.
    pub fn new(ids: &mut StepIds, name: impl Into<String>, count: u32) -> Result<Self> {
        if count < 1 {
            return Err(Error::Argument(format!(
                "repeat count must be at least 1, got {count}"
            )));
        }
        Ok(Self {
            id: ids.next_id(),
            name: name.into(),
            count,
            steps: Vec::new(),
        })
    }

    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.steps = steps;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total(&self, what: Total) -> Result<f64> {
        Ok(f64::from(self.count) * sum_totals(&self.steps, what)?)
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A node of the step tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Body(BodyStep),
    Repeat(RepeatStep),
}

impl Step {
    pub fn id(&self) -> u32 {
        match self {
            Self::Body(b) => b.id(),
            Self::Repeat(r) => r.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Body(b) => b.name(),
            Self::Repeat(r) => r.name(),
        }
    }

    pub fn total(&self, what: Total) -> Result<f64> {
        match self {
            Self::Body(b) => b.total(what),
            Self::Repeat(r) => r.total(what),
        }
    }

    /// Pre-order visit of this step and its descendants with their depth.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Step, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Step, usize)) {
        visit(self, depth);
        if let Self::Repeat(r) = self {
            for child in &r.steps {
                child.walk_at(depth + 1, visit);
            }
        }
    }
}

impl From<BodyStep> for Step {
    fn from(step: BodyStep) -> Self {
        Self::Body(step)
    }
}

impl From<RepeatStep> for Step {
    fn from(step: RepeatStep) -> Self {
        Self::Repeat(step)
    }
}

/// Sum of `what` over a list of steps.
pub fn sum_totals(steps: &[Step], what: Total) -> Result<f64> {
    steps.iter().map(|s| s.total(what)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pace(text: &str) -> Pace {
        Pace::parse(text).unwrap()
    }

    fn by_distance(ids: &mut StepIds, name: &str, distance: &str, at: &str) -> Step {
        BodyStep::new(ids, name, pace(at), StepDuration::Distance(Distance::parse(distance).unwrap())).into()
    }

    fn by_time(ids: &mut StepIds, name: &str, time: &str, at: &str) -> Step {
        BodyStep::new(ids, name, pace(at), StepDuration::Time(Time::parse(time).unwrap())).into()
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut ids = StepIds::new();
        let a = by_time(&mut ids, "warm up", "0:15:00", "0:10:00 min per mile");
        let mut repeat = RepeatStep::new(&mut ids, "repeat X 2", 2).unwrap();
        repeat.add_step(by_distance(&mut ids, "fast", "400 m", "0:08:00 min per mile"));
        let b: Step = repeat.into();
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        let mut seen = Vec::new();
        b.walk(&mut |s, depth| seen.push((s.id(), depth)));
        assert_eq!(seen, vec![(1, 0), (2, 1)]);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn body_totals_project_through_pace() {
        let mut ids = StepIds::new();
        let step = by_time(&mut ids, "warm up", "0:15:00", "0:10:00 min per mile");
        assert_eq!(step.total(Total::Time(TimeUnit::Minute)).unwrap(), 15.0);
        let miles = step.total(Total::Distance(LengthUnit::Mile)).unwrap();
        assert!((miles - 1.5).abs() < 1e-12);

        let step = by_distance(&mut ids, "tempo", "2 mile", "0:07:30 min per mile");
        assert_eq!(step.total(Total::Time(TimeUnit::Minute)).unwrap(), 15.0);
        assert_eq!(step.total(Total::Distance(LengthUnit::Mile)).unwrap(), 2.0);
    }

    #[test]
    fn repeat_total_is_count_times_children() {
        let mut ids = StepIds::new();
        let mut inner = RepeatStep::new(&mut ids, "repeat X 2", 2).unwrap();
        inner.add_step(by_distance(&mut ids, "fast", "400 m", "0:08:00 min per mile"));
        inner.add_step(by_distance(&mut ids, "rest", "200 m", "0:10:00 min per mile"));
        let inner: Step = inner.into();

        let mut outer = RepeatStep::new(&mut ids, "repeat X 3", 3).unwrap();
        outer.add_step(inner.clone());
        outer.add_step(by_time(&mut ids, "jog", "0:01:30", "0:10:00 min per mile"));
        let outer: Step = outer.into();

        for what in [
            Total::Distance(LengthUnit::Meter),
            Total::Distance(LengthUnit::Mile),
            Total::Time(TimeUnit::Second),
            Total::Time(TimeUnit::Minute),
        ] {
            let Step::Repeat(r) = &outer else { unreachable!() };
            let children: f64 = r.steps().iter().map(|s| s.total(what).unwrap()).sum();
            let total = outer.total(what).unwrap();
            assert!((total - 3.0 * children).abs() < 1e-9, "{what:?}: {total}");
        }
        let meters = inner.total(Total::Distance(LengthUnit::Meter)).unwrap();
        assert!((meters - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let err = RepeatStep::new(&mut StepIds::new(), "repeat X 0", 0).unwrap_err();
        assert!(matches!(err, Error::Argument(_)), "got: {err}");
    }

    #[test]
    fn total_parse() {
        assert_eq!(Total::parse("distance", "km").unwrap(), Total::Distance(LengthUnit::Kilometer));
        assert_eq!(Total::parse("time", "minute").unwrap(), Total::Time(TimeUnit::Minute));
        for (what, unit) in [("lulu", "km"), ("distance", "minute"), ("time", "mile")] {
            let err = Total::parse(what, unit).unwrap_err();
            assert!(matches!(err, Error::Argument(_)), "{what} {unit}: {err}");
        }
    }
}
