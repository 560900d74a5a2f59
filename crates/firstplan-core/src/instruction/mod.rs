//! The workout instruction language.
//!
//! An instruction is a `#`-separated list of steps. A step is either a
//! segment name from the pace database (`warmup`, `400m`) or a distance at a
//! pace reference (`400 m@RI`, `4 mile@RP+15`). A parenthesised group
//! preceded by an `<N>x` token repeats its contents:
//!
//! ```text
//! warmup#3x(1600m#200 m@RI)cooldown
//! warmup#2x(2x(400m#200 m@RI)800m#400 m@RI)cooldown
//! ```

mod token;

use chrono::NaiveDate;

use crate::data::{PaceDatabase, Segment};
use crate::error::{Error, Result};
use crate::step::{BodyStep, RepeatStep, Step, StepDuration, StepIds};
use crate::units::{Distance, Pace};
use crate::workout::Workout;

pub use token::{RACE_PACE, STEP_SEPARATOR};
use token::{StepToken, split_run};

/// Everything needed to turn instructions into steps for one plan: the
/// database, the selected pace row, the race pace, and the step id counter.
#[derive(Debug)]
pub struct ParseContext<'a> {
    db: &'a PaceDatabase,
    row: usize,
    race_pace: Pace,
    ids: StepIds,
}

impl<'a> ParseContext<'a> {
    /// A context with a fresh id counter.
    pub fn new(db: &'a PaceDatabase, row: usize, race_pace: Pace) -> Self {
        Self {
            db,
            row,
            race_pace,
            ids: StepIds::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn race_pace(&self) -> Pace {
        self.race_pace
    }

    pub fn ids(&self) -> &StepIds {
        &self.ids
    }

    /// Build a workout from `"<week> <keyrun> <instruction>"`.
    ///
    /// The workout is named `Week <week> Keyrun <keyrun>` and keeps the
    /// instruction as its note.
    pub fn parse_workout_line(&mut self, line: &str, date: NaiveDate) -> Result<Workout> {
        let mut fields = line.splitn(3, ' ');
        let (Some(week), Some(keyrun), Some(instruction)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::syntax(line, "expected '<week> <keyrun> <instruction>'"));
        };
        let mut workout =
            Workout::new(format!("Week {week} Keyrun {keyrun}"), date).with_note(instruction);
        workout.steps = self.parse_steps(instruction)?;
        Ok(workout)
    }

    /// Parse one instruction into top-level steps.
    pub fn parse_steps(&mut self, instruction: &str) -> Result<Vec<Step>> {
        let (steps, rest, _) = self.parse_sequence(instruction, instruction, 0)?;
        if !rest.is_empty() {
            return Err(Error::syntax(instruction, format!("unparsed input {rest:?}")));
        }
        Ok(steps)
    }

    /// Parse until end of input or the `)` closing the current group.
    ///
    /// Returns the steps, the input after the closing `)`, and whether a `)`
    /// was consumed.
    fn parse_sequence<'s>(
        &mut self,
        source: &str,
        input: &'s str,
        depth: usize,
    ) -> Result<(Vec<Step>, &'s str, bool)> {
        let mut steps = Vec::new();
        let mut rest = input;
        let mut after_group = false;

        while let Some(pos) = rest.find(['(', ')']) {
            let (tokens, multiplier) = split_run(&rest[..pos], after_group)?;
            let opens = rest.as_bytes()[pos] == b'(';
            let tail = &rest[pos + 1..];

            if !opens {
                if depth == 0 {
                    return Err(Error::syntax(source, "unbalanced parentheses"));
                }
                if multiplier.is_some() {
                    return Err(Error::syntax(source, "trailing multiplier"));
                }
                self.push_body_steps(&mut steps, &tokens)?;
                return Ok((steps, tail, true));
            }

            let count = multiplier.ok_or_else(|| Error::syntax(source, "missing multiplier before ("))?;
            self.push_body_steps(&mut steps, &tokens)?;
            let mut repeat = RepeatStep::new(&mut self.ids, format!("repeat X {count}"), count)?;
            let (children, remaining, closed) = self.parse_sequence(source, tail, depth + 1)?;
            if !closed {
                return Err(Error::syntax(source, "unbalanced parentheses"));
            }
            repeat.set_steps(children);
            steps.push(repeat.into());
            rest = remaining;
            after_group = true;
        }

        let (tokens, multiplier) = split_run(rest, after_group)?;
        if multiplier.is_some() {
            return Err(Error::syntax(source, "trailing multiplier"));
        }
        self.push_body_steps(&mut steps, &tokens)?;
        Ok((steps, "", false))
    }

    fn push_body_steps(&mut self, steps: &mut Vec<Step>, tokens: &[&str]) -> Result<()> {
        for token in tokens {
            steps.push(self.body_step(token)?.into());
        }
        Ok(())
    }

    /// Resolve one step token against the database.
    fn body_step(&mut self, token: &str) -> Result<BodyStep> {
        let (pace, duration) = match StepToken::parse(token)? {
            StepToken::Named(name) => self.named_segment(token, name)?,
            StepToken::Paced { distance, pace } => {
                if self.db.segment_by_name(distance).is_ok() {
                    return Err(Error::syntax(
                        token,
                        format!("segment {distance:?} has its own pace; drop the '@' reference"),
                    ));
                }
                let distance = Distance::parse(distance)?;
                let base = if pace.is_race_pace() {
                    self.race_pace
                } else {
                    self.reference_pace(token, pace.name)?
                };
                let pace = match pace.increment {
                    Some(seconds) => base.increment(seconds)?,
                    None => base,
                };
                (pace, StepDuration::Distance(distance))
            }
        };
        Ok(BodyStep::new(&mut self.ids, token, pace, duration))
    }

    fn named_segment(&self, token: &str, name: &str) -> Result<(Pace, StepDuration)> {
        let segment = match self.db.segment_by_name(name) {
            Ok(segment) => segment,
            Err(err) => {
                if Distance::parse(name).is_ok() {
                    return Err(Error::syntax(
                        token,
                        "distance needs a pace reference, e.g. '1 mile@easy'",
                    ));
                }
                return Err(err);
            }
        };
        let pace = self.db.segment_pace(self.row, name)?;
        match segment {
            Segment::Distance { distance, .. } => Ok((pace, StepDuration::Distance(*distance))),
            Segment::Time { duration, .. } => Ok((pace, StepDuration::Time(*duration))),
            Segment::Pace { .. } => Err(Error::Argument(format!(
                "pace segment {name:?} has no distance or duration; use e.g. '1 mile@{name}'"
            ))),
        }
    }

    fn reference_pace(&self, token: &str, name: &str) -> Result<Pace> {
        if let Segment::Time { .. } = self.db.segment_by_name(name)? {
            return Err(Error::syntax(
                token,
                format!("duration segment {name:?} cannot be used as a pace reference"),
            ));
        }
        self.db.segment_pace(self.row, name)
    }
}

/// Parse one instruction with a fresh id counter.
pub fn parse_instruction(
    db: &PaceDatabase,
    row: usize,
    race_pace: Pace,
    instruction: &str,
) -> Result<Vec<Step>> {
    ParseContext::new(db, row, race_pace).parse_steps(instruction)
}
