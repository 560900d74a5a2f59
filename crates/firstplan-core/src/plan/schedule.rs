//! Laying out key-runs on the calendar.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, info};

use crate::data::PaceDatabase;
use crate::error::{Error, Result};
use crate::instruction::ParseContext;
use crate::plan::{Plan, WeeklySchedule};
use crate::workout::Workout;

/// Every instruction set schedules three key-runs a week.
pub const KEYRUNS_PER_WEEK: usize = 3;

/// First-week dates of the three key-run slots for a plan of `count`
/// workouts ending on `race_date`.
///
/// The plan spans `ceil(count / 3)` weeks. The first slot is moved from the
/// start date by its weekday distance to the first schedule day (forward
/// when the start date falls earlier in the week).
pub fn first_week_dates(race_date: NaiveDate, schedule: WeeklySchedule, count: usize) -> [NaiveDate; 3] {
    let num_weeks = count.div_ceil(KEYRUNS_PER_WEEK).max(1) as i64;
    let [d0, d1, d2] = schedule.days().map(i64::from);

    let start = race_date - Duration::weeks(num_weeks - 1);
    let delta = i64::from(start.weekday().num_days_from_monday()) - d0;
    let start = start - Duration::days(delta);
    [start, start + Duration::days(d1 - d0), start + Duration::days(d2 - d0)]
}

/// Put the last workout on race day and keep the one before it off race day.
fn reconcile_with_race_day(workouts: &mut [Workout], race_date: NaiveDate) {
    let n = workouts.len();
    if let Some(last) = workouts.last_mut() {
        last.date = race_date;
    }
    if n >= 2 {
        let second_to_last = &mut workouts[n - 2];
        if second_to_last.date >= race_date {
            second_to_last.date -= Duration::days(1);
        }
    }
}

impl Plan {
    /// Generate the workouts from the database's instruction set for the
    /// plan's race type.
    ///
    /// Existing workouts are replaced and step ids restart at 0. On error the
    /// plan is left with no workouts.
    pub fn generate_workouts(&mut self, db: &PaceDatabase) -> Result<()> {
        self.workouts.clear();
        let (race, _) = self.can_generate_workouts()?;
        let set = db.plan_instructions(&race.race_type.name)?;
        self.generate_from_instructions(db, &set.instructions)
    }

    /// Generate the workouts from explicit `"<week> <keyrun> <instruction>"`
    /// lines, one per key-run.
    pub fn generate_from_instructions(&mut self, db: &PaceDatabase, instructions: &[String]) -> Result<()> {
        self.workouts.clear();
        let (race, target) = self.can_generate_workouts()?;
        if instructions.is_empty() {
            return Err(Error::Argument("no workout instructions to schedule".into()));
        }
        let race_date = race.date;
        let race_pace = race.race_pace()?;
        let row = db.pace_row_index_for_target_time(&target, &race.race_type.name)?;

        let mut dates = first_week_dates(race_date, self.weekly_schedule, instructions.len());
        debug!(plan = %self.name, row, %race_pace, first = %dates[0], "scheduling key-runs");

        let mut ctx = ParseContext::new(db, row, race_pace);
        let mut workouts = Vec::with_capacity(instructions.len());
        for (i, line) in instructions.iter().enumerate() {
            let slot = i % KEYRUNS_PER_WEEK;
            workouts.push(ctx.parse_workout_line(line, dates[slot])?);
            dates[slot] += Duration::weeks(1);
        }
        reconcile_with_race_day(&mut workouts, race_date);

        info!(
            plan = %self.name,
            workouts = workouts.len(),
            steps = ctx.ids().issued(),
            first = %workouts[0].date,
            race = %race_date,
            "training plan generated"
        );
        self.workouts = workouts;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(days: [u8; 3]) -> WeeklySchedule {
        WeeklySchedule::new(days).unwrap()
    }

    #[test]
    fn sixteen_weeks_before_a_sunday_race() {
        let dates = first_week_dates(date(2017, 7, 23), schedule([0, 2, 5]), 48);
        assert_eq!(dates, [date(2017, 4, 3), date(2017, 4, 5), date(2017, 4, 8)]);
    }

    #[test]
    fn partial_last_week_counts_as_a_week() {
        let dates = first_week_dates(date(2017, 7, 23), schedule([0, 3, 6]), 20);
        assert_eq!(dates, [date(2017, 6, 5), date(2017, 6, 8), date(2017, 6, 11)]);
    }

    #[test]
    fn start_moves_forward_when_first_day_is_later_in_the_week() {
        // 2017-07-03 is a Monday; the first key-run day is Wednesday.
        let dates = first_week_dates(date(2017, 7, 24), schedule([2, 4, 6]), 12);
        assert_eq!(dates, [date(2017, 7, 5), date(2017, 7, 7), date(2017, 7, 9)]);
    }

    #[test]
    fn reconcile_moves_last_two() {
        let race = date(2017, 7, 19);
        let mut workouts = vec![
            Workout::new("a", date(2017, 7, 17)),
            Workout::new("b", date(2017, 7, 19)),
            Workout::new("c", date(2017, 7, 22)),
        ];
        reconcile_with_race_day(&mut workouts, race);
        assert_eq!(workouts[0].date, date(2017, 7, 17));
        assert_eq!(workouts[1].date, date(2017, 7, 18));
        assert_eq!(workouts[2].date, race);
    }

    #[test]
    fn reconcile_single_workout() {
        let race = date(2017, 7, 19);
        let mut workouts = vec![Workout::new("race", date(2017, 7, 10))];
        reconcile_with_race_day(&mut workouts, race);
        assert_eq!(workouts[0].date, race);
    }
}
