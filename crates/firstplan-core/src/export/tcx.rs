//! Garmin Training Center (TCX) workout schedules.

use crate::error::{Error, Result};
use crate::export::xml::XmlElement;
use crate::plan::Plan;
use crate::step::{BodyStep, RepeatStep, Step, StepDuration};
use crate::units::{LengthUnit, Pace, TimeUnit};
use crate::workout::Workout;

/// Default half-width of a step's speed zone, in seconds of pace.
pub const DEFAULT_TOLERANCE_SECONDS: i64 = 5;

/// Every key-run step is an active effort.
const INTENSITY: &str = "Active";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>"#;
const TCX_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const TCX_SCHEMA: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabasev2.xsd";

/// The whole plan as a TCX document.
pub fn plan_document(plan: &Plan, tolerance_seconds: i64) -> Result<String> {
    check_tolerance(tolerance_seconds)?;
    let mut running = XmlElement::new("Running").attr("Name", plan.name.as_str());
    for workout in &plan.workouts {
        running.push(
            XmlElement::new("WorkoutNameRef").child(XmlElement::with_text("Id", workout.name.as_str())),
        );
    }
    let folders = XmlElement::new("Folders").child(
        XmlElement::new("Workouts")
            .child(running)
            .child(XmlElement::new("Biking").attr("Name", "Biking"))
            .child(XmlElement::new("Other").attr("Name", "Other")),
    );

    let mut workouts = XmlElement::new("Workouts");
    for workout in &plan.workouts {
        workouts.push(workout_element(workout, tolerance_seconds)?);
    }

    let root = XmlElement::new("TrainingCenterDatabase")
        .attr("xmlns", TCX_NAMESPACE)
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr("xsi:schemaLocation", format!("{TCX_NAMESPACE} {TCX_SCHEMA}"))
        .child(folders)
        .child(workouts);
    Ok(format!("{XML_DECLARATION}\n{}", root.render(0)))
}

/// A `Workout` element with its steps, schedule date, and note.
pub fn workout_element(workout: &Workout, tolerance_seconds: i64) -> Result<XmlElement> {
    let mut el = XmlElement::new("Workout")
        .attr("Sport", "Running")
        .child(XmlElement::with_text("Name", workout.name.as_str()));
    for step in &workout.steps {
        el.push(step_element(step, false, tolerance_seconds)?);
    }
    el.push(XmlElement::with_text("ScheduledOn", workout.date.to_string()));
    if let Some(note) = &workout.note {
        el.push(XmlElement::with_text("Notes", note.as_str()));
    }
    Ok(el)
}

/// A `Step` element, or a `Child` element when nested under a repeat.
pub fn step_element(step: &Step, child: bool, tolerance_seconds: i64) -> Result<XmlElement> {
    match step {
        Step::Body(body) => body_element(body, child, tolerance_seconds),
        Step::Repeat(repeat) => repeat_element(repeat, child, tolerance_seconds),
    }
}

fn step_header(id: u32, name: &str, child: bool, step_type: &str) -> XmlElement {
    let tag = if child { "Child" } else { "Step" };
    XmlElement::new(tag)
        .attr("xsi:type", step_type)
        .child(XmlElement::with_text("StepId", id.to_string()))
        .child(XmlElement::with_text("Name", name))
}

fn body_element(body: &BodyStep, child: bool, tolerance_seconds: i64) -> Result<XmlElement> {
    let (duration_type, quantity, value) = match body.duration() {
        StepDuration::Distance(d) => ("Distance_t", "Meters", d.convert_to(LengthUnit::Meter)),
        StepDuration::Time(t) => ("Time_t", "Seconds", t.convert_to(TimeUnit::Second)),
    };
    let (low, high) = speed_band(body.pace(), tolerance_seconds)?;

    Ok(step_header(body.id(), body.name(), child, "Step_t")
        .child(
            XmlElement::new("Duration")
                .attr("xsi:type", duration_type)
                .child(XmlElement::with_text(quantity, format!("{value:.0}"))),
        )
        .child(XmlElement::with_text("Intensity", INTENSITY))
        .child(
            XmlElement::new("Target").attr("xsi:type", "Speed_t").child(
                XmlElement::new("SpeedZone")
                    .attr("xsi:type", "CustomSpeedZone_t")
                    .child(XmlElement::with_text("LowInMetersPerSecond", format!("{low:.7}")))
                    .child(XmlElement::with_text("HighInMetersPerSecond", format!("{high:.7}"))),
            ),
        ))
}

/// Low and high speed in m/s for `pace` widened by `tolerance_seconds` each
/// way. The tolerance must be at least one second so that low < high.
pub fn speed_band(pace: Pace, tolerance_seconds: i64) -> Result<(f64, f64)> {
    check_tolerance(tolerance_seconds)?;
    let faster = tolerance_seconds
        .checked_neg()
        .ok_or_else(|| Error::Argument(format!("tolerance of {tolerance_seconds}s is out of range")))?;
    let low = pace.meters_per_second_at_delta(tolerance_seconds)?;
    let high = pace.meters_per_second_at_delta(faster)?;
    Ok((low, high))
}

/// Reject speed-zone tolerances below one second.
pub fn check_tolerance(tolerance_seconds: i64) -> Result<()> {
    if tolerance_seconds < 1 {
        return Err(Error::Argument(format!(
            "speed-zone tolerance must be at least 1 second, got {tolerance_seconds}"
        )));
    }
    Ok(())
}

fn repeat_element(repeat: &RepeatStep, child: bool, tolerance_seconds: i64) -> Result<XmlElement> {
    let mut el = step_header(repeat.id(), repeat.name(), child, "Repeat_t")
        .child(XmlElement::with_text("Repetitions", repeat.count().to_string()));
    for step in repeat.steps() {
        el.push(step_element(step, true, tolerance_seconds)?);
    }
    Ok(el)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::error::Error;
    use crate::plan::WeeklySchedule;
    use crate::step::StepIds;
    use crate::units::{Distance, Pace, Time};

    fn pace(s: &str) -> Pace {
        Pace::parse(s).unwrap()
    }

    #[test]
    fn body_step_with_speed_zone() {
        let mut ids = StepIds::new();
        let step: Step = BodyStep::new(
            &mut ids,
            "Warm up",
            pace("0:10:00 min per mile"),
            StepDuration::Time(Time::new(0, 15, 0)),
        )
        .into();
        let xml = step_element(&step, false, DEFAULT_TOLERANCE_SECONDS).unwrap().render(0);
        assert_eq!(
            xml,
            "<Step xsi:type=\"Step_t\">\n\
             \x20 <StepId>0</StepId>\n\
             \x20 <Name>Warm up</Name>\n\
             \x20 <Duration xsi:type=\"Time_t\">\n\
             \x20   <Seconds>900</Seconds>\n\
             \x20 </Duration>\n\
             \x20 <Intensity>Active</Intensity>\n\
             \x20 <Target xsi:type=\"Speed_t\">\n\
             \x20   <SpeedZone xsi:type=\"CustomSpeedZone_t\">\n\
             \x20     <LowInMetersPerSecond>2.6600727</LowInMetersPerSecond>\n\
             \x20     <HighInMetersPerSecond>2.7047798</HighInMetersPerSecond>\n\
             \x20   </SpeedZone>\n\
             \x20 </Target>\n\
             </Step>\n"
        );
    }

    #[test]
    fn repeat_children_and_distance_duration() {
        let mut ids = StepIds::new();
        let mut repeat = RepeatStep::new(&mut ids, "repeat X 3", 3).unwrap();
        repeat.add_step(
            BodyStep::new(
                &mut ids,
                "400m",
                pace("0:08:00 min per mile"),
                StepDuration::Distance(Distance::parse("0.25 mile").unwrap()),
            )
            .into(),
        );
        let xml = step_element(&repeat.into(), false, 5).unwrap().render(0);
        assert!(xml.starts_with("<Step xsi:type=\"Repeat_t\">\n  <StepId>0</StepId>\n"), "{xml}");
        assert!(xml.contains("  <Repetitions>3</Repetitions>\n"), "{xml}");
        assert!(xml.contains("  <Child xsi:type=\"Step_t\">\n    <StepId>1</StepId>\n"), "{xml}");
        assert!(xml.contains("<Duration xsi:type=\"Distance_t\">\n      <Meters>402</Meters>\n"), "{xml}");
    }

    #[test]
    fn tolerance_beyond_the_pace_fails() {
        let mut ids = StepIds::new();
        let step: Step = BodyStep::new(
            &mut ids,
            "sprint",
            Pace::new(0, 4, LengthUnit::Meter),
            StepDuration::Time(Time::new(0, 1, 0)),
        )
        .into();
        let err = step_element(&step, false, 5).unwrap_err();
        assert!(matches!(err, Error::Range(_)), "got: {err}");
    }

    #[test]
    fn band_needs_a_positive_tolerance() {
        let mut ids = StepIds::new();
        let step: Step = BodyStep::new(
            &mut ids,
            "Warm up",
            pace("0:10:00 min per mile"),
            StepDuration::Time(Time::new(0, 15, 0)),
        )
        .into();
        for tolerance in [0, -5, i64::MIN] {
            let err = step_element(&step, false, tolerance).unwrap_err();
            assert!(matches!(err, Error::Argument(_)), "{tolerance}: {err}");
        }
        let err = step_element(&step, false, i64::MAX).unwrap_err();
        assert!(matches!(err, Error::Range(_)), "got: {err}");

        let (low, high) = speed_band(pace("0:10:00 min per mile"), 1).unwrap();
        assert!(low < high);

        let plan = Plan::new("empty", WeeklySchedule::new([0, 2, 5]).unwrap());
        assert!(matches!(plan_document(&plan, 0), Err(Error::Argument(_))));
    }

    #[test]
    fn plan_document_layout() {
        let mut ids = StepIds::new();
        let mut wo = Workout::new("Week 1 Keyrun 1", NaiveDate::from_ymd_opt(2017, 4, 3).unwrap())
            .with_note("8x(400m#400 m@RI)");
        wo.add_step(BodyStep::new(
            &mut ids,
            "easy",
            pace("0:11:31 min per mile"),
            StepDuration::Time(Time::new(0, 10, 0)),
        ));
        let mut plan = Plan::new("Marathon plan", WeeklySchedule::new([0, 2, 5]).unwrap());
        plan.add_workout(wo);

        let doc = plan_document(&plan, DEFAULT_TOLERANCE_SECONDS).unwrap();
        assert!(doc.starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n\
             <TrainingCenterDatabase xmlns=\"http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2 \
             http://www.garmin.com/xmlschemas/TrainingCenterDatabasev2.xsd\">\n"
        ));
        assert!(doc.contains(
            "  <Folders>\n    <Workouts>\n      <Running Name=\"Marathon plan\">\n\
             \x20       <WorkoutNameRef>\n          <Id>Week 1 Keyrun 1</Id>\n        </WorkoutNameRef>\n\
             \x20     </Running>\n      <Biking Name=\"Biking\"/>\n      <Other Name=\"Other\"/>\n\
             \x20   </Workouts>\n  </Folders>\n"
        ));
        assert!(doc.contains("    <Workout Sport=\"Running\">\n      <Name>Week 1 Keyrun 1</Name>\n"));
        assert!(doc.contains("      <ScheduledOn>2017-04-03</ScheduledOn>\n      <Notes>8x(400m#400 m@RI)</Notes>\n"));
        assert!(doc.ends_with("</TrainingCenterDatabase>\n"));
    }
}
