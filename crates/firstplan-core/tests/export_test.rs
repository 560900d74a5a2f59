//! Exporting a generated plan in every output format.

use chrono::NaiveDate;

use firstplan_core::data::PaceDatabase;
use firstplan_core::export::{ExportOptions, OutputFormat, render};
use firstplan_core::plan::{Plan, WeeklySchedule};
use firstplan_core::race::{Race, Runner};
use firstplan_core::units::{LengthUnit, Time};
use firstplan_test_utils::sample_database_file;

fn generated_plan() -> Plan {
    let db = PaceDatabase::try_from(sample_database_file()).unwrap();
    let race_type = db.race_type("5K").unwrap().clone();
    let race = Race::new(race_type, "Park run", NaiveDate::from_ymd_opt(2017, 7, 23).unwrap())
        .with_target_time(Time::new(0, 30, 0));
    let mut plan = Plan::new("5K plan", WeeklySchedule::new([1, 3, 5]).unwrap())
        .with_race(race)
        .with_runner(Runner::new("DBD").with_age(42));
    plan.generate_workouts(&db).unwrap();
    plan
}

#[test]
fn text_report_levels() {
    let plan = generated_plan();

    let brief = render(&plan, OutputFormat::Text, &ExportOptions::default()).unwrap();
    assert!(brief.starts_with("Training Plan:\nName - \"5K plan\"\nWorkout days: Tue, Thu, Sat\n"));
    assert!(brief.contains("  \"Week 1 Keyrun 1\"\n"), "{brief}");
    assert!(brief.ends_with("Total 12 workouts\n"), "{brief}");
    assert!(!brief.contains("Totals:"));
    assert!(!brief.contains("Age - 42"));

    let detailed = render(&plan, OutputFormat::Text, &ExportOptions::default().with_level(2)).unwrap();
    assert!(detailed.contains("  Target time - 0:30:00\n"), "{detailed}");
    assert!(detailed.contains("  Age - 42\n"), "{detailed}");
    assert!(detailed.contains("Step: \"repeat X 8\""), "{detailed}");
    assert!(detailed.contains("Totals: distance = "), "{detailed}");
}

#[test]
fn tcx_lists_every_workout() {
    let plan = generated_plan();
    let doc = render(&plan, OutputFormat::Tcx, &ExportOptions::default()).unwrap();

    assert_eq!(doc.matches("<WorkoutNameRef>").count(), 12);
    assert_eq!(doc.matches("<Workout Sport=\"Running\">").count(), 12);
    assert!(doc.contains("<ScheduledOn>2017-07-23</ScheduledOn>"));
    assert!(doc.contains("<Step xsi:type=\"Repeat_t\">"));
    assert!(doc.contains("<Child xsi:type=\"Step_t\">"));
}

#[test]
fn json_round_trips_through_serde_json() {
    let plan = generated_plan();
    let options = ExportOptions::default().with_unit(LengthUnit::Kilometer);
    let doc = render(&plan, OutputFormat::Json, &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&doc).unwrap();

    assert_eq!(value["name"], "5K plan");
    assert_eq!(value["runner"]["age"], 42);
    let workouts = value["workouts"].as_array().unwrap();
    assert_eq!(workouts.len(), 12);
    assert_eq!(workouts[0]["total_distance"]["unit"], "km");
    assert_eq!(workouts[11]["date"], "2017-07-23");
}

#[test]
fn html_page_has_a_section_per_workout() {
    let plan = generated_plan();
    let page = render(&plan, OutputFormat::Html, &ExportOptions::default()).unwrap();
    assert_eq!(page.matches("<h3>").count(), 12);
    assert!(page.contains("<h3>Week 1 Keyrun 1 - "), "{page}");
    assert!(page.contains("Repeat 8 times:"), "{page}");
}
