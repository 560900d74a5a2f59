//! `firstplan generate`: build a training plan and write it out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use firstplan_core::export::{ExportOptions, OutputFormat, render};
use firstplan_core::plan::{Plan, WeeklySchedule};
use firstplan_core::race::{Race, Runner};

use crate::config::FirstplanConfig;
use crate::resolve::{load_pace_database, parse_race_date, parse_target_time, plan_file_stem};

/// Everything `generate` needs besides the resolved config.
#[derive(Debug)]
pub struct GenerateArgs {
    pub race_type: String,
    pub target_time: String,
    pub reference_race: Option<String>,
    pub race_date: String,
    pub race_name: Option<String>,
    pub runner_name: String,
    pub keyrun_days: String,
    pub formats: Vec<String>,
    pub level: usize,
    pub stdout: bool,
}

/// Generate the plan and write one file per format (or print to stdout).
///
/// Returns the written paths.
pub fn run_generate(config: &FirstplanConfig, args: &GenerateArgs) -> Result<Vec<PathBuf>> {
    let db = load_pace_database(&config.db_config)?;

    let race_type = db.race_type(&args.race_type)?.clone();
    let target = parse_target_time(
        &db,
        &args.target_time,
        &race_type.name,
        args.reference_race.as_deref(),
    )?;
    let race_date = parse_race_date(&args.race_date)?;
    let schedule: WeeklySchedule = args
        .keyrun_days
        .parse()
        .with_context(|| format!("invalid key-run days {:?}", args.keyrun_days))?;
    let formats = parse_formats(&args.formats, config.format)?;

    let race_name = args.race_name.clone().unwrap_or_else(|| race_type.name.clone());
    let race = Race::new(race_type, race_name.as_str(), race_date).with_target_time(target);
    let mut plan = Plan::new(race_name.as_str(), schedule)
        .with_race(race)
        .with_runner(Runner::new(args.runner_name.as_str()));
    plan.generate_workouts(&db)
        .with_context(|| format!("failed to generate a plan for {race_name:?}"))?;

    let mut options = ExportOptions::default()
        .with_level(args.level)
        .with_tolerance_seconds(config.tolerance_seconds)?;
    if let Some(unit) = config.unit {
        options = options.with_unit(unit);
    }

    if args.stdout {
        for format in &formats {
            print!("{}", render(&plan, *format, &options)?);
        }
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("failed to create output directory {}", config.output_dir.display())
    })?;
    let stem = plan_file_stem(race_date, &race_name);
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = config.output_dir.join(format!("{stem}.{}", format.extension()));
        let document = render(&plan, format, &options)?;
        std::fs::write(&path, document)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), %format, "plan written");
        written.push(path);
    }

    println!("Plan \"{}\" generated.", plan.name);
    println!();
    println!("  Workouts:   {}", plan.workouts.len());
    if let (Some(first), Some(last)) = (plan.workouts.first(), plan.workouts.last()) {
        println!("  First run:  {}", first.date.format("%a %Y-%m-%d"));
        println!("  Race day:   {}", last.date.format("%a %Y-%m-%d"));
    }
    println!("  Target:     {target}");
    for path in &written {
        println!("  Wrote:      {}", path.display());
    }
    Ok(written)
}

/// Parse requested formats; `both` means text and TCX. No request falls back
/// to `default`.
fn parse_formats(names: &[String], default: OutputFormat) -> Result<Vec<OutputFormat>> {
    let mut formats = Vec::new();
    for name in names {
        let expanded: Vec<OutputFormat> = if name.eq_ignore_ascii_case("both") {
            vec![OutputFormat::Text, OutputFormat::Tcx]
        } else {
            vec![name.parse().with_context(|| format!("invalid output format {name:?}"))?]
        };
        for format in expanded {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
    }
    if formats.is_empty() {
        formats.push(default);
    }
    Ok(formats)
}

#[cfg(test)]
mod tests {
    use super::*;

    use firstplan_db::config::DbConfig;
    use firstplan_test_utils::write_fixture_database;

    fn args(formats: &[&str]) -> GenerateArgs {
        GenerateArgs {
            race_type: "Marathon".to_string(),
            target_time: "4:53:37".to_string(),
            reference_race: None,
            race_date: "2017-07-23".to_string(),
            race_name: Some("SF Marathon".to_string()),
            runner_name: "DBD".to_string(),
            keyrun_days: "mon wed sat".to_string(),
            formats: formats.iter().map(|s| s.to_string()).collect(),
            level: 3,
            stdout: false,
        }
    }

    fn config(out: &std::path::Path, db: &std::path::Path) -> FirstplanConfig {
        FirstplanConfig {
            db_config: DbConfig::new(db),
            output_dir: out.to_path_buf(),
            format: OutputFormat::Text,
            unit: None,
            tolerance_seconds: 5,
        }
    }

    #[test]
    fn format_list() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            parse_formats(&names(&["both", "tcx"]), OutputFormat::Json).unwrap(),
            vec![OutputFormat::Text, OutputFormat::Tcx]
        );
        assert_eq!(parse_formats(&[], OutputFormat::Json).unwrap(), vec![OutputFormat::Json]);
        assert!(parse_formats(&names(&["pdf"]), OutputFormat::Text).is_err());
    }

    #[test]
    fn writes_one_file_per_format() {
        let fixture = write_fixture_database();
        let out = tempfile::TempDir::new().unwrap();
        let written = run_generate(&config(out.path(), &fixture.path), &args(&["both", "json"])).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["2017-07-23-sf-marathon.txt", "2017-07-23-sf-marathon.tcx", "2017-07-23-sf-marathon.json"]
        );

        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert!(text.starts_with("Training Plan:\nName - \"SF Marathon\"\n"), "{text}");
        assert!(text.contains("Total 48 workouts"), "{text}");
        let tcx = std::fs::read_to_string(&written[1]).unwrap();
        assert!(tcx.contains("<Running Name=\"SF Marathon\">"));
    }

    #[test]
    fn unknown_race_type_fails_before_writing() {
        let fixture = write_fixture_database();
        let out = tempfile::TempDir::new().unwrap();
        let mut bad = args(&["text"]);
        bad.race_type = "Ultra".to_string();
        let err = run_generate(&config(out.path(), &fixture.path), &bad).unwrap_err();
        assert!(format!("{err:#}").contains("Ultra"), "unexpected error: {err:#}");
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn bad_keyrun_days_are_reported() {
        let fixture = write_fixture_database();
        let out = tempfile::TempDir::new().unwrap();
        let mut bad = args(&["text"]);
        bad.keyrun_days = "mon mon sat".to_string();
        let err = run_generate(&config(out.path(), &fixture.path), &bad).unwrap_err();
        assert!(err.to_string().contains("invalid key-run days"), "unexpected error: {err:#}");
    }
}
