//! Turning command-line text into domain values.
//!
//! - [`load_pace_database`] reads and validates the configured database file.
//! - [`parse_race_date`] accepts ISO (`2017-07-23`) or US (`07/23/2017`) dates.
//! - [`parse_target_time`] parses `H:MM:SS`, optionally converting from a
//!   reference race type through the equivalent-time table.

use chrono::NaiveDate;

use anyhow::{Context, Result, bail};
use tracing::debug;

use firstplan_core::data::PaceDatabase;
use firstplan_core::units::Time;
use firstplan_db::config::DbConfig;
use firstplan_db::store::load_database;

/// Load the database file and build the validated view.
pub fn load_pace_database(config: &DbConfig) -> Result<PaceDatabase> {
    let path = &config.database_path;
    let file = load_database(config).with_context(|| {
        format!(
            "cannot load pace database {} (set --database, {} or database.path in the config file)",
            path.display(),
            DbConfig::ENV_VAR
        )
    })?;
    PaceDatabase::try_from(file)
        .with_context(|| format!("invalid pace database {}", path.display()))
}

/// Parse a race date in `YYYY-MM-DD` or `MM/DD/YYYY` form.
pub fn parse_race_date(input: &str) -> Result<NaiveDate> {
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }
    bail!("invalid race date {input:?} (expected YYYY-MM-DD or MM/DD/YYYY)")
}

/// Parse the target time for `race_type`.
///
/// With `reference`, `input` is a finishing time for that race type and the
/// equivalent `race_type` time is looked up.
pub fn parse_target_time(
    db: &PaceDatabase,
    input: &str,
    race_type: &str,
    reference: Option<&str>,
) -> Result<Time> {
    let time = Time::parse(input).with_context(|| format!("invalid target time {input:?}"))?;
    let Some(reference) = reference else {
        return Ok(time);
    };
    let target = db
        .equivalent_time_by_name(&time, reference, race_type)
        .with_context(|| format!("no {race_type} equivalent for a {time} {reference}"))?;
    debug!(%time, reference, race_type, %target, "target time from reference race");
    Ok(target)
}

/// File name stem for a generated plan: the race date and a slug of the race
/// name, e.g. `2017-07-23-my-race`.
pub fn plan_file_stem(race_date: NaiveDate, race_name: &str) -> String {
    let mut slug = String::with_capacity(race_name.len());
    for c in race_name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        race_date.to_string()
    } else {
        format!("{race_date}-{slug}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use firstplan_test_utils::sample_database_file;

    fn db() -> PaceDatabase {
        PaceDatabase::try_from(sample_database_file()).unwrap()
    }

    #[test]
    fn race_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2017, 7, 23).unwrap();
        assert_eq!(parse_race_date("2017-07-23").unwrap(), expected);
        assert_eq!(parse_race_date("07/23/2017").unwrap(), expected);

        let err = parse_race_date("23.07.2017").unwrap_err();
        assert!(err.to_string().contains("invalid race date"), "unexpected error: {err}");
    }

    #[test]
    fn target_time_direct_and_by_reference() {
        let db = db();
        assert_eq!(
            parse_target_time(&db, "3:45:00", "Marathon", None).unwrap(),
            Time::new(3, 45, 0)
        );
        assert_eq!(
            parse_target_time(&db, "0:30:00", "Marathon", Some("5K")).unwrap(),
            Time::new(4, 53, 37)
        );

        let err = parse_target_time(&db, "0:30:00", "Marathon", Some("Mile")).unwrap_err();
        assert!(err.to_string().contains("no Marathon equivalent"), "unexpected error: {err}");
        let err = parse_target_time(&db, "fast", "Marathon", None).unwrap_err();
        assert!(err.to_string().contains("invalid target time"), "unexpected error: {err}");
    }

    #[test]
    fn file_stems() {
        let date = NaiveDate::from_ymd_opt(2017, 7, 23).unwrap();
        assert_eq!(plan_file_stem(date, "My Race"), "2017-07-23-my-race");
        assert_eq!(plan_file_stem(date, "  SF Marathon!! 2017 "), "2017-07-23-sf-marathon-2017");
        assert_eq!(plan_file_stem(date, "///"), "2017-07-23");
    }

    #[test]
    fn missing_database_mentions_the_override() {
        let err = load_pace_database(&DbConfig::new("/nonexistent/first.json")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("/nonexistent/first.json"), "unexpected error: {msg}");
        assert!(msg.contains(DbConfig::ENV_VAR), "unexpected error: {msg}");
    }
}
