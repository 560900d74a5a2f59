//! `firstplan equivalent`: equivalent finishing times across race types.

use anyhow::{Context, Result};

use firstplan_core::data::PaceDatabase;
use firstplan_core::units::Time;

/// Print the equivalent of `time` in `from` for `to`, or for every race type
/// when `to` is absent.
pub fn run_equivalent(db: &PaceDatabase, time: &str, from: &str, to: Option<&str>) -> Result<()> {
    for (name, equivalent) in equivalents(db, time, from, to)? {
        println!("{name:<14} {equivalent}");
    }
    Ok(())
}

fn equivalents(db: &PaceDatabase, time: &str, from: &str, to: Option<&str>) -> Result<Vec<(String, Time)>> {
    let time = Time::parse(time).with_context(|| format!("invalid time {time:?}"))?;
    let targets: Vec<&str> = match to {
        Some(name) => vec![name],
        None => db.race_types().iter().map(|r| r.name.as_str()).collect(),
    };
    targets
        .into_iter()
        .map(|name| -> Result<(String, Time)> {
            let equivalent = db
                .equivalent_time_by_name(&time, from, name)
                .with_context(|| format!("no {name} equivalent for a {time} {from}"))?;
            Ok((name.to_owned(), equivalent))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use firstplan_test_utils::sample_database_file;

    #[test]
    fn single_and_all_targets() {
        let db = PaceDatabase::try_from(sample_database_file()).unwrap();

        let one = equivalents(&db, "0:20:13", "5K", Some("HalfMarathon")).unwrap();
        assert_eq!(one, vec![("HalfMarathon".to_string(), Time::new(1, 34, 15))]);

        let all = equivalents(&db, "0:30:00", "5K", None).unwrap();
        let names: Vec<&str> = all.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["5K", "10K", "HalfMarathon", "Marathon"]);
        assert_eq!(all[3].1, Time::new(4, 53, 37));
    }

    #[test]
    fn out_of_table_times_fail() {
        let db = PaceDatabase::try_from(sample_database_file()).unwrap();
        let err = equivalents(&db, "0:45:00", "5K", Some("Marathon")).unwrap_err();
        assert!(err.to_string().contains("no Marathon equivalent"), "unexpected error: {err}");
    }
}
