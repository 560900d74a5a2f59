//! `firstplan races` and `firstplan db-info`: database summaries.

use anyhow::{Context, Result};

use firstplan_core::data::PaceDatabase;
use firstplan_db::config::DbConfig;
use firstplan_db::store::{load_database, table_counts};

/// List race types with their tabulated time range and plan length.
pub fn run_races(db: &PaceDatabase) -> Result<()> {
    let rows = db.race_times();
    println!(
        "{:<14} {:>12} {:>9} {:>9} {:>9}",
        "RACE", "DISTANCE", "FASTEST", "SLOWEST", "KEYRUNS"
    );
    println!("{}", "-".repeat(57));
    for (index, race_type) in db.race_types().iter().enumerate() {
        let fastest = rows.first().map(|r| r[index].to_string()).unwrap_or_default();
        let slowest = rows.last().map(|r| r[index].to_string()).unwrap_or_default();
        let keyruns = db
            .plan_instructions(&race_type.name)
            .map(|set| set.instructions.len().to_string())
            .unwrap_or_else(|_| "-".to_string());
        println!(
            "{:<14} {:>12} {:>9} {:>9} {:>9}",
            race_type.name,
            race_type.distance.to_string(),
            fastest,
            slowest,
            keyruns
        );
    }
    Ok(())
}

/// Show where the database lives and how much it holds.
pub fn run_db_info(config: &DbConfig) -> Result<()> {
    let path = &config.database_path;
    let file = load_database(config)
        .with_context(|| format!("cannot load pace database {}", path.display()))?;

    println!("Database: {}", file.name);
    println!("Path:     {}", path.display());
    if let Some(note) = &file.note {
        println!("Note:     {note}");
    }
    println!("Entries:");
    for (table, count) in table_counts(&file) {
        println!("  {table}: {count}");
    }

    let db = PaceDatabase::try_from(file)
        .with_context(|| format!("invalid pace database {}", path.display()))?;
    println!("Reference race: {}", db.reference_race());
    println!("Pace unit:      {}", db.pace_unit());
    println!("Segments:");
    for segment in db.segments() {
        println!("  {segment}");
    }
    Ok(())
}
