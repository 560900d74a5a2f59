//! Shared test fixtures for firstplan tests.
//!
//! Provides a reduced FIRST pace database (four race types, 91 table rows
//! from a 15:00 to a 30:00 5K, fourteen segments, one instruction set per
//! race type) both as an in-memory [`DatabaseFile`] and as a file on disk.

use std::path::PathBuf;

use tempfile::TempDir;

use firstplan_db::models::DatabaseFile;
use firstplan_db::store::{FileFormat, parse_database};

/// Raw JSON of the fixture database.
pub const FIXTURE_JSON: &str = include_str!("../fixtures/first_database.json");

/// Number of key-runs in the fixture's Marathon instruction set.
pub const MARATHON_INSTRUCTION_COUNT: usize = 48;

/// Number of key-runs in the fixture's HalfMarathon instruction set
/// (deliberately not a multiple of three).
pub const HALF_MARATHON_INSTRUCTION_COUNT: usize = 20;

/// Parse the fixture database.
pub fn sample_database_file() -> DatabaseFile {
    parse_database(FIXTURE_JSON, FileFormat::Json).expect("fixture database should parse")
}

/// A fixture database written to a temporary directory.
///
/// The directory (and file) is removed when the value is dropped.
pub struct FixtureFile {
    /// Held to keep the directory alive.
    _dir: TempDir,
    /// Path of the written JSON file.
    pub path: PathBuf,
}

/// Write the fixture database as `first_database.json` into a fresh
/// temporary directory.
pub fn write_fixture_database() -> FixtureFile {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("first_database.json");
    std::fs::write(&path, FIXTURE_JSON)
        .unwrap_or_else(|e| panic!("failed to write fixture to {}: {e}", path.display()));
    FixtureFile { _dir: dir, path }
}

/// A copy of the fixture with `edit` applied, serialized as JSON.
pub fn modified_fixture_json(edit: impl FnOnce(&mut DatabaseFile)) -> String {
    let mut file = sample_database_file();
    edit(&mut file);
    serde_json::to_string_pretty(&file).expect("fixture should serialize")
}
