//! Integration tests for reading pace database files from disk.

use std::path::PathBuf;

use firstplan_db::config::DbConfig;
use firstplan_db::models::SegmentKind;
use firstplan_db::store::{StoreError, load_database, read_database_file, table_counts};
use firstplan_test_utils::{MARATHON_INSTRUCTION_COUNT, write_fixture_database};

#[test]
fn loads_fixture_from_disk() {
    let fixture = write_fixture_database();
    let file = load_database(&DbConfig::new(&fixture.path)).expect("fixture should load");

    assert_eq!(file.reference_race, "5K");
    assert_eq!(file.pace_unit, "min per mile");
    assert_eq!(file.race_types.len(), 4);
    assert_eq!(file.race_times.len(), 91);
    assert_eq!(file.pace_lines.len(), 91);
    assert_eq!(file.segments.len(), 14);
    assert_eq!(file.segments[0].name, "400m");
    assert_eq!(file.segments[0].kind, SegmentKind::Distance);
    assert_eq!(file.segments[12].name, "cooldown");
    assert_eq!(file.segments[12].kind, SegmentKind::Time);

    let marathon = file
        .plan_instructions
        .iter()
        .find(|p| p.race_name == "Marathon")
        .expect("marathon instructions");
    assert_eq!(marathon.instructions.len(), MARATHON_INSTRUCTION_COUNT);
    assert_eq!(
        marathon.instructions[0],
        "1 1 warmup#8x(400m#400 m@RI)cooldown"
    );
}

#[test]
fn counts_match_loaded_file() {
    let fixture = write_fixture_database();
    let file = read_database_file(&fixture.path).unwrap();
    let counts = table_counts(&file);
    assert!(counts.contains(&("segments", 14)));
    assert!(counts.contains(&("plan_instructions", 4)));
}

#[test]
fn missing_file_is_io_error() {
    let err = read_database_file(&PathBuf::from("/nonexistent/firstplan/db.json")).unwrap_err();
    match err {
        StoreError::Io { path, .. } => {
            assert_eq!(path, PathBuf::from("/nonexistent/firstplan/db.json"));
        }
        other => panic!("expected Io error, got: {other}"),
    }
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let err = read_database_file(&PathBuf::from("/nonexistent/db.xml")).unwrap_err();
    assert!(
        matches!(err, StoreError::UnsupportedFormat(ref ext) if ext == "xml"),
        "got: {err}"
    );
}
