use super::*;
use crate::board::{CursorPosition, DrawingMode, PenState};
use crate::bus::{Envelope, Event};
use crate::input::{InteractionState, SurfaceSettings};
use chrono::{TimeZone, Utc};
use std::time::Instant;

fn drawn_state() -> InteractionState {
    let mut state = InteractionState::new(SurfaceSettings {
        columns: 6,
        rows: 4,
        start: CursorPosition::new(1, 1),
        pen: PenState::Pen,
        ..SurfaceSettings::default()
    });
    let now = Instant::now();
    state.handle(&Envelope::new(Event::Movement(8), now));
    state
}

#[test]
fn snapshot_captures_board_cursor_and_codes() {
    let state = drawn_state();
    let snapshot = ExportSnapshot::from_state(&state);

    assert_eq!(snapshot.grid.len(), 4);
    assert_eq!(snapshot.grid[0].len(), 6);
    assert!(snapshot.grid[1][2]);
    assert_eq!(snapshot.cursor, ExportCursor { x: 2, y: 1 });
    assert_eq!(snapshot.mode, 0);
    assert_eq!(snapshot.pen_state, 1);
    assert_eq!(snapshot.drawing_mode(), Some(DrawingMode::Horizontal));
    assert_eq!(snapshot.pen(), Some(PenState::Pen));
    assert_eq!(&snapshot.board(), state.board());
}

#[test]
fn file_name_uses_utc_date() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
    assert_eq!(export_file_name(ts), "neuroart-2024-03-09.json");
}

#[test]
fn save_writes_pretty_json_and_leaves_no_temp_file() {
    let temp = tempfile::tempdir().unwrap();
    let snapshot = ExportSnapshot::from_state(&drawn_state());

    let path = save_export(temp.path(), &snapshot).expect("export should succeed");
    assert_eq!(path.parent(), Some(temp.path()));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"grid\": ["));
    assert!(text.contains("\"pen_state\": 1"));

    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp"))
        .collect();
    assert!(leftovers.is_empty());

    let loaded = load_export(&path).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn save_creates_missing_directory_and_overwrites_same_day() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("nested").join("exports");
    let mut snapshot = ExportSnapshot::from_state(&drawn_state());

    let first = save_export(&dir, &snapshot).unwrap();
    snapshot.cursor = ExportCursor { x: 5, y: 3 };
    let second = save_export(&dir, &snapshot).unwrap();

    assert_eq!(first, second);
    assert_eq!(load_export(&second).unwrap().cursor, ExportCursor { x: 5, y: 3 });
}

#[test]
fn load_rejects_garbage() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load_export(&path).is_err());
}
