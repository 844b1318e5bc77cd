use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Command with the user config directory pointed at an empty temp dir.
fn neuroscribe_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("neuroscribe").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn write_script(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("session.txt");
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn help_describes_the_tool() {
    let temp = TempDir::new().unwrap();
    neuroscribe_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Grid drawing driven by a wearable EEG/EMG headset",
        ))
        .stdout(predicate::str::contains("--replay"));
}

#[test]
fn bare_invocation_prints_usage() {
    let temp = TempDir::new().unwrap();
    neuroscribe_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("neuroscribe --replay FILE"));
}

#[test]
fn replay_draws_on_the_main_board() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "T\nM 8\nM 8\nwait 200\nM 8\n");

    neuroscribe_cmd(temp.path())
        .args(["--skip-tutorial", "--print-board", "--replay", &script])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[Pen] cursor (39, 25) | 2 cells drawn",
        ))
        .stdout(predicate::str::contains(".#@."));
}

#[test]
fn default_session_starts_in_the_practice_game() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "M 8\n");

    neuroscribe_cmd(temp.path())
        .args(["--replay", &script])
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1: Triangle (1/3) | moves 1/50"));
}

#[test]
fn stdin_replay_is_read_live() {
    let temp = TempDir::new().unwrap();
    neuroscribe_cmd(temp.path())
        .args(["--skip-tutorial", "--replay", "-"])
        .write_stdin("S 1\nbogus line\nM 8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertical] [Disabled] cursor (37, 26)"));
}

#[test]
fn save_menu_entry_exports_json() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("exports");
    let script = write_script(&temp, "T\nM 9\nA\nE 1\n");

    neuroscribe_cmd(temp.path())
        .args(["--skip-tutorial", "--replay", &script, "--export-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Drawing saved to"));

    let exports: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("neuroart-") && name.ends_with(".json"))
        .collect();
    assert_eq!(exports.len(), 1);

    let text = std::fs::read_to_string(out.join(&exports[0])).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["cursor"]["x"], 36);
    assert_eq!(json["pen_state"], 1);
    assert_eq!(json["grid"][25][36], true);
}

#[test]
fn config_file_sets_board_size() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        "[board]\ncolumns = 10\nrows = 5\nstart_x = 2\nstart_y = 2\n\n[session]\nstart_surface = \"main\"\n",
    )
    .unwrap();
    let script = write_script(&temp, "M 8\n");

    let assert = neuroscribe_cmd(temp.path())
        .args(["--print-board", "--replay", &script, "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("cursor (3, 2)"));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let board: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(board, ["..........", "..........", "...@......", "..........", ".........."]);
}

#[test]
fn missing_script_reports_connection_failure() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    neuroscribe_cmd(temp.path())
        .arg("--replay")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to connect"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn malformed_script_names_the_line() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "M 8\nwait soon\n");

    neuroscribe_cmd(temp.path())
        .args(["--replay", &script])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}
