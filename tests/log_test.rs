use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run hostgate with given args, isolated from any ambient config.
fn hostgate() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hostgate");
    cmd.env_remove("HOSTGATE_CONFIG");
    cmd
}

fn create(dir: &assert_fs::TempDir, name: &str) {
    let path = dir.child(name).path().display().to_string();
    hostgate()
        .current_dir(dir.path())
        .args(["file", "create", "--path", &path])
        .assert()
        .success();
}

fn delete(dir: &assert_fs::TempDir, name: &str) {
    let path = dir.child(name).path().display().to_string();
    hostgate()
        .current_dir(dir.path())
        .args(["file", "delete", "--path", &path])
        .assert()
        .success();
}

fn log_json(dir: &assert_fs::TempDir, extra: &[&str]) -> Vec<serde_json::Value> {
    let out = hostgate()
        .current_dir(dir.path())
        .args(["--json", "log"])
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn log_without_file_is_not_found() {
    let dir = assert_fs::TempDir::new().unwrap();

    hostgate()
        .current_dir(dir.path())
        .args(["--json", "log"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Log file not found"));
}

#[test]
fn log_returns_all_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    create(&dir, "a.txt");
    delete(&dir, "a.txt");

    let entries = log_json(&dir, &[]);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["activity"], "create");
    assert_eq!(entries[1]["activity"], "delete");
}

#[test]
fn log_filter_keeps_order() {
    let dir = assert_fs::TempDir::new().unwrap();
    create(&dir, "first.txt");
    delete(&dir, "first.txt");
    create(&dir, "third.txt");

    let entries = log_json(&dir, &["--type", "create"]);
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["full_path"].as_str().unwrap().ends_with("first.txt"));
    assert!(entries[1]["full_path"].as_str().unwrap().ends_with("third.txt"));
}

#[test]
fn log_last_limits_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    create(&dir, "a.txt");
    create(&dir, "b.txt");

    hostgate()
        .current_dir(dir.path())
        .args(["log", "--last", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("log/activity_log.json"))
        .stdout(predicate::str::contains("b.txt"));
}

#[test]
fn log_filter_no_match() {
    let dir = assert_fs::TempDir::new().unwrap();
    create(&dir, "a.txt");

    hostgate()
        .current_dir(dir.path())
        .args(["log", "--type", "network_send"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries found"));
}

#[test]
fn malformed_line_fails_read() {
    let dir = assert_fs::TempDir::new().unwrap();
    create(&dir, "a.txt");
    let log = dir.path().join("log/activity_log.json");
    let mut content = std::fs::read_to_string(&log).unwrap();
    content.push_str("not json\n");
    std::fs::write(&log, content).unwrap();

    hostgate()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed audit entry at line 2"));
}

#[test]
fn concurrent_processes_append_whole_lines() {
    const PROCESSES: usize = 24;
    let dir = assert_fs::TempDir::new().unwrap();
    let root = dir.path().to_path_buf();

    let handles: Vec<_> = (0..PROCESSES)
        .map(|i| {
            let root = root.clone();
            std::thread::spawn(move || {
                let path = root.join(format!("file-{i:02}.txt")).display().to_string();
                hostgate()
                    .current_dir(&root)
                    .args(["file", "create", "--path", &path])
                    .assert()
                    .success();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = std::fs::read_to_string(root.join("log/activity_log.json")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), PROCESSES);
    for line in lines {
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(entry["activity"], "create");
    }
}
