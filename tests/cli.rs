use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

fn write_dataset(dir: &Path) {
    let mut attrs = String::from("a,b\n");
    for v in 0..6 {
        attrs.push_str(if v < 3 { "1,0\n" } else { "0,1\n" });
    }
    fs::write(dir.join("attr.csv"), attrs).unwrap();
    fs::write(dir.join("edges.txt"), "0 1\n1 2\n2 0\n3 4\n4 5\n5 3\n").unwrap();
}

fn sac1(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sac1").unwrap();
    cmd.current_dir(dir.path())
        .arg("--attributes")
        .arg(dir.path().join("attr.csv"))
        .arg("--edges")
        .arg(dir.path().join("edges.txt"))
        .arg("--output-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn test_two_triangles() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());

    sac1(&dir).arg("0.5").assert().success();

    let output = fs::read_to_string(dir.path().join("communities_5.txt")).unwrap();
    let mut lines: Vec<Vec<u32>> = output
        .lines()
        .map(|line| {
            let mut ids: Vec<u32> = line.split(", ").map(|id| id.parse().unwrap()).collect();
            ids.sort();
            ids
        })
        .collect();
    lines.sort();
    assert_eq!(lines, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert!(output.ends_with('\n'));
    assert!(dir.path().join("logs").join("default.log").exists());
}

#[test]
fn test_alpha_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());

    let assert = sac1(&dir).arg("1.5").assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Alpha should be between 0 and 1."));
    assert!(!dir.path().join("communities_1.5.txt").exists());

    sac1(&dir).arg("-0.5").assert().failure();
    assert!(!dir.path().join("communities_-0.5.txt").exists());
    // A rejected run leaves no log directory behind.
    assert!(!dir.path().join("logs").exists());
}

#[test]
fn test_wrong_argument_count() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());

    sac1(&dir).assert().failure();
    sac1(&dir).arg("0.5").arg("0.7").assert().failure();
    assert!(!dir.path().join("communities_5.txt").exists());
}

#[test]
fn test_config_file_and_seed() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path());
    fs::write(dir.path().join("run.yaml"), "seed: 11\nmax_passes: 5\n").unwrap();

    sac1(&dir)
        .arg("--config")
        .arg(dir.path().join("run.yaml"))
        .arg("--seed")
        .arg("3")
        .arg("--parallel")
        .arg("0")
        .assert()
        .success();
    let output = fs::read_to_string(dir.path().join("communities_0.txt")).unwrap();
    assert_eq!(output.lines().count(), 2);
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let assert = sac1(&dir).arg("1").assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("failed to open attribute file"));
    assert!(!dir.path().join("communities_1.txt").exists());
}
