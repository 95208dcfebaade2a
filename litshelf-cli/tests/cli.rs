// SPDX-License-Identifier: MIT

//! End-to-end tests against the built `litshelf` binary.

use std::path::Path;
use std::process::{Command, Output};

fn litshelf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_litshelf"))
        .args(args)
        .output()
        .expect("failed to spawn litshelf")
}

fn parse_json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("expected JSON output")
}

fn create(base_dir: &Path, name: &str, topic: &str) -> Output {
    litshelf(&[
        "create",
        "--name",
        name,
        "--topic",
        topic,
        "--base-dir",
        base_dir.to_str().unwrap(),
        "--notes",
        "Initial literature exploration",
    ])
}

#[test]
fn create_list_open_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let base_dir = tmp.path().join("projects");

    let out = create(&base_dir, "bladder_smc_strain", "cyclic strain response");
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let created = parse_json(&out.stdout);
    assert_eq!(created["status"], "created");
    let project_id = created["project_id"].as_str().unwrap();
    assert!(project_id.ends_with("_bladder_smc_strain"));
    assert!(Path::new(created["manifest_path"].as_str().unwrap()).exists());
    assert!(Path::new(created["database_path"].as_str().unwrap()).exists());

    let out = litshelf(&["list", "--base-dir", base_dir.to_str().unwrap()]);
    assert!(out.status.success());
    let items = parse_json(&out.stdout);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["valid"], true);
    assert_eq!(items[0]["project_id"], project_id);

    let project_dir = base_dir.join(project_id);
    let out = litshelf(&["open", "--project-dir", project_dir.to_str().unwrap()]);
    assert!(out.status.success());
    let opened = parse_json(&out.stdout);
    assert_eq!(opened["status"], "opened");
    assert_eq!(opened["project_id"], project_id);
}

#[test]
fn duplicate_name_exits_with_code_2() {
    let tmp = tempfile::tempdir().unwrap();
    let base_dir = tmp.path().join("projects");

    let first = create(&base_dir, "bladder_smc_strain", "x");
    assert!(first.status.success());

    let second = create(&base_dir, "bladder_smc_strain", "y");
    assert_eq!(second.status.code(), Some(2));

    let err = parse_json(&second.stderr);
    assert!(err["error"].as_str().unwrap().contains("Duplicate"));
    assert!(err["diagnostic"].is_string());
}

#[test]
fn open_missing_project_exits_with_code_2() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("projects").join("does_not_exist");

    let out = litshelf(&["open", "--project-dir", missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    let err = parse_json(&out.stderr);
    assert!(err["error"].as_str().unwrap().contains("manifest.json"));
}

#[test]
fn invalid_name_exits_with_code_2_and_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let base_dir = tmp.path().join("projects");

    let out = create(&base_dir, "Bad Name!", "x");
    assert_eq!(out.status.code(), Some(2));
    assert!(!base_dir.exists());
}
