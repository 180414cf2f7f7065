//! End-to-end runs of the `sw` binary through every subcommand.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sw() -> Command {
    Command::cargo_bin("sw").unwrap()
}

/// Create a temp directory holding a freshly-initialized demo save.
fn demo_save() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("world.json");
    sw().args(["init", file.to_str().unwrap()])
        .assert()
        .success();
    (dir, file)
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_a_save_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("world.json");
    sw().args(["init", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created demo world"));
    assert!(file.exists());
}

#[test]
fn init_refuses_to_overwrite() {
    let (_dir, file) = demo_save();
    sw().args(["init", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_the_world() {
    let (_dir, file) = demo_save();
    sw().args(["validate", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Homestead")
                .and(predicate::str::contains("locations: 3"))
                .and(predicate::str::contains("alice, bob")),
        );
}

#[test]
fn validate_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(&file, "{ not json").unwrap();
    sw().args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn validate_rejects_a_dangling_location() {
    let (_dir, file) = demo_save();
    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    value["world"]["characters"]["alice"]["location"] = serde_json::json!("nowhere");
    fs::write(&file, serde_json::to_string(&value).unwrap()).unwrap();

    sw().args(["validate", file.to_str().unwrap()])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// actions
// ---------------------------------------------------------------------------

#[test]
fn actions_lists_the_menu() {
    let (_dir, file) = demo_save();
    sw().args(["actions", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("take apple")
                .and(predicate::str::contains("Pick up the apple"))
                .and(predicate::str::contains("go north"))
                .and(predicate::str::contains("open closet")),
        );
}

#[test]
fn actions_honors_the_actor_flag() {
    let (_dir, file) = demo_save();
    sw().args(["actions", file.to_str().unwrap(), "--actor", "bob"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("take cider")
                .and(predicate::str::contains("take apple").not()),
        );
}

#[test]
fn actions_rejects_unknown_actor() {
    let (_dir, file) = demo_save();
    sw().args(["actions", file.to_str().unwrap(), "--actor", "eve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such actor"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_executes_commands_and_saves() {
    let (_dir, file) = demo_save();
    sw().args(["play", file.to_str().unwrap()])
        .write_stdin("take apple\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You take the apple.")
                .and(predicate::str::contains("Saved to")),
        );

    // The take survived in the save file.
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert!(value["world"]["characters"]["alice"]["inventory"]
        .get("apple")
        .is_some());
}

#[test]
fn play_reports_unrecognized_input() {
    let (_dir, file) = demo_save();
    sw().args(["play", file.to_str().unwrap()])
        .write_stdin("xyzzy\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("xyzzy"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_drives_the_agents() {
    let (_dir, file) = demo_save();
    sw().args(["run", file.to_str().unwrap(), "--steps", "4"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("alice")
                .and(predicate::str::contains("bob"))
                .and(predicate::str::contains("Saved to")),
        );
}
