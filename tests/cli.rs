use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn multitag(home: &Path, field: &Path) -> Command {
    let mut cmd = Command::cargo_bin("multitag").unwrap();
    cmd.env("MULTITAG_HOME", home)
        .env_remove("RUST_LOG")
        .arg("--field")
        .arg(field);
    cmd
}

#[test]
fn add_then_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");

    multitag(temp_dir.path(), &field)
        .args(["add", "Alpha", "Beta"])
        .assert()
        .success()
        .stdout("Alpha, Beta\n");

    assert_eq!(fs::read_to_string(&field).unwrap(), "Alpha, Beta");

    multitag(temp_dir.path(), &field)
        .arg("show")
        .assert()
        .success()
        .stdout("Alpha, Beta\n");
}

#[test]
fn show_json_lists_tags() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");
    fs::write(&field, "Alpha, Beta gamma\n").unwrap();

    multitag(temp_dir.path(), &field)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout("[\"Alpha\",\"Beta gamma\"]\n");
}

#[test]
fn show_missing_field_is_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("absent.txt");

    multitag(temp_dir.path(), &field)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout("[]\n");
    assert!(!field.exists());
}

#[test]
fn remove_takes_first_match_by_value() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");
    fs::write(&field, "Alpha, Beta, Alpha").unwrap();

    multitag(temp_dir.path(), &field)
        .args(["remove", "Alpha"])
        .assert()
        .success()
        .stdout("Beta, Alpha\n");

    assert_eq!(fs::read_to_string(&field).unwrap(), "Beta, Alpha");
}

#[test]
fn remove_absent_tag_leaves_field_alone() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");
    fs::write(&field, "Alpha\n").unwrap();

    multitag(temp_dir.path(), &field)
        .args(["remove", "Zeta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tag not found: Zeta"));

    assert_eq!(fs::read_to_string(&field).unwrap(), "Alpha\n");
}

#[test]
fn empty_tags_are_ignored_on_add() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");

    multitag(temp_dir.path(), &field)
        .args(["add", "", "Alpha"])
        .assert()
        .success()
        .stdout("Alpha\n")
        .stderr(predicate::str::contains("Ignoring empty tag"));
}

#[test]
fn writes_default_config_and_log_under_home() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");

    multitag(temp_dir.path(), &field)
        .arg("show")
        .assert()
        .success();

    let app_home = temp_dir.path().join("multitag");
    assert!(app_home.join("config").join("config.toml").exists());
    assert!(app_home.join("data").join("multitag.log").exists());
}

#[test]
fn explicit_config_with_bad_binding_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "[key_bindings]\ncommit = \"NotAKey\"\n").unwrap();

    multitag(temp_dir.path(), &field)
        .arg("--config")
        .arg(&config)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("commit"));
}

#[test]
fn theme_flag_accepts_presets_and_rejects_unknown_names() {
    let temp_dir = tempfile::tempdir().unwrap();
    let field = temp_dir.path().join("tags.txt");

    multitag(temp_dir.path(), &field)
        .args(["--theme", "green", "show"])
        .assert()
        .success();

    multitag(temp_dir.path(), &field)
        .args(["--theme", "nope", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Theme not found: nope"));
}
