use assert_cmd::Command;
use memory_builder::test_utils::BuilderFixture;
use predicates::prelude::*;

const OVERRIDE_VARIABLES: &[&str] = &[
    "FRAMEWORK_PROFILE",
    "FRAMEWORK_TIMEZONE",
    "FRAMEWORK_CONVERSATIONS",
    "FRAMEWORK_DIARY",
    "FRAMEWORK_OUTPUT",
    "MEMORY_BUILDER_CONFIG",
];

/// The binary, run from the fixture root with a clean override environment.
fn memory_builder(fixture: &BuilderFixture) -> Command {
    let mut cmd = Command::cargo_bin("memory-builder").unwrap();
    cmd.current_dir(fixture.root());
    for variable in OVERRIDE_VARIABLES {
        cmd.env_remove(variable);
    }
    cmd
}

#[test]
fn test_build_writes_artifacts_and_prints_status() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();

    memory_builder(&fixture)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"profile\": \"DEVELOPER\""))
        .stdout(predicate::str::contains("\"timestamp\""))
        .stdout(predicate::str::contains("memory.json"));

    assert!(fixture.root().join("out/memory.json").exists());
    assert!(fixture.root().join("out/instructions.json").exists());
}

#[test]
fn test_build_output_flag_overrides_destination() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();

    memory_builder(&fixture)
        .args(["build", "--profile", "engineer", "--output", "custom/profiles.json"])
        .assert()
        .success();

    let written = std::fs::read_to_string(fixture.root().join("custom/profiles.json")).unwrap();
    assert!(written.starts_with(r#"{"profiles":{"ENGINEER""#));
    assert!(!fixture.root().join("out/memory.json").exists());
}

#[test]
fn test_build_to_stdout() {
    let fixture = BuilderFixture::standard().unwrap();

    memory_builder(&fixture)
        .args(["build", "--container"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CONTAINER\": {"))
        .stdout(predicate::str::contains("\"profiles\": {"));
}

#[test]
fn test_explicit_config_path() {
    let fixture = BuilderFixture::standard().unwrap();
    let config = fixture.config_path();

    Command::cargo_bin("memory-builder")
        .unwrap()
        .current_dir(std::env::temp_dir())
        .env_remove("FRAMEWORK_PROFILE")
        .args(["--config", config.to_str().unwrap(), "validate", "-p", "ENGINEER"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ENGINEER resolves to 2 profile(s)"))
        .stdout(predicate::str::contains("LOCAL resolves to 1 instruction set(s)"));
}

#[test]
fn test_validate_quiet_prints_nothing() {
    let fixture = BuilderFixture::standard().unwrap();

    memory_builder(&fixture)
        .args(["--quiet", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_status_honours_profile_override() {
    let fixture = BuilderFixture::standard().unwrap();

    memory_builder(&fixture)
        .env("FRAMEWORK_PROFILE", "ENGINEER")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"profile\": \"ENGINEER\""))
        .stdout(predicate::str::contains("\"zone\": \"UTC\""))
        .stdout(predicate::str::contains("\"paths\"").not());
}

#[test]
fn test_missing_node_fails() {
    let fixture = BuilderFixture::standard().unwrap();

    memory_builder(&fixture)
        .args(["build", "-p", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Node not found: MISSING"));
}

#[test]
fn test_missing_config_fails() {
    let fixture = BuilderFixture::new().unwrap();
    std::fs::remove_file(fixture.config_path()).unwrap();

    memory_builder(&fixture)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
