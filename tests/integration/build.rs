use memory_builder::builder::MemoryBuilder;
use memory_builder::core::NodeName;
use memory_builder::output::Timezone;
use memory_builder::test_utils::{BuilderFixture, DefinitionFixture};
use serde_json::Value;
use std::fs;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_build_writes_ordered_profiles() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();
    let config = fixture.load_config().unwrap();

    MemoryBuilder::new(&config).build_to(None, false, &mut Vec::new()).unwrap();

    let raw = fs::read_to_string(fixture.root().join("out/memory.json")).unwrap();
    let developer = raw.find("\"DEVELOPER\"").unwrap();
    let engineer = raw.find("\"ENGINEER\"").unwrap();
    let common = raw.find("\"COMMON\":{").unwrap();
    assert!(developer < engineer && engineer < common, "unexpected order: {raw}");
    assert!(raw.ends_with(r#""version":"1.0.0"}"#));

    let profiles = read_json(&fixture.root().join("out/memory.json"));
    assert_eq!(profiles["profiles"]["DEVELOPER"]["inherits"], serde_json::json!(["ENGINEER"]));
    assert_eq!(profiles["profiles"]["ENGINEER"]["inherits"], serde_json::json!(["COMMON"]));
    assert!(profiles["profiles"]["COMMON"].get("inherits").is_none());
}

#[test]
fn test_build_substitutes_settings_placeholders() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();
    let config = fixture.load_config().unwrap();

    MemoryBuilder::new(&config).build_to(None, false, &mut Vec::new()).unwrap();

    let profiles = read_json(&fixture.root().join("out/memory.json"));
    let nodes = &profiles["profiles"];
    assert_eq!(nodes["DEVELOPER"]["practices"][0], "Ship framework 1.0.0");
    assert_eq!(nodes["ENGINEER"]["diary"], "Write to docs/diary");
    assert_eq!(nodes["COMMON"]["observations"][0], "Keep DEVELOPER notes");

    let instructions = read_json(&fixture.root().join("out/instructions.json"));
    assert_eq!(
        instructions["instructions"]["LOCAL"]["steps"][0],
        "Read framework-initialization"
    );
}

#[test]
fn test_container_build_uses_container_instructions() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();
    let config = fixture.load_config().unwrap();

    MemoryBuilder::new(&config).build_to(Some("engineer"), true, &mut Vec::new()).unwrap();

    let instructions = read_json(&fixture.root().join("out/instructions.json"));
    let nodes = instructions["instructions"].as_object().unwrap();
    assert_eq!(nodes.keys().collect::<Vec<_>>(), vec!["CONTAINER"]);

    let profiles = read_json(&fixture.root().join("out/memory.json"));
    assert!(profiles["profiles"].get("DEVELOPER").is_none());
    assert!(profiles["profiles"].get("ENGINEER").is_some());
}

#[test]
fn test_repeated_builds_are_byte_identical() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();
    let config = fixture.load_config().unwrap();
    let builder = MemoryBuilder::new(&config);
    let path = fixture.root().join("out/memory.json");

    builder.build_to(None, false, &mut Vec::new()).unwrap();
    let first = fs::read(&path).unwrap();
    builder.build_to(None, false, &mut Vec::new()).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_domain_definition_shadows_common() {
    let fixture = BuilderFixture::standard().unwrap();
    fixture
        .add_definition(&DefinitionFixture::profile(
            "common",
            "DEVELOPER",
            "DEVELOPER:\n  description: Common developer\n",
        ))
        .unwrap();
    let config = fixture.load_config().unwrap();

    let compiled = MemoryBuilder::new(&config).compile(None, false).unwrap();
    let (_, developer) = &compiled.profiles.entries()[0];
    assert_eq!(developer.description, "Developer profile");
    assert_eq!(compiled.profiles.len(), 3);
}

#[test]
fn test_shared_ancestor_appears_once() {
    let fixture = BuilderFixture::standard().unwrap();
    fixture
        .add_definition(&DefinitionFixture::profile(
            "domain",
            "ARCHITECT",
            r"ARCHITECT:
  description: Architect
  relations:
    - type: inherits
      target: DEVELOPER
    - type: inherits
      target: COMMON
",
        ))
        .unwrap();
    let config = fixture.load_config().unwrap();

    let compiled = MemoryBuilder::new(&config).compile(Some("ARCHITECT"), false).unwrap();
    assert_eq!(compiled.profiles.len(), 4);

    let position = |name: &str| compiled.profiles.position(&NodeName::new(name)).unwrap();
    assert_eq!(position("ARCHITECT"), 0);
    assert!(position("DEVELOPER") < position("ENGINEER"));
    assert!(position("ENGINEER") < position("COMMON"));
}

#[test]
fn test_build_injects_into_skill() {
    let fixture = BuilderFixture::standard()
        .unwrap()
        .with_file_outputs()
        .unwrap()
        .with_skill()
        .unwrap();
    let config = fixture.load_config().unwrap();
    let builder = MemoryBuilder::new(&config);

    let status = builder.build_to(None, false, &mut Vec::new()).unwrap();
    let skill = fs::read_to_string(fixture.skill_path()).unwrap();
    let profiles = fs::read_to_string(fixture.root().join("out/memory.json")).unwrap();
    let instructions = fs::read_to_string(fixture.root().join("out/instructions.json")).unwrap();

    assert!(skill.contains(&format!(
        "<!-- framework-methodology-start -->\n```json\n{profiles}\n```\n<!-- framework-methodology-end -->"
    )));
    assert!(skill.contains(&format!(
        "<!-- framework-instructions-start -->\n```json\n{instructions}\n```\n<!-- framework-instructions-end -->"
    )));
    assert!(skill.starts_with("# Framework Methodology"));
    assert_eq!(status.paths.map(|p| p.len()), Some(3));

    builder.build_to(None, false, &mut Vec::new()).unwrap();
    assert_eq!(fs::read_to_string(fixture.skill_path()).unwrap(), skill);
}

#[test]
fn test_stdout_destinations_print_pretty_artifacts() {
    let fixture = BuilderFixture::standard().unwrap();
    let config = fixture.load_config().unwrap();

    let mut console = Vec::new();
    MemoryBuilder::new(&config).build_to(None, false, &mut console).unwrap();
    let printed = String::from_utf8(console).unwrap();

    assert!(printed.starts_with("{\n  \"instructions\": {"));
    assert!(printed.contains("{\n  \"profiles\": {"));
    assert!(printed.contains("\"profile\": \"DEVELOPER\""));
}

#[test]
fn test_environment_overrides_settings() {
    let fixture = BuilderFixture::standard().unwrap();

    let config = fixture
        .load_config_with(&[
            ("FRAMEWORK_CONVERSATIONS", "/srv/conversations"),
            ("FRAMEWORK_TIMEZONE", "local"),
        ])
        .unwrap();

    assert_eq!(config.settings.timezone, Timezone::Local);
    assert_eq!(
        config.settings.values()["path"]["documentation"]["conversations"],
        "/srv/conversations"
    );
    assert_eq!(config.settings.values()["path"]["documentation"]["diary"], "docs/diary");
}
