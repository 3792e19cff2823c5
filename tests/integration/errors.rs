use memory_builder::builder::MemoryBuilder;
use memory_builder::config::BuilderConfig;
use memory_builder::core::BuilderError;
use memory_builder::test_utils::{BuilderFixture, DefinitionFixture};
use std::fs;

fn compile_error(fixture: &BuilderFixture, profile: &str) -> BuilderError {
    let config = fixture.load_config().unwrap();
    let err = MemoryBuilder::new(&config).compile(Some(profile), false).unwrap_err();
    err.downcast_ref::<BuilderError>().cloned().unwrap_or_else(|| panic!("unexpected error: {err:#}"))
}

fn inherits(name: &str, targets: &[&str]) -> String {
    let mut content = format!("{name}:\n  description: {name} node\n  relations:\n");
    for target in targets {
        content.push_str(&format!("    - type: inherits\n      target: {target}\n"));
    }
    content
}

#[test]
fn test_two_node_cycle() {
    let fixture = BuilderFixture::new().unwrap();
    fixture.add_definition(&DefinitionFixture::profile("common", "A", &inherits("A", &["B"]))).unwrap();
    fixture.add_definition(&DefinitionFixture::profile("common", "B", &inherits("B", &["A"]))).unwrap();

    assert_eq!(
        compile_error(&fixture, "A"),
        BuilderError::CircularDependency {
            chain: "A → B → A".to_string()
        }
    );
}

#[test]
fn test_cycle_reached_from_outside() {
    let fixture = BuilderFixture::new().unwrap();
    for (name, target) in [("W", "X"), ("X", "Y"), ("Y", "Z"), ("Z", "X")] {
        fixture
            .add_definition(&DefinitionFixture::profile("domain", name, &inherits(name, &[target])))
            .unwrap();
    }

    assert_eq!(
        compile_error(&fixture, "W"),
        BuilderError::CircularDependency {
            chain: "X → Y → Z → X".to_string()
        }
    );
}

#[test]
fn test_missing_ancestor() {
    let fixture = BuilderFixture::standard().unwrap();
    fs::remove_file(fixture.root().join("profiles/common/common.yaml")).unwrap();

    let err = compile_error(&fixture, "DEVELOPER");
    assert_eq!(
        err,
        BuilderError::NodeNotFound {
            name: "COMMON".to_string()
        }
    );
    assert_eq!(err.to_string(), "Node not found: COMMON");
}

#[test]
fn test_unknown_relation_type() {
    let fixture = BuilderFixture::standard().unwrap();
    fixture
        .add_definition(&DefinitionFixture::profile(
            "domain",
            "REVIEWER",
            r"REVIEWER:
  description: Reviewer
  relations:
    - type: inherits
      target: COMMON
    - type: extends
      target: ENGINEER
",
        ))
        .unwrap();

    let err = compile_error(&fixture, "REVIEWER");
    assert_eq!(
        err.to_string(),
        "Invalid relation type 'extends' in 'REVIEWER'. Valid types: inherits, references"
    );
}

#[test]
fn test_malformed_definition() {
    let fixture = BuilderFixture::standard().unwrap();
    fixture
        .add_definition(&DefinitionFixture::profile(
            "domain",
            "BROKEN",
            "BROKEN:\n  relations: []\n",
        ))
        .unwrap();

    assert!(matches!(
        compile_error(&fixture, "BROKEN"),
        BuilderError::InvalidNodeDefinition { .. }
    ));
}

#[test]
fn test_failed_build_writes_nothing() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap();
    fs::remove_file(fixture.root().join("instructions/common/local.yaml")).unwrap();
    let config = fixture.load_config().unwrap();

    assert!(MemoryBuilder::new(&config).build_to(None, false, &mut Vec::new()).is_err());
    assert!(!fixture.root().join("out/memory.json").exists());
    assert!(!fixture.root().join("out/instructions.json").exists());
}

#[test]
fn test_missing_skill_markers() {
    let fixture = BuilderFixture::standard().unwrap().with_file_outputs().unwrap().with_skill().unwrap();
    fs::write(fixture.skill_path(), "# No markers here\n").unwrap();
    let config = fixture.load_config().unwrap();

    let err = MemoryBuilder::new(&config).build_to(None, false, &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuilderError>(),
        Some(BuilderError::MarkerNotFound { .. })
    ));
    assert_eq!(fs::read_to_string(fixture.skill_path()).unwrap(), "# No markers here\n");
}

#[test]
fn test_invalid_configuration() {
    let fixture = BuilderFixture::standard().unwrap();
    fs::write(
        fixture.config_path(),
        "build:\n  path: {}\nsettings:\n  profile: DEVELOPER\n  version: 1.0.0\n  relations: [inherits]\n",
    )
    .unwrap();

    let err = BuilderConfig::load(&fixture.config_path()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigValidationError { .. }));
    assert!(err.to_string().contains("build.path.profiles.domain"));
}

#[test]
fn test_missing_configuration() {
    let fixture = BuilderFixture::new().unwrap();
    let err = BuilderConfig::load(&fixture.root().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigNotFound { .. }));
}
