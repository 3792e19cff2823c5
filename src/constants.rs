//! Global constants used throughout the memory builder.
//!
//! File names, reserved keys, marker templates and environment variable
//! names live here so they are discoverable in one place.

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "builder.yaml";

/// Destination value that selects the console instead of a file.
pub const STDOUT_DESTINATION: &str = "stdout";

/// The only relation type the resolver acts on.
pub const INHERITS_RELATION: &str = "inherits";

/// Node key hoisted to the assembled node, never treated as a section.
pub const DESCRIPTION_KEY: &str = "description";

/// Node key holding declared relations, never copied into the assembled node.
pub const RELATIONS_KEY: &str = "relations";

/// Extensions tried, in order, when looking up a definition file.
pub const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Root prefix of every configuration placeholder.
pub const SETTINGS_PREFIX: &str = "settings";

/// Settings key whose entries register short plugin and skill aliases.
pub const PLUGINS_KEY: &str = "plugins";

/// Wrapper key for the profile artifact.
pub const PROFILES_KEY: &str = "profiles";

/// Wrapper key for the instructions artifact.
pub const INSTRUCTIONS_KEY: &str = "instructions";

/// Instructions root used when building for a container.
pub const CONTAINER_INSTRUCTIONS: &str = "CONTAINER";

/// Instructions root used for local builds.
pub const LOCAL_INSTRUCTIONS: &str = "LOCAL";

/// SKILL.md marker name for the instructions artifact.
pub const INSTRUCTIONS_MARKER: &str = "instructions";

/// SKILL.md marker name for the profiles artifact.
pub const METHODOLOGY_MARKER: &str = "methodology";

/// Overrides `settings.profile`.
pub const ENV_PROFILE: &str = "FRAMEWORK_PROFILE";

/// Overrides `settings.timezone`.
pub const ENV_TIMEZONE: &str = "FRAMEWORK_TIMEZONE";

/// Overrides `settings.path.documentation.conversations`.
pub const ENV_CONVERSATIONS: &str = "FRAMEWORK_CONVERSATIONS";

/// Overrides `settings.path.documentation.diary`.
pub const ENV_DIARY: &str = "FRAMEWORK_DIARY";

/// Overrides `build.output.profiles`.
pub const ENV_OUTPUT: &str = "FRAMEWORK_OUTPUT";
