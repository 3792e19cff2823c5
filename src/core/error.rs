//! Error handling for the memory builder
//!
//! This module provides the strongly-typed error enum used by the resolution
//! core and the user-friendly reporting layer used by the CLI. The error system
//! follows two principles:
//! 1. **Strongly-typed errors** so callers can match on the exact failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`BuilderError`] - Enumerated error kinds for every fatal build failure
//! - [`ErrorContext`] - Wrapper that adds suggestions and details for display
//!
//! Every error is fatal to the build that raised it. Nothing in this crate
//! retries; retry policy belongs to the caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use memory_builder::core::{BuilderError, user_friendly_error};
//!
//! fn lookup() -> Result<(), BuilderError> {
//!     Err(BuilderError::NodeNotFound {
//!         name: "DEVELOPER".to_string(),
//!     })
//! }
//!
//! if let Err(e) = lookup() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for build operations.
///
/// # Error Categories
///
/// ## Resolution
/// - [`NodeNotFound`] - Requested or inherited node has no backing definition
/// - [`CircularDependency`] - The inheritance graph loops back on itself
/// - [`InvalidRelationType`] - A relation uses a type outside the allow-list
/// - [`InvalidNodeDefinition`] - A definition document has the wrong shape
/// - [`NodeReadError`] - A definition file exists but could not be read or parsed
///
/// ## Output
/// - [`OutputWriteError`] - Directory creation, open, write, sync or rename failed
/// - [`InvalidInputShape`] - The payload handed to the writer is not an object
/// - [`MarkerNotFound`] - An injection target lacks its start/end markers
///
/// ## Configuration
/// - [`ConfigNotFound`] - The builder configuration file is missing
/// - [`ConfigParseError`] - The configuration file is not valid YAML/TOML
/// - [`ConfigValidationError`] - Required configuration keys are missing
///
/// [`NodeNotFound`]: BuilderError::NodeNotFound
/// [`CircularDependency`]: BuilderError::CircularDependency
/// [`InvalidRelationType`]: BuilderError::InvalidRelationType
/// [`InvalidNodeDefinition`]: BuilderError::InvalidNodeDefinition
/// [`NodeReadError`]: BuilderError::NodeReadError
/// [`OutputWriteError`]: BuilderError::OutputWriteError
/// [`InvalidInputShape`]: BuilderError::InvalidInputShape
/// [`MarkerNotFound`]: BuilderError::MarkerNotFound
/// [`ConfigNotFound`]: BuilderError::ConfigNotFound
/// [`ConfigParseError`]: BuilderError::ConfigParseError
/// [`ConfigValidationError`]: BuilderError::ConfigValidationError
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// No definition exists for the requested name in any searched location
    #[error("Node not found: {name}")]
    NodeNotFound {
        /// The name that was searched for
        name: String,
    },

    /// The resolution stack was revisited
    ///
    /// `chain` is the full traversal path joined with ` → `, starting and
    /// ending with the same name (e.g. `A → B → A`).
    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// Cycle path in traversal order
        chain: String,
    },

    /// A relation declared a type that is not in the configured allow-list
    #[error("Invalid relation type '{relation_type}' in '{node}'. Valid types: {}", .allowed.join(", "))]
    InvalidRelationType {
        /// The offending relation type tag
        relation_type: String,
        /// Node that declared the relation
        node: String,
        /// The legal relation types
        allowed: Vec<String>,
    },

    /// A definition document does not have the expected structure
    #[error("Invalid definition for '{name}': {reason}")]
    InvalidNodeDefinition {
        /// Node name being loaded
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// A definition file could not be read or parsed
    #[error("Failed to read definition {path}: {reason}")]
    NodeReadError {
        /// File that failed
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// Persisting an artifact failed at some step
    #[error("Failed to write {path} output file: {reason}")]
    OutputWriteError {
        /// Resolved destination path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The payload to serialize is not a well-formed object
    #[error("{what} must be an object")]
    InvalidInputShape {
        /// Which payload was malformed (e.g. "Instructions")
        what: String,
    },

    /// An injection target does not contain the expected delimiters
    #[error("Markers for '{marker}' not found in {path}")]
    MarkerNotFound {
        /// File that was searched
        path: String,
        /// Marker name (e.g. "instructions")
        marker: String,
    },

    /// Configuration file is missing
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was tried
        path: String,
    },

    /// Configuration file is syntactically invalid
    #[error("Failed to parse configuration {file}: {reason}")]
    ConfigParseError {
        /// Configuration file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration is missing required content
    #[error("Invalid configuration: {reason}")]
    ConfigValidationError {
        /// What is missing or malformed
        reason: String,
    },

    /// Catch-all used by [`user_friendly_error`] for foreign errors
    #[error("{message}")]
    Other {
        /// Full error message including its cause chain
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Suggestions are actionable steps, details explain what the error means.
/// Both are optional and rendered by [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying builder error
    pub error: BuilderError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BuilderError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`BuilderError`] anywhere in the cause chain, so errors wrapped
/// with `anyhow::Context` still get tailored suggestions. Anything else is
/// reported as [`BuilderError::Other`] with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(builder_error) = error.chain().find_map(|e| e.downcast_ref::<BuilderError>()) {
        return create_error_context(builder_error.clone());
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(BuilderError::Other {
        message,
    })
}

fn create_error_context(error: BuilderError) -> ErrorContext {
    match &error {
        BuilderError::NodeNotFound {
            name,
        } => {
            let file = name.to_lowercase();
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Create '{file}.yaml' in the domain or common directory, or fix the name in the inheriting node's relations"
                ))
                .with_details("Definitions are looked up in the domain directory first, then the common directory")
        }
        BuilderError::CircularDependency {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Remove one of the 'inherits' relations in the reported chain")
            .with_details("Inheritance must form a tree or DAG; a node cannot inherit from itself through any path"),
        BuilderError::InvalidRelationType {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use one of the listed relation types or add the type to 'settings.relations'"),
        BuilderError::InvalidNodeDefinition {
            ..
        } => ErrorContext::new(error).with_details(
            "A definition file must have a single top-level key holding 'description' and optional 'relations'",
        ),
        BuilderError::OutputWriteError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check permissions and free space for the output directory, then rerun the build"),
        BuilderError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass --config <file> or create builder.yaml in the working directory"),
        BuilderError::ConfigValidationError {
            ..
        } => ErrorContext::new(error)
            .with_details("Required keys: build.path.profiles, build.path.instructions, settings.profile, settings.version, settings.relations"),
        BuilderError::MarkerNotFound {
            marker,
            ..
        } => {
            let hint = format!(
                "Add '<!-- framework-{marker}-start -->' and '<!-- framework-{marker}-end -->' to the file"
            );
            ErrorContext::new(error).with_suggestion(hint)
        }
        _ => ErrorContext::new(error),
    }
}
