//! Diagnostic error types for gari.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! so a broken catalogue or a bad fixture file reports an error code and a hint
//! on how to fix it. A sentence that no pattern recognizes is not an error;
//! that outcome is `Ok(None)`.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub use crate::catalogue::error::CatalogueError;
pub use crate::matcher::error::PatternError;

/// Top-level error type for gari.
///
/// Each variant wraps a subsystem-specific error, preserving its diagnostic
/// code and help text.
#[derive(Debug, Error, Diagnostic)]
pub enum GariError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Analyzer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    #[error("failed to read analyzer fixture {path}")]
    #[diagnostic(
        code(gari::analyzer::io),
        help("Check that the fixture file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed analyzer fixture: {message}")]
    #[diagnostic(
        code(gari::analyzer::fixture),
        help(
            "A fixture is a JSON object mapping each sentence to an array of \
             candidate trees. Every tree node needs \"content\"; readings carry \
             \"lemma\", \"part_of_speech\" and a \"characteristics\" object tagged \
             with \"kind\"."
        )
    )]
    Fixture { message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(
        code(gari::config::io),
        help("Check that the config file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parser config: {message}")]
    #[diagnostic(
        code(gari::config::toml),
        help(
            "Known keys are `fixtures` (array of paths), `log_skeletons` (bool) \
             and `catalogue` (\"russian\" or \"empty\")."
        )
    )]
    Toml { message: String },
}

/// Convenience result type for gari operations.
pub type GariResult<T> = std::result::Result<T, GariError>;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = std::result::Result<T, AnalyzerError>;

/// Result type for config loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
