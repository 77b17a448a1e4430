//! Catalogue-level errors.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogueError {
    #[error("ambiguous catalogue: {} patterns match \"{sentence}\": {}", patterns.len(), patterns.join(", "))]
    #[diagnostic(
        code(gari::catalogue::ambiguous),
        help(
            "Exactly one pattern may match a candidate tree. Tighten one of the \
             listed patterns (a stricter node test or an agreement filter) so that \
             their shapes no longer overlap."
        )
    )]
    Ambiguous {
        sentence: String,
        patterns: Vec<String>,
    },

    #[error("duplicate pattern id \"{id}\"")]
    #[diagnostic(
        code(gari::catalogue::duplicate_pattern_id),
        help("Pattern ids name patterns in ambiguity reports and must be unique.")
    )]
    DuplicatePatternId { id: String },
}

/// Result type for catalogue operations.
pub type CatalogueResult<T> = std::result::Result<T, CatalogueError>;
