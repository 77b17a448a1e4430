//! Declaration errors for sentence patterns.
//!
//! These are programming defects in a pattern catalogue, reported when a
//! pattern is built and therefore before any sentence is parsed. A pattern
//! that simply does not fit a tree is never an error; see
//! [`Matcher::attempt`](super::Matcher::attempt).

use miette::Diagnostic;
use thiserror::Error;

use crate::tree::{CharacteristicsKind, FeatureKind};

#[derive(Debug, Error, Diagnostic)]
pub enum PatternError {
    #[error("pattern \"{pattern}\": {category} readings have no {feature} field")]
    #[diagnostic(
        code(gari::pattern::invalid_feature),
        help(
            "The expectation names a grammatical feature that does not exist on this \
             word class. Check CharacteristicsKind::fields() for the fields each \
             class carries, or use the typed builders (noun(), verb(), adjective(), ...) \
             which only offer valid fields."
        )
    )]
    InvalidFeature {
        pattern: String,
        category: CharacteristicsKind,
        feature: FeatureKind,
    },

    #[error("pattern \"{pattern}\": slot {slot} was not declared by this builder")]
    #[diagnostic(
        code(gari::pattern::unknown_slot),
        help(
            "A child was declared under a parent slot that this PatternBuilder never \
             handed out. Slots are only valid within the builder that created them."
        )
    )]
    UnknownSlot { pattern: String, slot: usize },

    #[error("pattern \"{pattern}\" never declares a root")]
    #[diagnostic(
        code(gari::pattern::missing_root),
        help("Every pattern must start with PatternBuilder::root(...).")
    )]
    MissingRoot { pattern: String },
}

/// Result type for pattern construction.
pub type PatternResult<T> = std::result::Result<T, PatternError>;
