//! Ordered pattern collections.
//!
//! A [`Catalogue`] is the static configuration the parser consults: every
//! pattern is tried against every candidate tree, and the catalogue is
//! correct only if at most one of them ever matches a given tree.

pub mod error;
pub mod russian;

use std::collections::HashSet;

use crate::matcher::Pattern;

pub use error::{CatalogueError, CatalogueResult};

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    patterns: Vec<Pattern>,
}

impl Catalogue {
    /// Collect `patterns` in order, rejecting duplicate ids.
    pub fn new(patterns: impl IntoIterator<Item = Pattern>) -> CatalogueResult<Self> {
        let patterns: Vec<Pattern> = patterns.into_iter().collect();
        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.id()) {
                return Err(CatalogueError::DuplicatePatternId {
                    id: pattern.id().to_string(),
                });
            }
        }
        Ok(Self { patterns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::id).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::PatternBuilder;
    use crate::matcher::expect::noun;

    fn trivial(id: &str) -> Pattern {
        let mut p = PatternBuilder::new(id);
        p.root(noun());
        p.build(|_| None).unwrap()
    }

    #[test]
    fn keeps_declaration_order() {
        let catalogue = Catalogue::new([trivial("b"), trivial("a"), trivial("c")]).unwrap();
        assert_eq!(catalogue.ids(), vec!["b", "a", "c"]);
        assert_eq!(catalogue.len(), 3);
        assert!(catalogue.get("a").is_some());
        assert!(catalogue.get("z").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalogue::new([trivial("a"), trivial("b"), trivial("a")]).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicatePatternId { ref id } if id == "a"));
    }

    #[test]
    fn ambiguity_message_lists_every_pattern() {
        let err = CatalogueError::Ambiguous {
            sentence: "Сократ стар".into(),
            patterns: vec!["first".into(), "second".into()],
        };
        let message = err.to_string();
        assert!(message.contains("2 patterns"));
        assert!(message.contains("first, second"));
    }
}
