//! The seam to the external sentence analyzer.
//!
//! Morphological and syntactic analysis of Russian is not part of this
//! crate. A [`SentenceAnalyzer`] turns text into an ordered list of
//! candidate [`DependencyTree`]s; the parser tries them in that order.
//! [`FixtureAnalyzer`] serves pre-recorded analyses from JSON, which is
//! how tests and offline tooling drive the parser.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::tree::{DependencyTree, SentenceElement};

/// Produces candidate parses of one sentence.
///
/// An empty result is valid and means the analyzer found no parse.
pub trait SentenceAnalyzer: Send + Sync {
    fn parse(&self, text: &str) -> AnalyzerResult<Vec<DependencyTree>>;
}

impl<F> SentenceAnalyzer for F
where
    F: Fn(&str) -> AnalyzerResult<Vec<DependencyTree>> + Send + Sync,
{
    fn parse(&self, text: &str) -> AnalyzerResult<Vec<DependencyTree>> {
        self(text)
    }
}

/// Pre-recorded analyses keyed by sentence text.
///
/// Fixture JSON maps each sentence to its candidate trees:
///
/// ```json
/// {
///   "Сократ стар": [
///     {
///       "content": "стар",
///       "readings": [{ "lemma": "старый", "part_of_speech": "adjective",
///                      "characteristics": { "kind": "adjective", "form": "short",
///                                           "degree": "attributive" } }],
///       "children": [ ... ]
///     }
///   ]
/// }
/// ```
///
/// Lookup ignores case and surrounding whitespace. Unknown sentences
/// yield no candidates.
#[derive(Debug, Clone, Default)]
pub struct FixtureAnalyzer {
    sentences: HashMap<String, Vec<SentenceElement>>,
}

fn key(text: &str) -> String {
    text.trim().to_lowercase()
}

impl FixtureAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the candidate trees for `text`, replacing any earlier entry.
    pub fn insert(&mut self, text: &str, candidates: Vec<SentenceElement>) {
        self.sentences.insert(key(text), candidates);
    }

    pub fn from_json_str(json: &str) -> AnalyzerResult<Self> {
        let mut analyzer = Self::new();
        analyzer.extend_from_json_str(json)?;
        Ok(analyzer)
    }

    /// Merge another fixture document into this one.
    pub fn extend_from_json_str(&mut self, json: &str) -> AnalyzerResult<()> {
        let parsed: HashMap<String, Vec<SentenceElement>> =
            serde_json::from_str(json).map_err(|e| AnalyzerError::Fixture {
                message: e.to_string(),
            })?;
        for (text, candidates) in parsed {
            self.insert(&text, candidates);
        }
        Ok(())
    }

    pub fn load(path: &Path) -> AnalyzerResult<Self> {
        let mut analyzer = Self::new();
        analyzer.extend_from_file(path)?;
        Ok(analyzer)
    }

    pub fn extend_from_file(&mut self, path: &Path) -> AnalyzerResult<()> {
        let json = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_json_str(&json)?;
        tracing::debug!(path = %path.display(), sentences = self.len(), "loaded analyzer fixture");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl SentenceAnalyzer for FixtureAnalyzer {
    fn parse(&self, text: &str) -> AnalyzerResult<Vec<DependencyTree>> {
        Ok(self
            .sentences
            .get(&key(text))
            .map(|candidates| candidates.iter().cloned().map(DependencyTree::new).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{LemmaVersion, PartOfSpeech, Relation};

    const FIXTURE: &str = r#"{
        "Вода кипит": [
            {
                "content": "кипит",
                "position": 1,
                "readings": [{
                    "lemma": "кипеть",
                    "part_of_speech": "verb",
                    "characteristics": {
                        "kind": "verb", "number": "singular", "mood": "indicative",
                        "person": "third", "aspect": "imperfective", "tense": "present"
                    }
                }],
                "children": [{
                    "content": "Вода",
                    "position": 0,
                    "relation": "subject",
                    "readings": [{
                        "lemma": "вода",
                        "part_of_speech": "noun",
                        "characteristics": {
                            "kind": "noun", "case": "nominative",
                            "number": "singular", "gender": "feminine"
                        }
                    }]
                }]
            }
        ]
    }"#;

    #[test]
    fn fixture_round_trip_through_json() {
        let analyzer = FixtureAnalyzer::from_json_str(FIXTURE).unwrap();
        let trees = analyzer.parse("  вода КИПИТ ").unwrap();
        assert_eq!(trees.len(), 1);
        let tree = &trees[0];
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.text(), "Вода кипит");
        let subject = tree.node(tree.child(tree.root(), 0).unwrap());
        assert_eq!(subject.relation, Some(Relation::Subject));
    }

    #[test]
    fn unknown_sentence_has_no_candidates() {
        let analyzer = FixtureAnalyzer::from_json_str(FIXTURE).unwrap();
        assert!(analyzer.parse("Сократ стар").unwrap().is_empty());
    }

    #[test]
    fn malformed_fixture_is_reported() {
        let err = FixtureAnalyzer::from_json_str(r#"{"x": [{"readings": []}]}"#).unwrap_err();
        assert!(matches!(err, AnalyzerError::Fixture { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureAnalyzer::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AnalyzerError::Io { .. }));
    }

    #[test]
    fn closures_are_analyzers() {
        let analyzer = |text: &str| -> AnalyzerResult<Vec<DependencyTree>> {
            Ok(vec![DependencyTree::new(
                SentenceElement::new(text).reading(LemmaVersion::bare(text, PartOfSpeech::Particle)),
            )])
        };
        assert_eq!(analyzer.parse("да").unwrap()[0].text(), "да");
    }
}
