//! Sentence-to-formula orchestration.
//!
//! [`GariParser::parse_sentence`] asks the analyzer for candidate trees and
//! tries them in order. Every catalogued pattern runs against the current
//! tree with a fresh binding store; a pattern counts only if it also binds
//! every node of the tree.
//!
//! - No pattern counts: the unmatched hook fires and the next candidate is tried.
//! - Exactly one counts: its formula is the result.
//! - More than one counts: the catalogue is broken and
//!   [`CatalogueError::Ambiguous`] names every pattern involved.
//!
//! Running out of candidates is `Ok(None)`.

use std::sync::Arc;

use rayon::prelude::*;

use crate::analyzer::{FixtureAnalyzer, SentenceAnalyzer};
use crate::catalogue::{Catalogue, CatalogueError, russian};
use crate::config::{CatalogueChoice, ParserConfig};
use crate::error::GariResult;
use crate::logic::Formula;
use crate::matcher::Pattern;
use crate::skeleton;
use crate::tree::DependencyTree;

/// Called once per candidate tree that no pattern recognized.
pub type UnmatchedHook = Arc<dyn Fn(&str, &DependencyTree) + Send + Sync>;

/// Hook that logs the tree's skeleton, at `info` when `loud` and at `debug` otherwise.
pub fn log_skeleton_hook(loud: bool) -> UnmatchedHook {
    Arc::new(move |sentence: &str, tree: &DependencyTree| {
        let skeleton = skeleton::render(sentence, tree);
        if loud {
            tracing::info!(sentence, "unmatched tree:\n{skeleton}");
        } else {
            tracing::debug!(sentence, "unmatched tree:\n{skeleton}");
        }
    })
}

pub struct GariParser<A> {
    analyzer: A,
    catalogue: Catalogue,
    on_unmatched: UnmatchedHook,
}

impl<A: SentenceAnalyzer> GariParser<A> {
    pub fn new(analyzer: A, catalogue: Catalogue) -> Self {
        Self {
            analyzer,
            catalogue,
            on_unmatched: log_skeleton_hook(false),
        }
    }

    /// Replace the unmatched-tree hook.
    pub fn with_hook(mut self, hook: impl Fn(&str, &DependencyTree) + Send + Sync + 'static) -> Self {
        self.on_unmatched = Arc::new(hook);
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// The formula for `text`, or `None` if no candidate tree is recognized.
    pub fn parse_sentence(&self, text: &str) -> GariResult<Option<Formula>> {
        let candidates = self.analyzer.parse(text)?;
        tracing::debug!(sentence = text, candidates = candidates.len(), "parsing sentence");

        for (index, tree) in candidates.iter().enumerate() {
            let mut matched = self.recognize(tree);
            match matched.len() {
                0 => {
                    tracing::debug!(sentence = text, candidate = index, "no pattern matched candidate");
                    (self.on_unmatched)(text, tree);
                }
                1 => {
                    let (pattern, formula) = matched.remove(0);
                    tracing::info!(
                        sentence = text,
                        candidate = index,
                        pattern = pattern.id(),
                        formula = %formula,
                        "sentence recognized"
                    );
                    return Ok(Some(formula));
                }
                _ => {
                    let patterns: Vec<String> =
                        matched.iter().map(|(p, _)| p.id().to_string()).collect();
                    tracing::error!(sentence = text, patterns = ?patterns, "ambiguous catalogue");
                    return Err(CatalogueError::Ambiguous {
                        sentence: text.to_string(),
                        patterns,
                    }
                    .into());
                }
            }
        }

        tracing::warn!(sentence = text, candidates = candidates.len(), "sentence not recognized");
        Ok(None)
    }

    /// Every pattern that completely matches `tree`, with its formula, in catalogue order.
    pub fn recognize(&self, tree: &DependencyTree) -> Vec<(&Pattern, Formula)> {
        self.catalogue
            .iter()
            .filter_map(|pattern| {
                let bindings = pattern.match_tree(tree)?;
                let missing = bindings.unbound_nodes(tree);
                if !missing.is_empty() {
                    tracing::debug!(
                        pattern = pattern.id(),
                        unbound = missing.len(),
                        "pattern matched but left nodes unexplained"
                    );
                    return None;
                }
                let Some(formula) = pattern.produce(tree, &bindings) else {
                    tracing::debug!(pattern = pattern.id(), "pattern matched but produced no formula");
                    return None;
                };
                tracing::debug!(pattern = pattern.id(), %formula, "pattern matched");
                Some((pattern, formula))
            })
            .collect()
    }

    /// Parse independent sentences in parallel. Results keep input order.
    pub fn parse_many(&self, texts: &[&str]) -> Vec<GariResult<Option<Formula>>> {
        texts.par_iter().map(|text| self.parse_sentence(text)).collect()
    }
}

impl GariParser<FixtureAnalyzer> {
    /// Fixture-backed parser as described by `config`.
    pub fn from_config(config: &ParserConfig) -> GariResult<Self> {
        let mut analyzer = FixtureAnalyzer::new();
        for path in &config.fixtures {
            analyzer.extend_from_file(path)?;
        }
        let catalogue = match config.catalogue {
            CatalogueChoice::Russian => russian::catalogue()?,
            CatalogueChoice::Empty => Catalogue::empty(),
        };
        tracing::info!(
            patterns = catalogue.len(),
            sentences = analyzer.len(),
            "parser configured"
        );
        Ok(Self {
            analyzer,
            catalogue,
            on_unmatched: log_skeleton_hook(config.log_skeletons),
        })
    }
}
