// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # gari
//!
//! Turns simple Russian sentences into first-order predicate-logic formulas.
//!
//! ## Architecture
//!
//! - **Logic** (`logic`): terms, formulas, rendering, and negation pushed down to atoms
//! - **Trees** (`tree`): candidate dependency parses with per-reading grammatical characteristics
//! - **Matching** (`matcher`): declarative tree patterns built from composable matchers
//! - **Catalogue** (`catalogue`): ordered pattern sets; `catalogue::russian` is built in
//! - **Parser** (`parser`): tries every pattern on every candidate tree and insists on exactly one match
//!
//! Sentence analysis itself is external and plugs in through
//! [`analyzer::SentenceAnalyzer`].
//!
//! ## Library usage
//!
//! ```no_run
//! use gari::analyzer::FixtureAnalyzer;
//! use gari::catalogue::russian;
//! use gari::parser::GariParser;
//!
//! let analyzer = FixtureAnalyzer::load("tests/fixtures/sentences.json".as_ref()).unwrap();
//! let parser = GariParser::new(analyzer, russian::catalogue().unwrap());
//! let formula = parser.parse_sentence("Каждый человек смертен").unwrap().unwrap();
//! assert_eq!(formula.to_string(), "(∀ x) x ∈ set<человек> ⇒ СМЕРТЕН(x)");
//! ```

pub mod analyzer;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod logic;
pub mod matcher;
pub mod parser;
pub mod skeleton;
pub mod tree;
pub mod variations;
