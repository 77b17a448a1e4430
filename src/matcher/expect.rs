//! Node tests: what a single tree node must look like.
//!
//! Two kinds of test exist, mirroring how patterns talk about words:
//!
//! - a **category test** requires a reading of a given word class whose
//!   characteristics carry every expected [`Feature`], optionally with a
//!   literal surface text or lemma;
//! - a **part-of-speech test** requires a literal surface text and a
//!   reading with an exact part-of-speech tag (punctuation, particles,
//!   conjunctions).
//!
//! Tests combine with [`NodeTest::or`]. The typed builders ([`noun`],
//! [`verb`], [`adjective`], ...) only expose fields the word class has,
//! so most declaration mistakes do not compile; the untyped
//! [`CategoryTest::with`] path is checked by [`NodeTest::validate`] when
//! the pattern is built.

use crate::tree::grammemes::{
    AdjectiveForm, Animacy, Aspect, Case, Degree, Gender, Mood, Number, Person, Tense,
    Transitivity,
};
use crate::tree::{CharacteristicsKind, Feature, FeatureKind, Node, PartOfSpeech};

/// Case-insensitive comparison that also folds Cyrillic.
fn same_text(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Requirements on a reading of one word class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTest {
    pub kind: CharacteristicsKind,
    pub features: Vec<Feature>,
    pub content: Option<String>,
    pub lemma: Option<String>,
}

impl CategoryTest {
    pub fn new(kind: CharacteristicsKind) -> Self {
        Self {
            kind,
            features: Vec::new(),
            content: None,
            lemma: None,
        }
    }

    /// Add an expected feature without compile-time checking.
    pub fn with(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    fn matches(&self, node: &Node) -> Option<usize> {
        if let Some(ref content) = self.content {
            if !same_text(content, &node.content) {
                return None;
            }
        }
        node.readings.iter().position(|reading| {
            reading.characteristics.kind() == self.kind
                && self.features.iter().all(|&f| reading.characteristics.has(f))
                && self
                    .lemma
                    .as_deref()
                    .is_none_or(|lemma| same_text(lemma, &reading.lemma))
        })
    }
}

/// A test applied to one node; on success yields the index of the chosen reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    Category(CategoryTest),
    PartOfSpeech {
        part_of_speech: PartOfSpeech,
        content: String,
    },
    /// Ordered alternation: the second test runs only if the first fails.
    Either(Box<NodeTest>, Box<NodeTest>),
}

impl NodeTest {
    pub fn or(self, other: impl Into<NodeTest>) -> NodeTest {
        NodeTest::Either(Box::new(self), Box::new(other.into()))
    }

    /// Index of the first reading of `node` satisfying this test.
    pub fn matches(&self, node: &Node) -> Option<usize> {
        match self {
            NodeTest::Category(test) => test.matches(node),
            NodeTest::PartOfSpeech {
                part_of_speech,
                content,
            } => {
                if !same_text(content, &node.content) {
                    return None;
                }
                node.readings
                    .iter()
                    .position(|r| r.part_of_speech == Some(*part_of_speech))
            }
            NodeTest::Either(first, second) => {
                first.matches(node).or_else(|| second.matches(node))
            }
        }
    }

    /// First expected feature that does not exist on its word class.
    pub fn validate(&self) -> Result<(), (CharacteristicsKind, FeatureKind)> {
        match self {
            NodeTest::Category(test) => {
                match test.features.iter().find(|f| !test.kind.supports(f.kind())) {
                    Some(f) => Err((test.kind, f.kind())),
                    None => Ok(()),
                }
            }
            NodeTest::PartOfSpeech { .. } => Ok(()),
            NodeTest::Either(first, second) => {
                first.validate()?;
                second.validate()
            }
        }
    }
}

impl From<CategoryTest> for NodeTest {
    fn from(test: CategoryTest) -> Self {
        NodeTest::Category(test)
    }
}

/// Literal word with an exact part of speech: `pos(PartOfSpeech::Particle, "не")`.
pub fn pos(part_of_speech: PartOfSpeech, content: impl Into<String>) -> NodeTest {
    NodeTest::PartOfSpeech {
        part_of_speech,
        content: content.into(),
    }
}

/// Untyped category test, validated at pattern build time.
pub fn category(kind: CharacteristicsKind) -> CategoryTest {
    CategoryTest::new(kind)
}

macro_rules! expectation {
    (
        $(#[$meta:meta])*
        $name:ident, $ctor:ident, $kind:ident {
            $($method:ident: $ty:ty => $feature:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(CategoryTest);

        impl $name {
            $(
                pub fn $method(self, value: $ty) -> Self {
                    Self(self.0.with(Feature::$feature(value)))
                }
            )*

            /// Require this exact surface text (case-insensitive).
            pub fn content(self, content: impl Into<String>) -> Self {
                Self(self.0.content(content))
            }

            /// Require this exact lemma (case-insensitive).
            pub fn lemma(self, lemma: impl Into<String>) -> Self {
                Self(self.0.lemma(lemma))
            }

            pub fn or(self, other: impl Into<NodeTest>) -> NodeTest {
                NodeTest::from(self).or(other)
            }
        }

        impl From<$name> for NodeTest {
            fn from(expect: $name) -> Self {
                NodeTest::Category(expect.0)
            }
        }

        pub fn $ctor() -> $name {
            $name(CategoryTest::new(CharacteristicsKind::$kind))
        }
    };
}

expectation!(
    /// Expectation on a noun reading.
    NounExpect, noun, Noun {
        case: Case => Case,
        number: Number => Number,
        gender: Gender => Gender,
        animacy: Animacy => Animacy,
    }
);

expectation!(
    /// Expectation on a finite verb reading.
    VerbExpect, verb, Verb {
        case: Case => Case,
        number: Number => Number,
        mood: Mood => Mood,
        person: Person => Person,
        aspect: Aspect => Aspect,
        tense: Tense => Tense,
        transitivity: Transitivity => Transitivity,
    }
);

expectation!(
    /// Expectation on an adjective reading.
    AdjectiveExpect, adjective, Adjective {
        case: Case => Case,
        number: Number => Number,
        gender: Gender => Gender,
        form: AdjectiveForm => AdjectiveForm,
        degree: Degree => Degree,
    }
);

expectation!(AdverbExpect, adverb, Adverb { degree: Degree => Degree });

expectation!(
    InfinitiveExpect, infinitive, Infinitive {
        aspect: Aspect => Aspect,
        transitivity: Transitivity => Transitivity,
    }
);

expectation!(
    PronounExpect, pronoun, Pronoun {
        gender: Gender => Gender,
        number: Number => Number,
        person: Person => Person,
    }
);

expectation!(GerundExpect, gerund, Gerund { case: Case => Case, aspect: Aspect => Aspect });
