//! Dependency trees produced by the sentence analyzer.
//!
//! The analyzer hands over a nested [`SentenceElement`]; the matcher works
//! on a [`DependencyTree`], the same data flattened into an arena in
//! pre-order so every node has a stable [`NodeId`]. Node identity is what
//! the completeness check keys on: two identical readings at different
//! positions are different occurrences.

pub mod characteristics;
pub mod grammemes;

use serde::{Deserialize, Serialize};

pub use characteristics::{
    AdjectiveCharacteristics, AdverbCharacteristics, Characteristics, CharacteristicsKind,
    Feature, FeatureKind, GerundCharacteristics, InfinitiveCharacteristics,
    NounCharacteristics, PronounCharacteristics, VerbCharacteristics,
};

/// Word class as tagged by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Adverb,
    Verb,
    Pronoun,
    Infinitive,
    Preposition,
    Conjunction,
    Gerund,
    Punctuation,
    Particle,
    /// Pronoun used as a noun: `это`, `что`.
    PronounNoun,
    PossessiveParticle,
    NumWord,
}

/// Syntactic relation between a node and its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Subject,
    Object,
    Rhema,
    Attribute,
    NegationParticle,
    RightGenitiveObject,
    NextClause,
    NextCollocationItem,
    /// Any relation the matcher has no selector for.
    #[serde(other)]
    Other,
}

impl Relation {
    /// Selector name used in pattern skeletons.
    pub fn selector(self) -> &'static str {
        match self {
            Relation::Subject => "subject",
            Relation::Object => "object",
            Relation::Rhema => "rhema",
            Relation::Attribute => "attribute",
            Relation::NegationParticle => "negation_particle",
            Relation::RightGenitiveObject => "right_genitive_object",
            Relation::NextClause => "next_clause",
            Relation::NextCollocationItem => "next_collocation_item",
            Relation::Other => "other",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.selector())
    }
}

/// One candidate interpretation of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaVersion {
    pub lemma: String,
    #[serde(default)]
    pub part_of_speech: Option<PartOfSpeech>,
    pub characteristics: Characteristics,
}

impl LemmaVersion {
    pub fn new(
        lemma: impl Into<String>,
        part_of_speech: PartOfSpeech,
        characteristics: Characteristics,
    ) -> Self {
        Self {
            lemma: lemma.into(),
            part_of_speech: Some(part_of_speech),
            characteristics,
        }
    }

    /// A reading without inflection (particle, punctuation, conjunction).
    pub fn bare(lemma: impl Into<String>, part_of_speech: PartOfSpeech) -> Self {
        Self::new(lemma, part_of_speech, Characteristics::None)
    }
}

/// A parse node as delivered by the analyzer: nested, owning its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceElement {
    pub content: String,
    #[serde(default)]
    pub position: usize,
    /// Relation to the parent; `None` on the root.
    #[serde(default)]
    pub relation: Option<Relation>,
    pub readings: Vec<LemmaVersion>,
    #[serde(default)]
    pub children: Vec<SentenceElement>,
}

impl SentenceElement {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            position: 0,
            relation: None,
            readings: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn reading(mut self, reading: LemmaVersion) -> Self {
        self.readings.push(reading);
        self
    }

    /// Append a child connected by `relation`. Order of calls is child order.
    pub fn child(mut self, relation: Relation, mut child: SentenceElement) -> Self {
        child.relation = Some(relation);
        self.children.push(child);
        self
    }
}

/// Index of a node inside its [`DependencyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub content: String,
    pub position: usize,
    pub relation: Option<Relation>,
    pub readings: Vec<LemmaVersion>,
    pub children: Vec<NodeId>,
}

/// One candidate parse of a sentence, flattened in pre-order.
///
/// Immutable once built; the root is always [`DependencyTree::root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    nodes: Vec<Node>,
}

impl DependencyTree {
    pub fn new(root: SentenceElement) -> Self {
        let mut nodes = Vec::new();
        flatten(root, &mut nodes);
        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The node behind `id`, or `None` if `id` belongs to a larger tree.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The `index`-th child of `parent`, if it exists.
    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.get(parent)?.children.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in pre-order (root first, children in order).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Surface text of the whole sentence, in word order.
    pub fn text(&self) -> String {
        let mut nodes: Vec<&Node> = self.nodes.iter().collect();
        nodes.sort_by_key(|n| n.position);
        nodes
            .iter()
            .map(|n| n.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<SentenceElement> for DependencyTree {
    fn from(root: SentenceElement) -> Self {
        Self::new(root)
    }
}

fn flatten(element: SentenceElement, nodes: &mut Vec<Node>) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node {
        content: element.content,
        position: element.position,
        relation: element.relation,
        readings: element.readings,
        children: Vec::with_capacity(element.children.len()),
    });
    for child in element.children {
        let child_id = flatten(child, nodes);
        nodes[id.0].children.push(child_id);
    }
    id
}
