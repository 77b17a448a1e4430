//! Declarative sentence patterns.
//!
//! A [`PatternBuilder`] is the authoring surface for one catalogue entry.
//! Each call that declares a node returns a [`SlotId`]; child declarations
//! claim the parent's next child position, so children must be declared
//! in the order the analyzer emits them. The finished [`Pattern`] pairs the
//! assembled [`Matcher`] with a producer that turns bound values into a
//! [`Formula`].
//!
//! ```
//! use gari::logic::{Formula, Term};
//! use gari::matcher::PatternBuilder;
//! use gari::matcher::expect::{noun, verb};
//! use gari::tree::grammemes::{Case, Number, Tense};
//!
//! let mut p = PatternBuilder::new("вода кипит");
//! let boils = p.root(verb().number(Number::Singular).tense(Tense::Present));
//! let water = p.subject(boils, noun().case(Case::Nominative));
//! let pattern = p
//!     .build(move |b| Some(Formula::predicate(b.lemma(boils)?, [Term::variable(b.lemma(water)?)])))
//!     .unwrap();
//! assert_eq!(pattern.id(), "вода кипит");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::logic::Formula;
use crate::tree::{DependencyTree, FeatureKind, Relation};

use super::bindings::{Bindings, BoundView, SlotId};
use super::error::{PatternError, PatternResult};
use super::expect::NodeTest;
use super::{Locator, Matcher};

/// Builds the formula once a pattern has matched.
pub type Producer = Arc<dyn Fn(&BoundView<'_>) -> Option<Formula> + Send + Sync>;

/// One way through the pattern: its steps so far and, per slot, the next
/// unclaimed child position.
#[derive(Clone, Default)]
struct Lane {
    steps: Vec<Matcher>,
    claimed: Vec<usize>,
}

pub struct PatternBuilder {
    id: String,
    slot_count: usize,
    has_root: bool,
    /// Alternatives in preference order; every `either` splits each lane in two.
    lanes: Vec<Lane>,
    error: Option<PatternError>,
}

impl PatternBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slot_count: 0,
            has_root: false,
            lanes: vec![Lane::default()],
            error: None,
        }
    }

    fn declare(&mut self, test: NodeTest, locate: impl Fn(&mut Lane) -> Locator) -> SlotId {
        if let Err((category, feature)) = test.validate() {
            self.fail(PatternError::InvalidFeature {
                pattern: self.id.clone(),
                category,
                feature,
            });
        }
        let slot = SlotId(self.slot_count);
        self.slot_count += 1;
        for lane in &mut self.lanes {
            let locator = locate(lane);
            lane.claimed.resize(slot.0 + 1, 0);
            lane.steps.push(Matcher::element(slot, locator, test.clone()));
        }
        slot
    }

    fn push(&mut self, step: Matcher) {
        for lane in &mut self.lanes {
            lane.steps.push(step.clone());
        }
    }

    fn fail(&mut self, error: PatternError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Declare the tree root.
    pub fn root(&mut self, test: impl Into<NodeTest>) -> SlotId {
        self.has_root = true;
        self.declare(test.into(), |_| Locator::Root)
    }

    /// Declare the next child of `parent`, which must carry `relation`.
    pub fn child(&mut self, parent: SlotId, relation: Relation, test: impl Into<NodeTest>) -> SlotId {
        if parent.0 >= self.slot_count {
            self.fail(PatternError::UnknownSlot {
                pattern: self.id.clone(),
                slot: parent.0,
            });
        }
        self.declare(test.into(), |lane| {
            let index = match lane.claimed.get_mut(parent.0) {
                Some(next) => {
                    *next += 1;
                    *next - 1
                }
                None => 0,
            };
            Locator::Child {
                parent,
                index,
                relation,
            }
        })
    }

    pub fn subject(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::Subject, test)
    }

    pub fn object(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::Object, test)
    }

    pub fn rhema(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::Rhema, test)
    }

    pub fn attribute(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::Attribute, test)
    }

    pub fn negation_particle(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::NegationParticle, test)
    }

    pub fn right_genitive_object(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::RightGenitiveObject, test)
    }

    pub fn next_clause(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::NextClause, test)
    }

    pub fn next_collocation_item(&mut self, parent: SlotId, test: impl Into<NodeTest>) -> SlotId {
        self.child(parent, Relation::NextCollocationItem, test)
    }

    /// Require `guard` to hold over everything bound so far.
    pub fn filter(&mut self, guard: impl Fn(&BoundView<'_>) -> bool + Send + Sync + 'static) {
        self.push(Matcher::check(guard));
    }

    /// Require `a` and `b` to agree on `feature` (gender, number, case, ...).
    pub fn agree(&mut self, a: SlotId, b: SlotId, feature: FeatureKind) {
        self.filter(move |view| view.agree(a, b, feature));
    }

    /// Two alternative continuations. The second is tried only if the first,
    /// together with everything declared after the call, fails.
    ///
    /// Both branches start from the same child positions. Whatever is
    /// declared after the call continues each branch separately, from the
    /// positions that branch claimed, so a branch that claims fewer children
    /// leaves later siblings where they are. Returns what each branch
    /// returned, typically the slots it declared.
    pub fn either<A, B>(
        &mut self,
        first: impl FnOnce(&mut PatternBuilder) -> A,
        second: impl FnOnce(&mut PatternBuilder) -> B,
    ) -> (A, B) {
        let before = self.lanes.clone();

        let a = first(self);
        let mut lanes = std::mem::replace(&mut self.lanes, before);

        let b = second(self);
        lanes.append(&mut self.lanes);

        for lane in &mut lanes {
            lane.claimed.resize(self.slot_count, 0);
        }
        self.lanes = lanes;
        (a, b)
    }

    /// Finish the pattern with the formula producer.
    ///
    /// Fails if any declaration was ill-formed; nothing is checked later.
    pub fn build(
        self,
        produce: impl Fn(&BoundView<'_>) -> Option<Formula> + Send + Sync + 'static,
    ) -> PatternResult<Pattern> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.has_root {
            return Err(PatternError::MissingRoot { pattern: self.id });
        }
        let matcher = self
            .lanes
            .into_iter()
            .map(|lane| Matcher::sequence(lane.steps))
            .reduce(Matcher::or_else)
            .unwrap_or(Matcher::Succeed);
        Ok(Pattern {
            id: self.id,
            slot_count: self.slot_count,
            matcher,
            produce: Arc::new(produce),
        })
    }
}

/// One catalogue entry: a tree shape and the formula it stands for.
#[derive(Clone)]
pub struct Pattern {
    id: String,
    slot_count: usize,
    matcher: Matcher,
    produce: Producer,
}

impl Pattern {
    /// Wrap a hand-assembled matcher.
    pub fn from_matcher(
        id: impl Into<String>,
        matcher: Matcher,
        produce: impl Fn(&BoundView<'_>) -> Option<Formula> + Send + Sync + 'static,
    ) -> Self {
        let slot_count = matcher
            .elements()
            .iter()
            .map(|e| e.slot.0 + 1)
            .max()
            .unwrap_or(0);
        Self {
            id: id.into(),
            slot_count,
            matcher,
            produce: Arc::new(produce),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Match against the tree with a fresh store. Does not check completeness.
    pub fn match_tree(&self, tree: &DependencyTree) -> Option<Bindings> {
        self.matcher.attempt(tree, Bindings::new(self.slot_count))
    }

    /// Run the producer over a successful match.
    pub fn produce(&self, tree: &DependencyTree, bindings: &Bindings) -> Option<Formula> {
        (self.produce)(&bindings.view(tree))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("id", &self.id)
            .field("slot_count", &self.slot_count)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Term;
    use crate::matcher::expect::{category, noun, pos};
    use crate::tree::grammemes::{Case, Gender, Number, Tense};
    use crate::tree::{
        Characteristics, CharacteristicsKind, Feature, LemmaVersion, NounCharacteristics,
        PartOfSpeech, SentenceElement,
    };

    fn noun_reading(lemma: &str, case: Case) -> LemmaVersion {
        LemmaVersion::new(
            lemma,
            PartOfSpeech::Noun,
            Characteristics::Noun(NounCharacteristics {
                case,
                number: Number::Singular,
                gender: Gender::Masculine,
                animacy: None,
            }),
        )
    }

    /// "Сократ - человек" / "Сократ это человек".
    fn membership(root: &str, pos_tag: PartOfSpeech) -> DependencyTree {
        DependencyTree::new(
            SentenceElement::new(root)
                .reading(LemmaVersion::bare(root, pos_tag))
                .child(
                    Relation::Subject,
                    SentenceElement::new("Сократ").reading(noun_reading("сократ", Case::Nominative)),
                )
                .child(
                    Relation::Rhema,
                    SentenceElement::new("человек").reading(noun_reading("человек", Case::Nominative)),
                ),
        )
    }

    fn membership_pattern() -> Pattern {
        let mut p = PatternBuilder::new("сократ - человек");
        let link = p.root(pos(PartOfSpeech::Punctuation, "-").or(pos(PartOfSpeech::PronounNoun, "это")));
        let element = p.subject(link, noun().case(Case::Nominative));
        let set = p.rhema(link, noun().case(Case::Nominative));
        p.build(move |b| Some(Formula::set_contains(b.lemma(set)?, Term::variable(b.lemma(element)?))))
            .unwrap()
    }

    #[test]
    fn slots_are_numbered_in_declaration_order() {
        let pattern = membership_pattern();
        assert_eq!(pattern.slot_count(), 3);
        let slots: Vec<usize> = pattern.matcher().elements().iter().map(|e| e.slot.index()).collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn children_claim_consecutive_positions() {
        let pattern = membership_pattern();
        let indices: Vec<Locator> = pattern.matcher().elements().iter().map(|e| e.locator).collect();
        assert!(matches!(indices[1], Locator::Child { index: 0, relation: Relation::Subject, .. }));
        assert!(matches!(indices[2], Locator::Child { index: 1, relation: Relation::Rhema, .. }));
    }

    #[test]
    fn matches_both_alternatives_and_produces() {
        let pattern = membership_pattern();
        for tree in [
            membership("-", PartOfSpeech::Punctuation),
            membership("это", PartOfSpeech::PronounNoun),
        ] {
            let bindings = pattern.match_tree(&tree).unwrap();
            assert!(bindings.covers(&tree));
            assert_eq!(
                pattern.produce(&tree, &bindings).unwrap().to_string(),
                "сократ ∈ set<человек>"
            );
        }
        assert!(pattern.match_tree(&membership("и", PartOfSpeech::Conjunction)).is_none());
    }

    #[test]
    fn invalid_feature_fails_at_build() {
        let mut p = PatternBuilder::new("broken");
        p.root(category(CharacteristicsKind::Noun).with(Feature::Tense(Tense::Present)));
        let err = p.build(|_| None).unwrap_err();
        assert!(matches!(
            err,
            PatternError::InvalidFeature {
                category: CharacteristicsKind::Noun,
                feature: FeatureKind::Tense,
                ..
            }
        ));
    }

    #[test]
    fn missing_root_fails_at_build() {
        let p = PatternBuilder::new("rootless");
        assert!(matches!(p.build(|_| None), Err(PatternError::MissingRoot { .. })));
    }

    #[test]
    fn foreign_slot_fails_at_build() {
        let mut other = PatternBuilder::new("other");
        let _ = other.root(noun());
        let foreign = other.subject(SlotId(0), noun());

        let mut p = PatternBuilder::new("mine");
        let _ = p.root(noun());
        p.subject(foreign, noun());
        assert!(matches!(
            p.build(|_| None),
            Err(PatternError::UnknownSlot { slot: 1, .. })
        ));
    }

    #[test]
    fn branches_share_child_positions() {
        let mut p = PatternBuilder::new("branchy");
        let root = p.root(pos(PartOfSpeech::Punctuation, "-"));
        let (first_slot, second_slot) = p.either(
            |p| p.next_collocation_item(root, pos(PartOfSpeech::PronounNoun, "это")),
            |p| p.negation_particle(root, pos(PartOfSpeech::Particle, "не")),
        );
        let after = p.subject(root, noun());
        let pattern = p.build(|_| None).unwrap();

        let elements = pattern.matcher().elements();
        let locators_of = |slot: SlotId| -> Vec<Locator> {
            elements.iter().filter(|e| e.slot == slot).map(|e| e.locator).collect()
        };
        assert!(matches!(locators_of(first_slot)[..], [Locator::Child { index: 0, .. }]));
        assert!(matches!(locators_of(second_slot)[..], [Locator::Child { index: 0, .. }]));
        assert!(matches!(
            locators_of(after)[..],
            [Locator::Child { index: 1, .. }, Locator::Child { index: 1, .. }]
        ));
    }

    /// "Сократ - человек" and "Сократ - это человек" under one pattern.
    fn dash_with_optional_this() -> Pattern {
        let mut p = PatternBuilder::new("сократ - (это) человек");
        let link = p.root(pos(PartOfSpeech::Punctuation, "-"));
        let element = p.subject(link, noun().case(Case::Nominative));
        p.either(
            |p| {
                p.next_collocation_item(link, pos(PartOfSpeech::PronounNoun, "это"));
            },
            |_| {},
        );
        let set = p.rhema(link, noun().case(Case::Nominative));
        p.build(move |b| Some(Formula::set_contains(b.lemma(set)?, Term::variable(b.lemma(element)?))))
            .unwrap()
    }

    #[test]
    fn children_after_a_branch_follow_the_branch_that_ran() {
        let pattern = dash_with_optional_this();
        let with_this = DependencyTree::new(
            SentenceElement::new("-")
                .reading(LemmaVersion::bare("-", PartOfSpeech::Punctuation))
                .child(
                    Relation::Subject,
                    SentenceElement::new("Сократ").reading(noun_reading("сократ", Case::Nominative)),
                )
                .child(
                    Relation::NextCollocationItem,
                    SentenceElement::new("это").reading(LemmaVersion::bare("это", PartOfSpeech::PronounNoun)),
                )
                .child(
                    Relation::Rhema,
                    SentenceElement::new("человек").reading(noun_reading("человек", Case::Nominative)),
                ),
        );
        let without_this = membership("-", PartOfSpeech::Punctuation);

        for tree in [with_this, without_this] {
            let bindings = pattern.match_tree(&tree).unwrap();
            assert!(bindings.covers(&tree));
            assert_eq!(
                pattern.produce(&tree, &bindings).unwrap().to_string(),
                "сократ ∈ set<человек>"
            );
        }
    }

    #[test]
    fn empty_branch_does_not_shift_later_children() {
        let pattern = dash_with_optional_this();
        let elements = pattern.matcher().elements();
        let rhema: Vec<usize> = elements
            .iter()
            .filter_map(|e| match e.locator {
                Locator::Child { index, relation: Relation::Rhema, .. } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(rhema, vec![2, 1]);
    }

    #[test]
    fn from_matcher_counts_slots() {
        let m = Matcher::element(SlotId(0), Locator::Root, noun()).and_then(Matcher::element(
            SlotId(3),
            Locator::Root,
            noun(),
        ));
        let pattern = Pattern::from_matcher("manual", m, |_| None);
        assert_eq!(pattern.slot_count(), 4);
    }
}
