//! Tree-pattern matching combinators.
//!
//! A [`Matcher`] is a value describing how to walk a [`DependencyTree`]:
//! bind one node ([`Matcher::Element`]), check already-bound values
//! ([`Matcher::Check`]), try alternatives in order ([`Matcher::OrElse`]),
//! or run steps in sequence ([`Matcher::AndThen`], [`Matcher::Bind`]).
//!
//! [`Matcher::attempt`] takes the [`Bindings`] store by value and hands
//! back the extended store on success. Failure is `None` and the caller
//! still owns the store it had before the step, so partial bindings of a
//! failed branch disappear with it.
//!
//! Children are addressed positionally: a child element names its parent
//! slot, the index of the child it expects, and the relation tag that
//! child must carry. Patterns are normally assembled with
//! [`PatternBuilder`], which hands out slots and child indices in
//! declaration order.

pub mod bindings;
pub mod error;
pub mod expect;
pub mod pattern;

use std::fmt;
use std::sync::Arc;

use crate::tree::{DependencyTree, NodeId, Relation};

pub use bindings::{Binding, Bindings, BoundView, SlotId};
pub use error::{PatternError, PatternResult};
pub use expect::{NodeTest, pos};
pub use pattern::{Pattern, PatternBuilder};

/// Where an element matcher looks for its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Root,
    /// The `index`-th child of the node bound to `parent`, connected by `relation`.
    Child {
        parent: SlotId,
        index: usize,
        relation: Relation,
    },
}

/// Binds one node to `slot` when it satisfies `test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementMatcher {
    pub slot: SlotId,
    pub locator: Locator,
    pub test: NodeTest,
}

impl ElementMatcher {
    fn locate(&self, tree: &DependencyTree, bindings: &Bindings) -> Option<NodeId> {
        match self.locator {
            Locator::Root => Some(tree.root()),
            Locator::Child {
                parent,
                index,
                relation,
            } => {
                let parent = bindings.get(parent)?.node;
                let child = tree.child(parent, index)?;
                (tree.node(child).relation == Some(relation)).then_some(child)
            }
        }
    }

    fn attempt(&self, tree: &DependencyTree, mut bindings: Bindings) -> Option<Bindings> {
        let node = self.locate(tree, &bindings)?;
        let reading = self.test.matches(tree.node(node))?;
        bindings.bind(self.slot, Binding { node, reading });
        Some(bindings)
    }
}

/// Predicate over already-bound values.
pub type Guard = Arc<dyn Fn(&BoundView<'_>) -> bool + Send + Sync>;

/// Chooses the next matcher from already-bound values.
pub type Selector = Arc<dyn Fn(&BoundView<'_>) -> Option<Matcher> + Send + Sync>;

#[derive(Clone)]
pub enum Matcher {
    /// Always succeeds without binding anything.
    Succeed,
    Element(ElementMatcher),
    Check(Guard),
    OrElse(Box<Matcher>, Box<Matcher>),
    AndThen(Box<Matcher>, Box<Matcher>),
    /// Run `first`, then whatever `select` picks from its bindings.
    Bind { first: Box<Matcher>, select: Selector },
}

impl Matcher {
    pub fn element(slot: SlotId, locator: Locator, test: impl Into<NodeTest>) -> Self {
        Matcher::Element(ElementMatcher {
            slot,
            locator,
            test: test.into(),
        })
    }

    pub fn check(guard: impl Fn(&BoundView<'_>) -> bool + Send + Sync + 'static) -> Self {
        Matcher::Check(Arc::new(guard))
    }

    pub fn or_else(self, other: Matcher) -> Self {
        Matcher::OrElse(Box::new(self), Box::new(other))
    }

    pub fn and_then(self, next: Matcher) -> Self {
        match (self, next) {
            (Matcher::Succeed, next) => next,
            (first, Matcher::Succeed) => first,
            (first, next) => Matcher::AndThen(Box::new(first), Box::new(next)),
        }
    }

    pub fn bind(
        self,
        select: impl Fn(&BoundView<'_>) -> Option<Matcher> + Send + Sync + 'static,
    ) -> Self {
        Matcher::Bind {
            first: Box::new(self),
            select: Arc::new(select),
        }
    }

    /// Succeed only if `self` succeeds and `guard` holds afterwards.
    pub fn filter(self, guard: impl Fn(&BoundView<'_>) -> bool + Send + Sync + 'static) -> Self {
        self.and_then(Matcher::check(guard))
    }

    /// Run the steps left to right, stopping at the first failure.
    pub fn sequence(steps: impl IntoIterator<Item = Matcher>) -> Self {
        steps.into_iter().fold(Matcher::Succeed, Matcher::and_then)
    }

    /// Try to match against `tree`, extending `bindings`.
    ///
    /// Structural mismatch is `None`, never an error.
    pub fn attempt(&self, tree: &DependencyTree, bindings: Bindings) -> Option<Bindings> {
        match self {
            Matcher::Succeed => Some(bindings),
            Matcher::Element(element) => element.attempt(tree, bindings),
            Matcher::Check(guard) => guard(&bindings.view(tree)).then_some(bindings),
            Matcher::OrElse(first, second) => first
                .attempt(tree, bindings.clone())
                .or_else(|| second.attempt(tree, bindings)),
            Matcher::AndThen(first, next) => {
                let bindings = first.attempt(tree, bindings)?;
                next.attempt(tree, bindings)
            }
            Matcher::Bind { first, select } => {
                let bindings = first.attempt(tree, bindings)?;
                let next = select(&bindings.view(tree))?;
                next.attempt(tree, bindings)
            }
        }
    }

    /// Element matchers reachable without running a selector.
    pub(crate) fn elements(&self) -> Vec<&ElementMatcher> {
        let mut out = Vec::new();
        self.collect_elements(&mut out);
        out
    }

    fn collect_elements<'m>(&'m self, out: &mut Vec<&'m ElementMatcher>) {
        match self {
            Matcher::Succeed | Matcher::Check(_) => {}
            Matcher::Element(element) => out.push(element),
            Matcher::OrElse(a, b) | Matcher::AndThen(a, b) => {
                a.collect_elements(out);
                b.collect_elements(out);
            }
            Matcher::Bind { first, .. } => first.collect_elements(out),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Succeed => f.write_str("Succeed"),
            Matcher::Element(e) => f.debug_tuple("Element").field(e).finish(),
            Matcher::Check(_) => f.write_str("Check(..)"),
            Matcher::OrElse(a, b) => f.debug_tuple("OrElse").field(a).field(b).finish(),
            Matcher::AndThen(a, b) => f.debug_tuple("AndThen").field(a).field(b).finish(),
            Matcher::Bind { first, .. } => f.debug_struct("Bind").field("first", first).finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::expect::{adjective, noun};
    use super::*;
    use crate::tree::grammemes::{AdjectiveForm, Case, Degree, Gender, Number};
    use crate::tree::{
        AdjectiveCharacteristics, Characteristics, FeatureKind, LemmaVersion,
        NounCharacteristics, PartOfSpeech, SentenceElement,
    };

    fn socrates_is_old(negated: bool) -> DependencyTree {
        let mut root = SentenceElement::new("стар").at(2).reading(LemmaVersion::new(
            "стар",
            PartOfSpeech::Adjective,
            Characteristics::Adjective(AdjectiveCharacteristics {
                case: None,
                number: Some(Number::Singular),
                gender: Some(Gender::Masculine),
                form: AdjectiveForm::Short,
                degree: Degree::Attributive,
            }),
        ));
        if negated {
            root = root.child(
                Relation::NegationParticle,
                SentenceElement::new("не").at(1).reading(LemmaVersion::bare("не", PartOfSpeech::Particle)),
            );
        }
        root = root.child(
            Relation::Subject,
            SentenceElement::new("Сократ").at(0).reading(LemmaVersion::new(
                "сократ",
                PartOfSpeech::Noun,
                Characteristics::Noun(NounCharacteristics {
                    case: Case::Nominative,
                    number: Number::Singular,
                    gender: Gender::Masculine,
                    animacy: None,
                }),
            )),
        );
        DependencyTree::new(root)
    }

    const ROOT: SlotId = SlotId(0);
    const SUBJECT: SlotId = SlotId(1);
    const PARTICLE: SlotId = SlotId(2);

    fn root() -> Matcher {
        Matcher::element(ROOT, Locator::Root, adjective().form(AdjectiveForm::Short))
    }

    fn child(slot: SlotId, index: usize, relation: Relation, test: impl Into<NodeTest>) -> Matcher {
        Matcher::element(
            slot,
            Locator::Child {
                parent: ROOT,
                index,
                relation,
            },
            test,
        )
    }

    #[test]
    fn sequence_binds_every_step() {
        let tree = socrates_is_old(false);
        let m = root().and_then(child(SUBJECT, 0, Relation::Subject, noun().case(Case::Nominative)));
        let b = m.attempt(&tree, Bindings::new(2)).unwrap();
        assert_eq!(b.bound_count(), 2);
        assert!(b.covers(&tree));
    }

    #[test]
    fn children_are_positional() {
        let tree = socrates_is_old(true);
        // The subject is the second child here, so index 0 must fail.
        let m = root().and_then(child(SUBJECT, 0, Relation::Subject, noun()));
        assert!(m.attempt(&tree, Bindings::new(2)).is_none());

        let m = root()
            .and_then(child(PARTICLE, 0, Relation::NegationParticle, pos(PartOfSpeech::Particle, "не")))
            .and_then(child(SUBJECT, 1, Relation::Subject, noun()));
        assert!(m.attempt(&tree, Bindings::new(3)).unwrap().covers(&tree));
    }

    #[test]
    fn failure_discards_partial_bindings() {
        let tree = socrates_is_old(false);
        let failing = root().and_then(child(SUBJECT, 0, Relation::Object, noun()));
        let fallback = Matcher::Succeed;
        let b = failing.or_else(fallback).attempt(&tree, Bindings::new(2)).unwrap();
        assert_eq!(b.bound_count(), 0);
    }

    #[test]
    fn or_else_short_circuits() {
        let tree = socrates_is_old(false);
        let first = root();
        let second = Matcher::element(SUBJECT, Locator::Root, adjective());
        let b = first.or_else(second).attempt(&tree, Bindings::new(2)).unwrap();
        assert!(b.get(ROOT).is_some());
        assert!(b.get(SUBJECT).is_none());
    }

    #[test]
    fn filter_failure_is_match_failure() {
        let tree = socrates_is_old(false);
        let base = root().and_then(child(SUBJECT, 0, Relation::Subject, noun()));
        let agree = base
            .clone()
            .filter(|v| v.agree(ROOT, SUBJECT, FeatureKind::Gender));
        assert!(agree.attempt(&tree, Bindings::new(2)).is_some());

        let never = base.filter(|_| false);
        assert!(never.attempt(&tree, Bindings::new(2)).is_none());
    }

    #[test]
    fn child_of_unbound_parent_fails() {
        let tree = socrates_is_old(false);
        let orphan = child(SUBJECT, 0, Relation::Subject, noun());
        assert!(orphan.attempt(&tree, Bindings::new(2)).is_none());
    }

    #[test]
    fn bind_selects_the_next_matcher_from_bound_values() {
        let tree = socrates_is_old(true);
        let m = root().bind(|view| {
            let has_particle = view.tree().node(view.tree().root()).children.len() > 1;
            Some(if has_particle {
                child(PARTICLE, 0, Relation::NegationParticle, pos(PartOfSpeech::Particle, "не"))
                    .and_then(child(SUBJECT, 1, Relation::Subject, noun()))
            } else {
                child(SUBJECT, 0, Relation::Subject, noun())
            })
        });
        assert!(m.attempt(&tree, Bindings::new(3)).unwrap().covers(&tree));
        assert!(
            m.attempt(&socrates_is_old(false), Bindings::new(3))
                .unwrap()
                .covers(&socrates_is_old(false))
        );
    }

    #[test]
    fn sequence_of_nothing_succeeds() {
        let tree = socrates_is_old(false);
        let b = Matcher::sequence(Vec::new()).attempt(&tree, Bindings::new(0)).unwrap();
        assert_eq!(b.bound_count(), 0);
    }

    #[test]
    fn elements_are_collected_in_order() {
        let m = root()
            .and_then(child(SUBJECT, 0, Relation::Subject, noun()))
            .filter(|_| true);
        let slots: Vec<SlotId> = m.elements().iter().map(|e| e.slot).collect();
        assert_eq!(slots, vec![ROOT, SUBJECT]);
    }
}
