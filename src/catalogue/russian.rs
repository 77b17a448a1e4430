//! Built-in patterns for simple Russian statements.
//!
//! Child declarations follow the order in which the analyzer emits
//! children: a negation particle precedes the subject, the subject
//! precedes the object or rhema.
//!
//! Short adjectives ("стар", "смертен") name their predicate by surface
//! form; nouns and verbs by lemma.

use crate::error::GariResult;
use crate::logic::{Formula, Term};
use crate::matcher::expect::{AdjectiveExpect, NounExpect, VerbExpect, adjective, noun, verb};
use crate::matcher::{BoundView, NodeTest, Pattern, PatternBuilder, PatternResult, SlotId, pos};
use crate::tree::grammemes::{AdjectiveForm, Case, Degree, Number, Tense};
use crate::tree::{FeatureKind, PartOfSpeech};

use super::Catalogue;

/// Every built-in pattern, in catalogue order.
pub fn catalogue() -> GariResult<Catalogue> {
    let patterns = vec![
        short_adjective()?,
        negated_short_adjective()?,
        membership()?,
        negated_membership()?,
        negated_dash_membership()?,
        negated_noun_membership()?,
        membership_is()?,
        negated_membership_is()?,
        intransitive_verb()?,
        negated_intransitive_verb()?,
        transitive_verb()?,
        negated_transitive_verb()?,
        false_that_short_adjective()?,
        false_that_noun_membership()?,
        false_that_membership()?,
        false_that_membership_is()?,
        false_that_intransitive_verb()?,
        every_noun_short_adjective()?,
    ];
    Ok(Catalogue::new(patterns)?)
}

/// Where a clause's head word hangs.
#[derive(Debug, Clone, Copy)]
enum Head {
    Root,
    /// Next collocation item of the given slot, as after "что".
    After(SlotId),
}

impl Head {
    fn declare(self, p: &mut PatternBuilder, test: impl Into<NodeTest>) -> SlotId {
        match self {
            Head::Root => p.root(test),
            Head::After(slot) => p.next_collocation_item(slot, test),
        }
    }
}

/// Formula of a matched clause.
type Clause = Box<dyn Fn(&BoundView<'_>) -> Option<Formula> + Send + Sync>;

fn statement(
    id: &str,
    clause: impl FnOnce(&mut PatternBuilder, Head) -> Clause,
) -> PatternResult<Pattern> {
    let mut p = PatternBuilder::new(id);
    let clause = clause(&mut p, Head::Root);
    p.build(move |b| clause(b))
}

/// "Неверно, что <clause>": the root chains `,` then `что` then the clause.
fn false_that(
    id: &str,
    clause: impl FnOnce(&mut PatternBuilder, Head) -> Clause,
) -> PatternResult<Pattern> {
    let mut p = PatternBuilder::new(id);
    let false_ = p.root(pos(PartOfSpeech::Adjective, "неверно"));
    let comma = p.next_clause(false_, pos(PartOfSpeech::Punctuation, ","));
    let that = p.next_collocation_item(comma, pos(PartOfSpeech::Conjunction, "что"));
    let clause = clause(&mut p, Head::After(that));
    p.build(move |b| Some(clause(b)?.negate()))
}

fn adjective_name(view: &BoundView<'_>, slot: SlotId) -> Option<String> {
    view.content(slot).map(str::to_lowercase)
}

fn variable(view: &BoundView<'_>, slot: SlotId) -> Option<Term> {
    view.lemma(slot).map(Term::variable)
}

fn negated_if(formula: Formula, negated: bool) -> Formula {
    if negated { formula.negate() } else { formula }
}

fn short_adjective_expect() -> AdjectiveExpect {
    adjective().form(AdjectiveForm::Short).degree(Degree::Attributive)
}

fn present_verb() -> VerbExpect {
    verb().tense(Tense::Present)
}

fn particle_not() -> NodeTest {
    pos(PartOfSpeech::Particle, "не")
}

fn this() -> NodeTest {
    pos(PartOfSpeech::PronounNoun, "это")
}

fn nominative() -> NounExpect {
    noun().case(Case::Nominative)
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

/// "Сократ [не] стар"
fn short_adjective_clause(p: &mut PatternBuilder, head: Head, negated: bool) -> Clause {
    let old = head.declare(p, short_adjective_expect());
    if negated {
        p.negation_particle(old, particle_not());
    }
    let who = p.subject(old, nominative());
    p.agree(old, who, FeatureKind::Gender);
    Box::new(move |b: &BoundView<'_>| {
        let formula = Formula::predicate(adjective_name(b, old)?, [variable(b, who)?]);
        Some(negated_if(formula, negated))
    })
}

/// "Сократ (-|это|- это) [не] человек", the particle hanging off the rhema.
fn membership_clause(p: &mut PatternBuilder, head: Head, negated: bool) -> Clause {
    let link = head.declare(p, pos(PartOfSpeech::Punctuation, "-").or(this()));
    let element = p.subject(link, nominative());
    p.either(
        |p| {
            p.next_collocation_item(link, this());
            p.filter(move |b| b.content(link) == Some("-"));
        },
        |_| {},
    );
    let set = p.rhema(link, nominative());
    if negated {
        p.negation_particle(set, particle_not());
    }
    Box::new(move |b: &BoundView<'_>| {
        let formula = Formula::set_contains(b.lemma(set)?, variable(b, element)?);
        Some(negated_if(formula, negated))
    })
}

/// "Сократ [не] человек", the set noun heading the clause.
fn noun_membership_clause(p: &mut PatternBuilder, head: Head, negated: bool) -> Clause {
    let set = head.declare(p, noun().case(Case::Nominative).number(Number::Singular));
    if negated {
        p.negation_particle(set, particle_not());
    }
    let element = p.subject(set, nominative());
    Box::new(move |b: &BoundView<'_>| {
        let formula = Formula::set_contains(b.lemma(set)?, variable(b, element)?);
        Some(negated_if(formula, negated))
    })
}

/// "Сократ [не] является человеком"
fn membership_is_clause(p: &mut PatternBuilder, head: Head, negated: bool) -> Clause {
    let is = head.declare(p, verb().lemma("являться").tense(Tense::Present));
    if negated {
        p.negation_particle(is, particle_not());
    }
    let element = p.subject(is, nominative());
    let set = p.object(is, noun().case(Case::Instrumental));
    p.agree(is, element, FeatureKind::Number);
    Box::new(move |b: &BoundView<'_>| {
        let formula = Formula::set_contains(b.lemma(set)?, variable(b, element)?);
        Some(negated_if(formula, negated))
    })
}

/// "Вода [не] кипит"
fn intransitive_clause(p: &mut PatternBuilder, head: Head, negated: bool) -> Clause {
    let action = head.declare(p, present_verb());
    if negated {
        p.negation_particle(action, particle_not());
    }
    let who = p.subject(action, nominative());
    p.agree(action, who, FeatureKind::Number);
    Box::new(move |b: &BoundView<'_>| {
        let formula = Formula::predicate(b.lemma(action)?, [variable(b, who)?]);
        Some(negated_if(formula, negated))
    })
}

/// "Вова [не] любит Машу"
fn transitive_clause(p: &mut PatternBuilder, head: Head, negated: bool) -> Clause {
    let action = head.declare(p, present_verb());
    if negated {
        p.negation_particle(action, particle_not());
    }
    let who = p.subject(action, nominative());
    let whom = p.object(action, noun().case(Case::Accusative));
    p.agree(action, who, FeatureKind::Number);
    Box::new(move |b: &BoundView<'_>| {
        let formula = Formula::predicate(b.lemma(action)?, [variable(b, who)?, variable(b, whom)?]);
        Some(negated_if(formula, negated))
    })
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// "Сократ стар"
pub fn short_adjective() -> PatternResult<Pattern> {
    statement("сократ стар", |p, head| short_adjective_clause(p, head, false))
}

/// "Сократ не стар"
pub fn negated_short_adjective() -> PatternResult<Pattern> {
    statement("сократ не стар", |p, head| short_adjective_clause(p, head, true))
}

/// "Сократ - человек", "Сократ это человек", "Сократ - это человек"
pub fn membership() -> PatternResult<Pattern> {
    statement("сократ - человек", |p, head| membership_clause(p, head, false))
}

/// "Сократ это не человек", "Сократ - это не человек"
pub fn negated_membership() -> PatternResult<Pattern> {
    statement("сократ это не человек", |p, head| membership_clause(p, head, true))
}

/// "Сократ - не человек"
pub fn negated_dash_membership() -> PatternResult<Pattern> {
    statement("сократ - не человек", |p, head| {
        let dash = head.declare(p, pos(PartOfSpeech::Punctuation, "-"));
        p.negation_particle(dash, particle_not());
        let element = p.subject(dash, nominative());
        let set = p.rhema(dash, nominative());
        Box::new(move |b: &BoundView<'_>| Some(Formula::set_contains(b.lemma(set)?, variable(b, element)?).negate()))
    })
}

/// "Сократ не человек"
pub fn negated_noun_membership() -> PatternResult<Pattern> {
    statement("сократ не человек", |p, head| noun_membership_clause(p, head, true))
}

/// "Сократ является человеком"
pub fn membership_is() -> PatternResult<Pattern> {
    statement("сократ является человеком", |p, head| membership_is_clause(p, head, false))
}

/// "Сократ не является человеком"
pub fn negated_membership_is() -> PatternResult<Pattern> {
    statement("сократ не является человеком", |p, head| membership_is_clause(p, head, true))
}

/// "Вода кипит"
pub fn intransitive_verb() -> PatternResult<Pattern> {
    statement("вода кипит", |p, head| intransitive_clause(p, head, false))
}

/// "Вода не кипит"
pub fn negated_intransitive_verb() -> PatternResult<Pattern> {
    statement("вода не кипит", |p, head| intransitive_clause(p, head, true))
}

/// "Вова любит Машу"
pub fn transitive_verb() -> PatternResult<Pattern> {
    statement("вова любит машу", |p, head| transitive_clause(p, head, false))
}

/// "Вова не любит Машу"
pub fn negated_transitive_verb() -> PatternResult<Pattern> {
    statement("вова не любит машу", |p, head| transitive_clause(p, head, true))
}

/// "Неверно, что Сократ стар"
pub fn false_that_short_adjective() -> PatternResult<Pattern> {
    false_that("неверно, что сократ стар", |p, head| short_adjective_clause(p, head, false))
}

/// "Неверно, что Сократ человек"
pub fn false_that_noun_membership() -> PatternResult<Pattern> {
    false_that("неверно, что сократ человек", |p, head| noun_membership_clause(p, head, false))
}

/// "Неверно, что Сократ - человек", with "это" or "- это" in place of the dash too
pub fn false_that_membership() -> PatternResult<Pattern> {
    false_that("неверно, что сократ - человек", |p, head| membership_clause(p, head, false))
}

/// "Неверно, что Сократ является человеком"
pub fn false_that_membership_is() -> PatternResult<Pattern> {
    false_that("неверно, что сократ является человеком", |p, head| {
        membership_is_clause(p, head, false)
    })
}

/// "Неверно, что вода кипит"
pub fn false_that_intransitive_verb() -> PatternResult<Pattern> {
    false_that("неверно, что вода кипит", |p, head| intransitive_clause(p, head, false))
}

/// "Каждый человек смертен"
pub fn every_noun_short_adjective() -> PatternResult<Pattern> {
    let mut p = PatternBuilder::new("каждый человек смертен");
    let mortal = p.root(adjective().form(AdjectiveForm::Short).degree(Degree::Attributive));
    let kind = p.subject(mortal, noun().case(Case::Nominative).number(Number::Singular));
    p.attribute(kind, adjective().lemma("каждый").form(AdjectiveForm::Full));
    p.agree(mortal, kind, FeatureKind::Gender);
    p.build(move |b| {
        let x = Term::variable("x");
        Some(Formula::for_all(
            "x",
            Formula::set_contains(b.lemma(kind)?, x.clone())
                .follows(Formula::predicate(adjective_name(b, mortal)?, [x])),
        ))
    })
}
