//! Negation normal form for a single negation step.
//!
//! [`Formula::negate`] returns a formula equivalent to `¬f` in which the
//! negation sits on atomic predicates only: connectives are rewritten with
//! De Morgan's laws and quantifiers flip their kind.
//!
//! A conjunction whose left operand is a set-membership guard is treated
//! as the body of a guarded existential: `(∃ x) x ∈ S & P(x)` negates to
//! `(∀ x) x ∈ S ⇒ ¬P(x)`, so the guard is kept and the conjunction becomes
//! an implication. This rewrite is only equivalent when the conjunction is
//! the direct scope of an existential being flipped in the same step; a
//! guard-shaped conjunction negated anywhere else yields `S ⇒ ¬P`, which is
//! not `¬(S & P)`.

use super::{ConnectiveKind, Formula};

impl Formula {
    /// Logical negation, pushed down to the atoms.
    pub fn negate(&self) -> Formula {
        match self {
            Formula::Negated(target) => (**target).clone(),

            Formula::Predicate(_) | Formula::Equality { .. } | Formula::SetContains { .. } => {
                Formula::negated(self.clone())
            }

            Formula::Connective { kind, left, right } => match kind {
                ConnectiveKind::And if matches!(**left, Formula::SetContains { .. }) => {
                    Formula::connective(ConnectiveKind::Follows, (**left).clone(), right.negate())
                }
                ConnectiveKind::And => Formula::or(left.negate(), right.negate()),
                ConnectiveKind::Or => Formula::and(left.negate(), right.negate()),
                ConnectiveKind::Follows => Formula::and((**left).clone(), right.negate()),
            },

            Formula::Quantifier {
                kind,
                variable,
                scope,
            } => Formula::quantifier(kind.flip(), variable.clone(), scope.negate()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::logic::{Formula, QuantifierKind, Term};

    fn p(name: &str) -> Formula {
        Formula::predicate(name, [Term::variable("x")])
    }

    fn guard(set: &str) -> Formula {
        Formula::set_contains(set, Term::variable("x"))
    }

    #[test]
    fn double_negation_of_atoms_is_identity() {
        let atoms = [
            p("p"),
            Formula::equality(Term::variable("x"), Term::constant("сократ")),
            guard("человек"),
        ];
        for atom in atoms {
            assert_eq!(atom.negate().negate(), atom);
        }
    }

    #[test]
    fn atoms_are_wrapped() {
        assert_eq!(p("p").negate(), Formula::negated(p("p")));
    }

    #[test]
    fn de_morgan_and_or() {
        assert_eq!(
            (p("a") & p("b")).negate(),
            Formula::or(p("a").negate(), p("b").negate())
        );
        assert_eq!(
            (p("a") | p("b")).negate(),
            Formula::and(p("a").negate(), p("b").negate())
        );
    }

    #[test]
    fn implication_negates_to_conjunction() {
        assert_eq!(
            p("a").follows(p("b")).negate(),
            Formula::and(p("a"), p("b").negate())
        );
    }

    #[test]
    fn guarded_conjunction_keeps_the_guard() {
        assert_eq!(
            (guard("s") & p("p")).negate(),
            guard("s").follows(p("p").negate())
        );
    }

    #[test]
    fn guard_on_the_right_is_not_special() {
        assert_eq!(
            (p("p") & guard("s")).negate(),
            Formula::or(p("p").negate(), guard("s").negate())
        );
    }

    #[test]
    fn universal_flips_to_existential() {
        let all = Formula::for_all("x", guard("s").follows(p("p")));
        assert_eq!(
            all.negate(),
            Formula::exists("x", guard("s") & p("p").negate())
        );
    }

    #[test]
    fn existential_flips_to_universal() {
        let some = Formula::exists("x", guard("s") & p("p"));
        assert_eq!(
            some.negate(),
            Formula::for_all("x", guard("s").follows(p("p").negate()))
        );
    }

    #[test]
    fn nested_quantifiers_flip_each_level() {
        let f = Formula::for_all(
            "x",
            Formula::exists("y", Formula::predicate("любить", [Term::variable("x"), Term::variable("y")])),
        );
        match f.negate() {
            Formula::Quantifier { kind, scope, .. } => {
                assert_eq!(kind, QuantifierKind::Existential);
                assert!(matches!(
                    *scope,
                    Formula::Quantifier { kind: QuantifierKind::Universal, .. }
                ));
            }
            other => panic!("expected quantifier, got {other:?}"),
        }
    }

    #[test]
    fn not_operator_negates() {
        assert_eq!(!p("a"), p("a").negate());
    }
}
