//! First-order predicate logic: terms and formulas.
//!
//! Formulas are immutable trees compared structurally. Each variant has a
//! single deterministic rendering (see [`render`]) and the whole type is
//! closed under [`Formula::negate`], which pushes negation down to atomic
//! predicates.
//!
//! ```
//! use gari::logic::{Formula, Term};
//!
//! let old = Formula::predicate("стар", [Term::variable("сократ")]);
//! assert_eq!(old.to_string(), "СТАР(сократ)");
//! assert_eq!(old.negate().to_string(), "¬СТАР(сократ)");
//! ```

pub mod negate;
pub mod render;

use serde::{Deserialize, Serialize};

/// A logic term: the arguments of predicates and functions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    Constant(String),
    /// A function application; compares name and arguments elementwise.
    Function { name: String, args: Vec<Term> },
}

impl Term {
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Term::Function {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }
}

/// A named predicate applied to an ordered list of terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    pub terms: Vec<Term>,
}

/// Binary connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectiveKind {
    And,
    Or,
    /// Implication, rendered `⇒`.
    Follows,
}

impl ConnectiveKind {
    pub fn symbol(self) -> char {
        match self {
            ConnectiveKind::And => '&',
            ConnectiveKind::Or => '|',
            ConnectiveKind::Follows => '⇒',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantifierKind {
    Universal,
    Existential,
}

impl QuantifierKind {
    /// Swap universal and existential.
    pub fn flip(self) -> Self {
        match self {
            QuantifierKind::Universal => QuantifierKind::Existential,
            QuantifierKind::Existential => QuantifierKind::Universal,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            QuantifierKind::Universal => '∀',
            QuantifierKind::Existential => '∃',
        }
    }
}

/// A predicate-logic formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    Predicate(Predicate),
    /// Negation of a predicate (or, when built by hand, of any formula).
    Negated(Box<Formula>),
    /// The binary predicate `=`.
    Equality { left: Term, right: Term },
    /// The binary predicate `∈`; used as a quantifier guard.
    SetContains { set: String, element: Term },
    Connective {
        kind: ConnectiveKind,
        left: Box<Formula>,
        right: Box<Formula>,
    },
    Quantifier {
        kind: QuantifierKind,
        variable: String,
        scope: Box<Formula>,
    },
}

impl Formula {
    pub fn predicate(name: impl Into<String>, terms: impl IntoIterator<Item = Term>) -> Self {
        Formula::Predicate(Predicate {
            name: name.into(),
            terms: terms.into_iter().collect(),
        })
    }

    /// Wrap without normalizing. Use [`Formula::negate`] for the logical negation.
    pub fn negated(target: Formula) -> Self {
        Formula::Negated(Box::new(target))
    }

    pub fn equality(left: Term, right: Term) -> Self {
        Formula::Equality { left, right }
    }

    pub fn set_contains(set: impl Into<String>, element: Term) -> Self {
        Formula::SetContains {
            set: set.into(),
            element,
        }
    }

    pub fn connective(kind: ConnectiveKind, left: Formula, right: Formula) -> Self {
        Formula::Connective {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::connective(ConnectiveKind::And, left, right)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::connective(ConnectiveKind::Or, left, right)
    }

    /// `self ⇒ consequence`.
    pub fn follows(self, consequence: Formula) -> Self {
        Self::connective(ConnectiveKind::Follows, self, consequence)
    }

    pub fn quantifier(kind: QuantifierKind, variable: impl Into<String>, scope: Formula) -> Self {
        Formula::Quantifier {
            kind,
            variable: variable.into(),
            scope: Box::new(scope),
        }
    }

    pub fn for_all(variable: impl Into<String>, scope: Formula) -> Self {
        Self::quantifier(QuantifierKind::Universal, variable, scope)
    }

    pub fn exists(variable: impl Into<String>, scope: Formula) -> Self {
        Self::quantifier(QuantifierKind::Existential, variable, scope)
    }

    /// Whether this is an atomic predicate (plain, equality, or set membership).
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Formula::Predicate(_) | Formula::Equality { .. } | Formula::SetContains { .. }
        )
    }
}

impl std::ops::BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Formula) -> Formula {
        Formula::and(self, rhs)
    }
}

impl std::ops::BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Formula) -> Formula {
        Formula::or(self, rhs)
    }
}

impl std::ops::Not for Formula {
    type Output = Formula;

    fn not(self) -> Formula {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functions_compare_arguments_elementwise() {
        let a = Term::function("отец", [Term::variable("сократ")]);
        let b = Term::function("отец", [Term::variable("сократ")]);
        let c = Term::function("отец", [Term::variable("платон")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Term::function("отец", []));
    }

    #[test]
    fn term_kinds_are_distinct() {
        assert_ne!(Term::variable("x"), Term::constant("x"));
    }

    #[test]
    fn operators_build_connectives() {
        let p = Formula::predicate("p", [Term::variable("x")]);
        let q = Formula::predicate("q", [Term::variable("x")]);
        assert_eq!(p.clone() & q.clone(), Formula::and(p.clone(), q.clone()));
        assert_eq!(p.clone() | q.clone(), Formula::or(p.clone(), q.clone()));
        assert_eq!(
            p.clone().follows(q.clone()),
            Formula::connective(ConnectiveKind::Follows, p, q)
        );
    }

    #[test]
    fn quantifier_flip_is_an_involution() {
        assert_eq!(QuantifierKind::Universal.flip(), QuantifierKind::Existential);
        assert_eq!(QuantifierKind::Universal.flip().flip(), QuantifierKind::Universal);
    }

    #[test]
    fn atomic_classification() {
        let x = Term::variable("x");
        assert!(Formula::predicate("p", [x.clone()]).is_atomic());
        assert!(Formula::equality(x.clone(), x.clone()).is_atomic());
        assert!(Formula::set_contains("s", x.clone()).is_atomic());
        assert!(!Formula::negated(Formula::predicate("p", [x.clone()])).is_atomic());
        assert!(!Formula::for_all("x", Formula::predicate("p", [x])).is_atomic());
    }

    #[test]
    fn formulas_roundtrip_through_json() {
        let f = Formula::for_all(
            "x",
            Formula::set_contains("человек", Term::variable("x"))
                .follows(Formula::predicate("смертен", [Term::variable("x")])),
        );
        let json = serde_json::to_string(&f).unwrap();
        let back: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
