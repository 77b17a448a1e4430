//! Deterministic text rendering of terms and formulas.
//!
//! | Node | Rendering |
//! |---|---|
//! | variable | lowercase name: `сократ` |
//! | constant | first letter uppercased: `Сократ` |
//! | function | `Отец(сократ)` |
//! | predicate | uppercased name: `СТАР(сократ)` |
//! | equality | `x = y` |
//! | set membership | `x ∈ set<человек>` |
//! | negation | `¬P(x)`, or `¬(x ∈ set<s>)` for non-plain targets |
//! | connective | `A & B`, `A \| B`, `A ⇒ B` |
//! | quantifier | `(∀ x) scope` |

use std::fmt;

use super::{ConnectiveKind, Formula, Predicate, Term};

fn first_char_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => f.write_str(&name.to_lowercase()),
            Term::Constant(name) => f.write_str(&first_char_upper(name)),
            Term::Function { name, args } => {
                write!(f, "{}(", first_char_upper(name))?;
                write_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name.to_uppercase())?;
        write_list(f, &self.terms)?;
        f.write_str(")")
    }
}

/// Whether `operand` needs parentheses inside a connective of `parent` kind.
fn needs_parens(parent: ConnectiveKind, operand: &Formula) -> bool {
    match operand {
        Formula::Connective { kind, .. } => {
            *kind != parent || *kind == ConnectiveKind::Follows
        }
        Formula::Quantifier { .. } => true,
        _ => false,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, parent: ConnectiveKind, operand: &Formula) -> fmt::Result {
    if needs_parens(parent, operand) {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Predicate(p) => write!(f, "{p}"),
            Formula::Negated(target) => match **target {
                Formula::Predicate(ref p) => write!(f, "¬{p}"),
                ref other => write!(f, "¬({other})"),
            },
            Formula::Equality { left, right } => write!(f, "{left} = {right}"),
            Formula::SetContains { set, element } => write!(f, "{element} ∈ set<{set}>"),
            Formula::Connective { kind, left, right } => {
                write_operand(f, *kind, left)?;
                write!(f, " {} ", kind.symbol())?;
                write_operand(f, *kind, right)
            }
            Formula::Quantifier {
                kind,
                variable,
                scope,
            } => write!(f, "({} {}) {scope}", kind.symbol(), variable.to_lowercase()),
        }
    }
}
