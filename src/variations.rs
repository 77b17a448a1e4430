//! Sentence templates for authoring test inputs.
//!
//! One template stands for a family of sentences that should all produce
//! the same formula:
//!
//! - `(a|b|c)` is replaced by each alternative in turn;
//! - `[word]` is either kept (without brackets) or dropped together with
//!   the space in front of it.
//!
//! Alternatives are expanded first, then optional words inside each
//! result. The first group varies fastest.
//!
//! Expansion is capped at [`MAX_EXPANSIONS`] sentences per stage. Groups
//! past the cap stop varying: an alternative group keeps its first
//! alternative and an optional word is always kept.
//!
//! ```
//! use gari::variations::expand;
//!
//! assert_eq!(
//!     expand("Сократ (-|[-] это) человек"),
//!     ["Сократ - человек", "Сократ это человек", "Сократ - это человек"],
//! );
//! ```

/// Upper bound on the sentences produced from alternatives, and again from
/// the optional words of each of those.
pub const MAX_EXPANSIONS: usize = 1 << 16;

/// Every sentence `template` stands for, in a fixed order.
pub fn expand(template: &str) -> Vec<String> {
    alternatives(template)
        .iter()
        .flat_map(|realized| optionals(realized))
        .collect()
}

fn alternatives(template: &str) -> Vec<String> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open + 1..].find(')').map(|i| open + 1 + i) else {
            break;
        };
        groups.push(vec![rest[..open].to_string()]);
        groups.push(rest[open + 1..close].split('|').map(str::to_string).collect());
        rest = &rest[close + 1..];
    }
    groups.push(vec![rest.to_string()]);

    let mut total = 1usize;
    let mut varying = 0;
    for group in &groups {
        match total.checked_mul(group.len()) {
            Some(next) if next <= MAX_EXPANSIONS => {
                total = next;
                varying += 1;
            }
            _ => break,
        }
    }
    if varying < groups.len() {
        tracing::warn!(template, groups = groups.len(), varying, "too many alternatives, later groups fixed");
    }

    (0..total)
        .map(|mut n| {
            let mut out = String::new();
            for (i, group) in groups.iter().enumerate() {
                if i < varying {
                    out.push_str(&group[n % group.len()]);
                    n /= group.len();
                } else {
                    out.push_str(&group[0]);
                }
            }
            out
        })
        .collect()
}

enum Piece {
    Text(String),
    Optional(String),
}

fn optionals(value: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut rest = value;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open + 1..].find(']').map(|i| open + 1 + i) else {
            break;
        };
        text.push_str(&rest[..open]);
        let follows_space = text.ends_with(' ');
        if follows_space {
            text.pop();
        }
        pieces.push(Piece::Text(std::mem::take(&mut text)));
        let word = &rest[open + 1..close];
        pieces.push(Piece::Optional(if follows_space {
            format!(" {word}")
        } else {
            word.to_string()
        }));
        rest = &rest[close + 1..];
    }
    text.push_str(rest);
    pieces.push(Piece::Text(text));

    let optional_count = pieces
        .iter()
        .filter(|p| matches!(p, Piece::Optional(_)))
        .count();
    let varying = optional_count.min(MAX_EXPANSIONS.ilog2() as usize);
    if varying < optional_count {
        tracing::warn!(value, optional_count, varying, "too many optional words, later ones kept");
    }
    (0..1usize << varying)
        .map(|mask| {
            let mut out = String::new();
            let mut bit = 0;
            for piece in &pieces {
                match piece {
                    Piece::Text(t) => out.push_str(t),
                    Piece::Optional(word) => {
                        if bit >= varying || mask & (1 << bit) != 0 {
                            out.push_str(word);
                        }
                        bit += 1;
                    }
                }
            }
            if !value.starts_with(' ') && out.starts_with(' ') {
                out.remove(0);
            }
            out
        })
        .collect()
}
