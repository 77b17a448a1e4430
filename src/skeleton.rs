//! Pattern skeletons for trees no pattern recognized.
//!
//! The skeleton lists every node in pre-order as a builder-style
//! declaration, using each node's first reading, so a catalogue author can
//! turn an unparsed sentence into a new pattern:
//!
//! ```text
//! // Сократ не стар
//! from стар in root(adjective().number(Number::Singular).gender(Gender::Masculine).form(AdjectiveForm::Short).degree(Degree::Attributive))
//! from не in стар.negation_particle(pos(PartOfSpeech::Particle, "не"))
//! from сократ in стар.subject(noun().case(Case::Nominative).number(Number::Singular).gender(Gender::Masculine))
//! select ?formula?
//! ```

use std::collections::HashMap;
use std::fmt::Write;

use crate::tree::{Characteristics, DependencyTree, Feature, Node, NodeId};

/// Render the skeleton of `tree`, headed by the sentence it came from.
pub fn render(sentence: &str, tree: &DependencyTree) -> String {
    let names = node_names(tree);
    let mut out = String::new();
    let _ = writeln!(out, "// {sentence}");
    render_node(tree, tree.root(), None, &names, &mut out);
    out.push_str("select ?formula?\n");
    out
}

fn render_node(
    tree: &DependencyTree,
    id: NodeId,
    parent: Option<NodeId>,
    names: &HashMap<NodeId, String>,
    out: &mut String,
) {
    let node = tree.node(id);
    let name = &names[&id];
    let test = node_test(node);
    match (parent, node.relation) {
        (Some(parent), Some(relation)) => {
            let _ = writeln!(out, "from {name} in {}.{}({test})", names[&parent], relation.selector());
        }
        _ => {
            let _ = writeln!(out, "from {name} in root({test})");
        }
    }
    for &child in &node.children {
        render_node(tree, child, Some(id), names, out);
    }
}

/// Identifier-like names, unique within the tree.
fn node_names(tree: &DependencyTree) -> HashMap<NodeId, String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    tree.ids()
        .map(|id| {
            let base = match tree.node(id).content.as_str() {
                "-" | "—" => "dash".to_string(),
                "," => "comma".to_string(),
                content => content.to_lowercase(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            let name = if *count == 1 { base } else { format!("{base}_{count}") };
            (id, name)
        })
        .collect()
}

fn node_test(node: &Node) -> String {
    let Some(reading) = node.readings.first() else {
        return format!("?(\"{}\")", node.content);
    };
    let builder = match &reading.characteristics {
        Characteristics::None => {
            return match reading.part_of_speech {
                Some(pos) => format!("pos(PartOfSpeech::{pos:?}, \"{}\")", node.content),
                None => format!("?(\"{}\")", node.content),
            };
        }
        characteristics => characteristics.kind().to_string(),
    };
    let mut test = format!("{builder}()");
    for feature in reading.characteristics.features() {
        test.push_str(&feature_call(feature));
    }
    test
}

fn feature_call(feature: Feature) -> String {
    match feature {
        Feature::Case(v) => format!(".case(Case::{v:?})"),
        Feature::Number(v) => format!(".number(Number::{v:?})"),
        Feature::Gender(v) => format!(".gender(Gender::{v:?})"),
        Feature::Animacy(v) => format!(".animacy(Animacy::{v:?})"),
        Feature::Mood(v) => format!(".mood(Mood::{v:?})"),
        Feature::Person(v) => format!(".person(Person::{v:?})"),
        Feature::Aspect(v) => format!(".aspect(Aspect::{v:?})"),
        Feature::Tense(v) => format!(".tense(Tense::{v:?})"),
        Feature::Transitivity(v) => format!(".transitivity(Transitivity::{v:?})"),
        Feature::AdjectiveForm(v) => format!(".form(AdjectiveForm::{v:?})"),
        Feature::Degree(v) => format!(".degree(Degree::{v:?})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::grammemes::{AdjectiveForm, Case, Degree, Gender, Number};
    use crate::tree::{
        AdjectiveCharacteristics, LemmaVersion, NounCharacteristics, PartOfSpeech, Relation,
        SentenceElement,
    };

    fn noun(content: &str) -> SentenceElement {
        SentenceElement::new(content).reading(LemmaVersion::new(
            content.to_lowercase(),
            PartOfSpeech::Noun,
            Characteristics::Noun(NounCharacteristics {
                case: Case::Nominative,
                number: Number::Singular,
                gender: Gender::Masculine,
                animacy: None,
            }),
        ))
    }

    #[test]
    fn skeleton_lists_nodes_in_pre_order() {
        let tree = DependencyTree::new(
            SentenceElement::new("стар")
                .reading(LemmaVersion::new(
                    "старый",
                    PartOfSpeech::Adjective,
                    Characteristics::Adjective(AdjectiveCharacteristics {
                        case: None,
                        number: Some(Number::Singular),
                        gender: Some(Gender::Masculine),
                        form: AdjectiveForm::Short,
                        degree: Degree::Attributive,
                    }),
                ))
                .child(
                    Relation::NegationParticle,
                    SentenceElement::new("не").reading(LemmaVersion::bare("не", PartOfSpeech::Particle)),
                )
                .child(Relation::Subject, noun("Сократ")),
        );
        let expected = "\
// Сократ не стар
from стар in root(adjective().number(Number::Singular).gender(Gender::Masculine).form(AdjectiveForm::Short).degree(Degree::Attributive))
from не in стар.negation_particle(pos(PartOfSpeech::Particle, \"не\"))
from сократ in стар.subject(noun().case(Case::Nominative).number(Number::Singular).gender(Gender::Masculine))
select ?formula?
";
        assert_eq!(render("Сократ не стар", &tree), expected);
    }

    #[test]
    fn punctuation_and_repeated_words_get_distinct_names() {
        let tree = DependencyTree::new(
            SentenceElement::new("-")
                .reading(LemmaVersion::bare("-", PartOfSpeech::Punctuation))
                .child(Relation::Subject, noun("Лев"))
                .child(Relation::Rhema, noun("лев"))
                .child(
                    Relation::Other,
                    SentenceElement::new(",").reading(LemmaVersion::bare(",", PartOfSpeech::Punctuation)),
                ),
        );
        let skeleton = render("Лев - лев,", &tree);
        assert!(skeleton.contains("from dash in root(pos(PartOfSpeech::Punctuation, \"-\"))"));
        assert!(skeleton.contains("from лев in dash.subject("));
        assert!(skeleton.contains("from лев_2 in dash.rhema("));
        assert!(skeleton.contains("from comma in dash.other("));
    }

    #[test]
    fn node_without_readings_is_marked_unknown() {
        let tree = DependencyTree::new(SentenceElement::new("ой"));
        assert!(render("ой", &tree).contains("from ой in root(?(\"ой\"))"));
    }
}
