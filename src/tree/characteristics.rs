//! Part-of-speech specific grammatical characteristics.
//!
//! [`Characteristics`] is a tagged union with one record per word class.
//! Patterns never look fields up by name: an expectation is a [`Feature`]
//! value, and [`CharacteristicsKind::supports`] is the exhaustive table of
//! which features exist on which variant. Asking a noun for its tense is a
//! declaration error caught when the pattern is built, not a silent
//! mismatch at parse time.

use serde::{Deserialize, Serialize};

use super::grammemes::{
    AdjectiveForm, Animacy, Aspect, Case, Degree, Gender, Mood, Number, Person, Tense,
    Transitivity,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounCharacteristics {
    pub case: Case,
    pub number: Number,
    pub gender: Gender,
    #[serde(default)]
    pub animacy: Option<Animacy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbCharacteristics {
    #[serde(default)]
    pub case: Option<Case>,
    pub number: Number,
    pub mood: Mood,
    #[serde(default)]
    pub person: Option<Person>,
    pub aspect: Aspect,
    pub tense: Tense,
    #[serde(default)]
    pub transitivity: Option<Transitivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjectiveCharacteristics {
    #[serde(default)]
    pub case: Option<Case>,
    #[serde(default)]
    pub number: Option<Number>,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub form: AdjectiveForm,
    pub degree: Degree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdverbCharacteristics {
    pub degree: Degree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfinitiveCharacteristics {
    pub aspect: Aspect,
    pub transitivity: Transitivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounCharacteristics {
    pub gender: Gender,
    pub number: Number,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerundCharacteristics {
    pub case: Case,
    pub aspect: Aspect,
}

/// Grammatical characteristics of one reading, keyed by word class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Characteristics {
    Noun(NounCharacteristics),
    Verb(VerbCharacteristics),
    Adjective(AdjectiveCharacteristics),
    Adverb(AdverbCharacteristics),
    Infinitive(InfinitiveCharacteristics),
    Pronoun(PronounCharacteristics),
    Gerund(GerundCharacteristics),
    /// Particles, punctuation, conjunctions: no inflection to speak of.
    None,
}

/// The variant tag of [`Characteristics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicsKind {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Infinitive,
    Pronoun,
    Gerund,
    None,
}

/// One expected grammatical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Case(Case),
    Number(Number),
    Gender(Gender),
    Animacy(Animacy),
    Mood(Mood),
    Person(Person),
    Aspect(Aspect),
    Tense(Tense),
    Transitivity(Transitivity),
    AdjectiveForm(AdjectiveForm),
    Degree(Degree),
}

/// The field a [`Feature`] constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Case,
    Number,
    Gender,
    Animacy,
    Mood,
    Person,
    Aspect,
    Tense,
    Transitivity,
    AdjectiveForm,
    Degree,
}

impl Feature {
    pub fn kind(self) -> FeatureKind {
        match self {
            Feature::Case(_) => FeatureKind::Case,
            Feature::Number(_) => FeatureKind::Number,
            Feature::Gender(_) => FeatureKind::Gender,
            Feature::Animacy(_) => FeatureKind::Animacy,
            Feature::Mood(_) => FeatureKind::Mood,
            Feature::Person(_) => FeatureKind::Person,
            Feature::Aspect(_) => FeatureKind::Aspect,
            Feature::Tense(_) => FeatureKind::Tense,
            Feature::Transitivity(_) => FeatureKind::Transitivity,
            Feature::AdjectiveForm(_) => FeatureKind::AdjectiveForm,
            Feature::Degree(_) => FeatureKind::Degree,
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureKind::Case => "case",
            FeatureKind::Number => "number",
            FeatureKind::Gender => "gender",
            FeatureKind::Animacy => "animacy",
            FeatureKind::Mood => "mood",
            FeatureKind::Person => "person",
            FeatureKind::Aspect => "aspect",
            FeatureKind::Tense => "tense",
            FeatureKind::Transitivity => "transitivity",
            FeatureKind::AdjectiveForm => "adjective_form",
            FeatureKind::Degree => "degree",
        };
        f.write_str(name)
    }
}

impl std::fmt::Display for CharacteristicsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CharacteristicsKind::Noun => "noun",
            CharacteristicsKind::Verb => "verb",
            CharacteristicsKind::Adjective => "adjective",
            CharacteristicsKind::Adverb => "adverb",
            CharacteristicsKind::Infinitive => "infinitive",
            CharacteristicsKind::Pronoun => "pronoun",
            CharacteristicsKind::Gerund => "gerund",
            CharacteristicsKind::None => "none",
        };
        f.write_str(name)
    }
}

impl CharacteristicsKind {
    /// The fields carried by this variant, in declaration order.
    pub fn fields(self) -> &'static [FeatureKind] {
        use FeatureKind as F;
        match self {
            CharacteristicsKind::Noun => &[F::Case, F::Number, F::Gender, F::Animacy],
            CharacteristicsKind::Verb => &[
                F::Case,
                F::Number,
                F::Mood,
                F::Person,
                F::Aspect,
                F::Tense,
                F::Transitivity,
            ],
            CharacteristicsKind::Adjective => {
                &[F::Case, F::Number, F::Gender, F::AdjectiveForm, F::Degree]
            }
            CharacteristicsKind::Adverb => &[F::Degree],
            CharacteristicsKind::Infinitive => &[F::Aspect, F::Transitivity],
            CharacteristicsKind::Pronoun => &[F::Gender, F::Number, F::Person],
            CharacteristicsKind::Gerund => &[F::Case, F::Aspect],
            CharacteristicsKind::None => &[],
        }
    }

    /// Whether this variant has a field for `feature`.
    pub fn supports(self, feature: FeatureKind) -> bool {
        self.fields().contains(&feature)
    }
}

impl Characteristics {
    pub fn kind(&self) -> CharacteristicsKind {
        match self {
            Characteristics::Noun(_) => CharacteristicsKind::Noun,
            Characteristics::Verb(_) => CharacteristicsKind::Verb,
            Characteristics::Adjective(_) => CharacteristicsKind::Adjective,
            Characteristics::Adverb(_) => CharacteristicsKind::Adverb,
            Characteristics::Infinitive(_) => CharacteristicsKind::Infinitive,
            Characteristics::Pronoun(_) => CharacteristicsKind::Pronoun,
            Characteristics::Gerund(_) => CharacteristicsKind::Gerund,
            Characteristics::None => CharacteristicsKind::None,
        }
    }

    /// The value of one field, or `None` when the variant lacks the field
    /// or the analyzer left it unspecified.
    pub fn feature(&self, kind: FeatureKind) -> Option<Feature> {
        use FeatureKind as F;
        match (self, kind) {
            (Characteristics::Noun(n), F::Case) => Some(Feature::Case(n.case)),
            (Characteristics::Noun(n), F::Number) => Some(Feature::Number(n.number)),
            (Characteristics::Noun(n), F::Gender) => Some(Feature::Gender(n.gender)),
            (Characteristics::Noun(n), F::Animacy) => n.animacy.map(Feature::Animacy),

            (Characteristics::Verb(v), F::Case) => v.case.map(Feature::Case),
            (Characteristics::Verb(v), F::Number) => Some(Feature::Number(v.number)),
            (Characteristics::Verb(v), F::Mood) => Some(Feature::Mood(v.mood)),
            (Characteristics::Verb(v), F::Person) => v.person.map(Feature::Person),
            (Characteristics::Verb(v), F::Aspect) => Some(Feature::Aspect(v.aspect)),
            (Characteristics::Verb(v), F::Tense) => Some(Feature::Tense(v.tense)),
            (Characteristics::Verb(v), F::Transitivity) => v.transitivity.map(Feature::Transitivity),

            (Characteristics::Adjective(a), F::Case) => a.case.map(Feature::Case),
            (Characteristics::Adjective(a), F::Number) => a.number.map(Feature::Number),
            (Characteristics::Adjective(a), F::Gender) => a.gender.map(Feature::Gender),
            (Characteristics::Adjective(a), F::AdjectiveForm) => Some(Feature::AdjectiveForm(a.form)),
            (Characteristics::Adjective(a), F::Degree) => Some(Feature::Degree(a.degree)),

            (Characteristics::Adverb(a), F::Degree) => Some(Feature::Degree(a.degree)),

            (Characteristics::Infinitive(i), F::Aspect) => Some(Feature::Aspect(i.aspect)),
            (Characteristics::Infinitive(i), F::Transitivity) => Some(Feature::Transitivity(i.transitivity)),

            (Characteristics::Pronoun(p), F::Gender) => Some(Feature::Gender(p.gender)),
            (Characteristics::Pronoun(p), F::Number) => Some(Feature::Number(p.number)),
            (Characteristics::Pronoun(p), F::Person) => Some(Feature::Person(p.person)),

            (Characteristics::Gerund(g), F::Case) => Some(Feature::Case(g.case)),
            (Characteristics::Gerund(g), F::Aspect) => Some(Feature::Aspect(g.aspect)),

            _ => None,
        }
    }

    /// Whether this reading carries exactly `expected`.
    pub fn has(&self, expected: Feature) -> bool {
        self.feature(expected.kind()) == Some(expected)
    }

    /// All specified fields, in the variant's declaration order.
    pub fn features(&self) -> Vec<Feature> {
        self.kind()
            .fields()
            .iter()
            .filter_map(|&kind| self.feature(kind))
            .collect()
    }
}
