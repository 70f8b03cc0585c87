use uncial_protocol::{
    AdjectiveInflection, AnnotationDelta, ArticleType, Assign, Case, ConjunctionType, Declension,
    Degree, Gender, Number, PartOfSpeech, PronounType, VerbAspect, VerbClass, VerbForm, VerbMood,
    VerbPerson, VerbTense,
};

/// One sub-command inside a POS branch. The leading selector letter picks
/// the sub-chord; its tail has fixed arity (always one value code here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubChord {
    Gender,
    Number,
    Case,
    Declension,
    PronounType,
    ArticleType,
    VerbClass,
    VerbTense,
    VerbPerson,
    VerbMood,
    VerbAspect,
    VerbForm,
    PrepCase,
    AdjectiveDegree,
    AdjectiveInflection,
    AdverbDegree,
    ConjunctionType,
}

/// Static branch table: which sub-chord a selector letter names inside a
/// given POS branch. Selector letters are case-sensitive; sibling
/// sub-chords within one session form an unordered set, so this table
/// carries no ordering information.
pub fn sub_chord(pos: PartOfSpeech, selector: &str) -> Option<SubChord> {
    use PartOfSpeech::*;
    match (pos, selector) {
        (Noun, "g") | (Adjective, "g") | (Pronoun, "g") | (Determiner, "g") => {
            Some(SubChord::Gender)
        }
        (Noun, "n") | (Adjective, "n") | (Pronoun, "n") | (Determiner, "n") | (Verb, "n") => {
            Some(SubChord::Number)
        }
        (Noun, "c") | (Adjective, "c") | (Pronoun, "c") | (Determiner, "c") => {
            Some(SubChord::Case)
        }
        (Noun, "d") | (Determiner, "d") => Some(SubChord::Declension),

        (Pronoun, "t") => Some(SubChord::PronounType),
        (Determiner, "t") => Some(SubChord::ArticleType),

        (Verb, "c") => Some(SubChord::VerbClass),
        (Verb, "t") => Some(SubChord::VerbTense),
        (Verb, "p") => Some(SubChord::VerbPerson),
        (Verb, "m") => Some(SubChord::VerbMood),
        (Verb, "a") => Some(SubChord::VerbAspect),
        (Verb, "f") => Some(SubChord::VerbForm),

        (Preposition, "c") => Some(SubChord::PrepCase),
        (Adjective, "d") => Some(SubChord::AdjectiveDegree),
        (Adjective, "i") => Some(SubChord::AdjectiveInflection),
        (Adverb, "d") => Some(SubChord::AdverbDegree),
        (Conjunction, "t") => Some(SubChord::ConjunctionType),

        // Interjections take no sub-chords; only meta-productions apply.
        _ => None,
    }
}

fn write<T>(value: Option<T>, slot: &mut Assign<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Assign::Set(v);
            true
        }
        None => false,
    }
}

/// Decode a value code for a sub-chord and record it in the delta.
/// Returns false when the code is not legal for this sub-chord.
pub fn apply_value(sub: SubChord, code: &str, delta: &mut AnnotationDelta) -> bool {
    match sub {
        SubChord::Gender => write(Gender::from_code(code), &mut delta.gender),
        SubChord::Number => write(Number::from_code(code), &mut delta.number),
        SubChord::Case => write(Case::from_code(code), &mut delta.case),
        SubChord::Declension => write(Declension::from_code(code), &mut delta.declension),
        SubChord::PronounType => write(PronounType::from_code(code), &mut delta.pronoun_type),
        SubChord::ArticleType => write(ArticleType::from_code(code), &mut delta.article_type),
        SubChord::VerbClass => write(VerbClass::from_code(code), &mut delta.verb_class),
        SubChord::VerbTense => write(VerbTense::from_code(code), &mut delta.verb_tense),
        SubChord::VerbPerson => write(VerbPerson::from_code(code), &mut delta.verb_person),
        SubChord::VerbMood => write(VerbMood::from_code(code), &mut delta.verb_mood),
        SubChord::VerbAspect => write(VerbAspect::from_code(code), &mut delta.verb_aspect),
        SubChord::VerbForm => write(VerbForm::from_code(code), &mut delta.verb_form),
        SubChord::PrepCase => {
            // Prepositions never govern the nominative
            let case = Case::from_code(code).filter(|c| *c != Case::Nominative);
            write(case, &mut delta.prep_case)
        }
        SubChord::AdjectiveDegree => write(Degree::from_code(code), &mut delta.adjective_degree),
        SubChord::AdjectiveInflection => {
            write(AdjectiveInflection::from_code(code), &mut delta.adjective_inflection)
        }
        SubChord::AdverbDegree => write(Degree::from_code(code), &mut delta.adverb_degree),
        SubChord::ConjunctionType => {
            write(ConjunctionType::from_code(code), &mut delta.conjunction_type)
        }
    }
}
