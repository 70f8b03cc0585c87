use thiserror::Error;

use uncial_protocol::{
    relevant_fields, Annotation, Case, Declension, Degree, FieldMask, Number, PartOfSpeech,
    PronounType, VerbClass,
};

/// The exact strings here are part of the export format. Changing any of
/// them changes already-published documents, so treat the tables as frozen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("no abbreviation for the {part} combination")]
    UnmappableCombination { part: &'static str },
}

/// Ordered part lists for the two annotation tiers of a rendered token.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagRender {
    pub superscript: Vec<String>,
    pub subscript: Vec<String>,
}

impl TagRender {
    pub fn is_empty(&self) -> bool {
        self.superscript.is_empty() && self.subscript.is_empty()
    }
}

/// Strict encoding: fails when the annotation holds a combination the
/// abbreviation tables cannot express (half of a case+number compound).
pub fn encode(annotation: &Annotation) -> Result<TagRender, CodecError> {
    let compound = compound_case_number(annotation)?;
    Ok(assemble(annotation, compound))
}

/// Export-path encoding: an unmappable part is omitted instead of failing,
/// so a half-annotated token never aborts a document render.
pub fn encode_lossy(annotation: &Annotation) -> TagRender {
    let compound = compound_case_number(annotation).unwrap_or(None);
    assemble(annotation, compound)
}

fn assemble(annotation: &Annotation, compound: Option<String>) -> TagRender {
    // Stale fields survive a POS change in the record; only the fields
    // relevant to the current POS may render.
    let relevant = |bit: FieldMask| {
        annotation
            .pos
            .map_or(true, |pos| relevant_fields(pos).contains(bit))
    };

    let mut superscript = Vec::new();
    if let Some(case) = annotation.case.filter(|_| relevant(FieldMask::CASE)) {
        superscript.push(case.code().to_string());
    }
    if let Some(number) = annotation.number.filter(|_| relevant(FieldMask::NUMBER)) {
        superscript.push(number.code().to_string());
    }
    if let Some(gender) = annotation.gender.filter(|_| relevant(FieldMask::GENDER)) {
        superscript.push(gender.code().to_string());
    }
    if let Some(pos) = annotation.pos {
        superscript.push(pos.code().to_string());
    }

    let mut subscript = Vec::new();
    if let Some(part) = compound {
        subscript.push(part);
    }
    let mut primary_idx = None;
    if let Some(part) = class_detail(annotation) {
        subscript.push(part);
        primary_idx = Some(subscript.len() - 1);
    }
    if let Some(part) = degree_part(annotation) {
        subscript.push(part.to_string());
    }

    if !annotation.alternatives.is_empty() {
        // Alternatives join onto the class value they contest; fall back
        // to the last part when no class detail was emitted.
        let idx = primary_idx.or_else(|| subscript.len().checked_sub(1));
        let slot = match idx {
            Some(i) => Some(&mut subscript[i]),
            None => superscript.last_mut(),
        };
        if let Some(primary) = slot {
            if annotation.uncertain {
                primary.push('?');
            }
            for alt in &annotation.alternatives {
                primary.push('/');
                primary.push_str(alt);
            }
        }
    } else if annotation.uncertain {
        if let Some(last) = subscript.last_mut() {
            last.push('?');
        } else if let Some(last) = superscript.last_mut() {
            last.push('?');
        }
    }

    TagRender {
        superscript,
        subscript,
    }
}

/// Compound case+number abbreviation (`dat1`, `accpl`). Only built for a
/// POS whose paradigm declines for case; a verb's number alone is not a
/// half-compound.
fn compound_case_number(annotation: &Annotation) -> Result<Option<String>, CodecError> {
    let declines = annotation
        .pos
        .map_or(false, |pos| relevant_fields(pos).contains(FieldMask::CASE));
    if !declines {
        return Ok(None);
    }
    match (annotation.case, annotation.number) {
        (None, None) => Ok(None),
        (Some(case), Some(number)) => {
            Ok(Some(format!("{}{}", case_abbrev(case), number_suffix(number))))
        }
        _ => Err(CodecError::UnmappableCombination {
            part: "case+number",
        }),
    }
}

fn case_abbrev(case: Case) -> &'static str {
    match case {
        Case::Nominative => "nom",
        Case::Accusative => "acc",
        Case::Genitive => "gen",
        Case::Dative => "dat",
        Case::Instrumental => "ins",
    }
}

fn number_suffix(number: Number) -> &'static str {
    match number {
        Number::Singular => "1",
        Number::Plural => "pl",
    }
}

fn class_detail(annotation: &Annotation) -> Option<String> {
    let pos = annotation.pos?;
    match pos {
        PartOfSpeech::Noun | PartOfSpeech::Determiner => annotation
            .declension
            .map(|d| format!("n:{}", declension_label(d))),
        PartOfSpeech::Verb => annotation
            .verb_class
            .map(|c| verb_class_label(c).to_string()),
        PartOfSpeech::Pronoun => annotation
            .pronoun_type
            .map(|t| format!("pron:{}", pronoun_label(t))),
        PartOfSpeech::Adjective => annotation.adjective_inflection.map(|i| {
            match i {
                uncial_protocol::AdjectiveInflection::Strong => "aj:strong",
                uncial_protocol::AdjectiveInflection::Weak => "aj:weak",
            }
            .to_string()
        }),
        PartOfSpeech::Preposition => annotation.prep_case.map(|c| format!("+{}", case_abbrev(c))),
        PartOfSpeech::Conjunction => annotation.conjunction_type.map(|t| {
            match t {
                uncial_protocol::ConjunctionType::Coordinating => "co",
                uncial_protocol::ConjunctionType::Subordinating => "sub",
            }
            .to_string()
        }),
        PartOfSpeech::Adverb | PartOfSpeech::Interjection => None,
    }
}

fn degree_part(annotation: &Annotation) -> Option<&'static str> {
    let degree = match annotation.pos? {
        PartOfSpeech::Adjective => annotation.adjective_degree?,
        PartOfSpeech::Adverb => annotation.adverb_degree?,
        _ => return None,
    };
    match degree {
        // Positive is the unmarked default
        Degree::Positive => None,
        Degree::Comparative => Some("comp"),
        Degree::Superlative => Some("supl"),
    }
}

fn declension_label(declension: Declension) -> &'static str {
    match declension {
        Declension::Strong => "strong",
        Declension::Weak => "weak",
        Declension::Other => "other",
        Declension::IStem => "i",
        Declension::UStem => "u",
        Declension::JaStem => "ja",
        Declension::JoStem => "jo",
        Declension::WaStem => "wa",
        Declension::WoStem => "wo",
    }
}

/// Verb classes keep their stored short codes so `/`-joined alternative
/// readings (raw codes) line up with the primary.
fn verb_class_label(class: VerbClass) -> &'static str {
    match class {
        VerbClass::Anomalous => "anom",
        other => other.code(),
    }
}

fn pronoun_label(subtype: PronounType) -> &'static str {
    match subtype {
        PronounType::Personal => "pers",
        PronounType::Reflexive => "refl",
        PronounType::Relative => "rel",
        PronounType::Demonstrative => "dem",
        PronounType::Interrogative => "inter",
        PronounType::Miscellaneous => "misc",
        PronounType::Indefinite => "indef",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uncial_protocol::{Gender, VerbMood, VerbPerson, VerbTense};

    #[test]
    fn test_noun_tiers() {
        let ann = Annotation {
            pos: Some(PartOfSpeech::Noun),
            gender: Some(Gender::Masculine),
            number: Some(Number::Singular),
            case: Some(Case::Dative),
            declension: Some(Declension::Strong),
            ..Annotation::default()
        };
        let render = encode(&ann).unwrap();
        assert_eq!(render.superscript, vec!["d", "s", "m", "N"]);
        assert_eq!(render.subscript, vec!["dat1", "n:strong"]);
    }

    #[test]
    fn test_verb_number_is_not_half_a_compound() {
        let ann = Annotation {
            pos: Some(PartOfSpeech::Verb),
            verb_class: Some(VerbClass::Weak2),
            verb_tense: Some(VerbTense::Past),
            verb_mood: Some(VerbMood::Indicative),
            verb_person: Some(VerbPerson::Third),
            number: Some(Number::Singular),
            ..Annotation::default()
        };
        let render = encode(&ann).unwrap();
        assert_eq!(render.superscript, vec!["s", "V"]);
        assert_eq!(render.subscript, vec!["w2"]);
    }

    #[test]
    fn test_stale_nominal_fields_hidden_after_pos_change() {
        // Re-tagged from Noun to Verb: the old case/gender stay in the
        // record but must not render; number is verb-relevant and stays
        let ann = Annotation {
            pos: Some(PartOfSpeech::Verb),
            gender: Some(Gender::Masculine),
            number: Some(Number::Singular),
            case: Some(Case::Dative),
            verb_class: Some(VerbClass::Weak2),
            ..Annotation::default()
        };
        let render = encode(&ann).unwrap();
        assert_eq!(render.superscript, vec!["s", "V"]);
        assert_eq!(render.subscript, vec!["w2"]);
    }

    #[test]
    fn test_uncertain_primary_with_alternatives() {
        let ann = Annotation {
            pos: Some(PartOfSpeech::Verb),
            verb_class: Some(VerbClass::Weak2),
            uncertain: true,
            alternatives: vec!["s3".to_string()],
            ..Annotation::default()
        };
        let render = encode(&ann).unwrap();
        assert_eq!(render.subscript, vec!["w2?/s3"]);
    }

    #[test]
    fn test_uncertain_marks_last_emitted_value() {
        let ann = Annotation {
            pos: Some(PartOfSpeech::Noun),
            gender: Some(Gender::Feminine),
            uncertain: true,
            ..Annotation::default()
        };
        // No subscript parts, so the marker lands on the superscript
        let render = encode(&ann).unwrap();
        assert_eq!(render.superscript, vec!["f", "N?"]);
        assert!(render.subscript.is_empty());
    }

    #[test]
    fn test_half_compound_is_unmappable() {
        let ann = Annotation {
            pos: Some(PartOfSpeech::Noun),
            case: Some(Case::Genitive),
            declension: Some(Declension::Weak),
            ..Annotation::default()
        };
        assert_eq!(
            encode(&ann),
            Err(CodecError::UnmappableCombination {
                part: "case+number"
            })
        );
        // Lossy path drops the compound, keeps the rest
        let render = encode_lossy(&ann);
        assert_eq!(render.superscript, vec!["g", "N"]);
        assert_eq!(render.subscript, vec!["n:weak"]);
    }

    #[test]
    fn test_preposition_government_and_conjunction_type() {
        let prep = Annotation {
            pos: Some(PartOfSpeech::Preposition),
            prep_case: Some(Case::Dative),
            ..Annotation::default()
        };
        assert_eq!(encode(&prep).unwrap().subscript, vec!["+dat"]);

        let conj = Annotation {
            pos: Some(PartOfSpeech::Conjunction),
            conjunction_type: Some(uncial_protocol::ConjunctionType::Subordinating),
            ..Annotation::default()
        };
        assert_eq!(encode(&conj).unwrap().subscript, vec!["sub"]);
    }

    #[test]
    fn test_adjective_inflection_and_degree() {
        let ann = Annotation {
            pos: Some(PartOfSpeech::Adjective),
            adjective_inflection: Some(uncial_protocol::AdjectiveInflection::Weak),
            adjective_degree: Some(Degree::Comparative),
            ..Annotation::default()
        };
        assert_eq!(encode(&ann).unwrap().subscript, vec!["aj:weak", "comp"]);

        // Positive degree stays unmarked
        let plain = Annotation {
            adjective_degree: Some(Degree::Positive),
            ..ann
        };
        assert_eq!(encode(&plain).unwrap().subscript, vec!["aj:weak"]);
    }

    #[test]
    fn test_empty_annotation_renders_nothing() {
        assert!(encode(&Annotation::default()).unwrap().is_empty());
    }
}
