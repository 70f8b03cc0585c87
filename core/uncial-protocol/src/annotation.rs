use rkyv::{Archive, Deserialize, Serialize};

use alloc::string::String;
use alloc::vec::Vec;

use crate::fields::*;
use crate::mask::FieldMask;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// The annotation record for one token. Every grammatical field is
/// independently nullable: an annotation is created on the first chord
/// commit and refined over later sessions.
///
/// Fields that are not meaningful for the current POS are kept anyway
/// (POS may change later); the export codec filters by POS at render time.
#[derive(Debug, Clone, PartialEq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Annotation {
    pub pos: Option<PartOfSpeech>,
    pub gender: Option<Gender>,
    pub number: Option<Number>,
    pub case: Option<Case>,
    pub declension: Option<Declension>,
    pub pronoun_type: Option<PronounType>,
    pub article_type: Option<ArticleType>,
    pub verb_class: Option<VerbClass>,
    pub verb_tense: Option<VerbTense>,
    pub verb_person: Option<VerbPerson>,
    pub verb_mood: Option<VerbMood>,
    pub verb_aspect: Option<VerbAspect>,
    pub verb_form: Option<VerbForm>,
    pub prep_case: Option<Case>,
    pub adjective_degree: Option<Degree>,
    pub adjective_inflection: Option<AdjectiveInflection>,
    pub adverb_degree: Option<Degree>,
    pub conjunction_type: Option<ConjunctionType>,

    // Meta-fields (per annotation, not per field)
    pub uncertain: bool,
    pub alternatives: Vec<String>,
    pub confidence: Option<u8>,
    pub provenance: Option<Provenance>,

    /// Monotonic counter bumped on every successful merge. The external
    /// writer uses it to discard stale overlapping writes.
    pub version: u32,
}

/// The fields the export codec considers meaningful for a POS.
pub fn relevant_fields(pos: PartOfSpeech) -> FieldMask {
    let nominal =
        FieldMask::GENDER | FieldMask::NUMBER | FieldMask::CASE | FieldMask::DECLENSION;
    let meta = FieldMask::POS
        | FieldMask::UNCERTAIN
        | FieldMask::ALTERNATIVES
        | FieldMask::CONFIDENCE
        | FieldMask::PROVENANCE;

    meta | match pos {
        PartOfSpeech::Noun => nominal,
        PartOfSpeech::Determiner => nominal | FieldMask::ARTICLE_TYPE,
        PartOfSpeech::Adjective => {
            nominal | FieldMask::ADJECTIVE_DEGREE | FieldMask::ADJECTIVE_INFLECTION
        }
        PartOfSpeech::Pronoun => {
            FieldMask::GENDER | FieldMask::NUMBER | FieldMask::CASE | FieldMask::PRONOUN_TYPE
        }
        PartOfSpeech::Verb => {
            FieldMask::NUMBER
                | FieldMask::VERB_CLASS
                | FieldMask::VERB_TENSE
                | FieldMask::VERB_PERSON
                | FieldMask::VERB_MOOD
                | FieldMask::VERB_ASPECT
                | FieldMask::VERB_FORM
        }
        PartOfSpeech::Preposition => FieldMask::PREP_CASE,
        PartOfSpeech::Adverb => FieldMask::ADVERB_DEGREE,
        PartOfSpeech::Conjunction => FieldMask::CONJUNCTION_TYPE,
        PartOfSpeech::Interjection => FieldMask::empty(),
    }
}

/// One sparse field write inside a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assign<T> {
    /// Field absent from the delta; merge leaves it untouched.
    Keep,
    /// Explicit unset.
    Clear,
    Set(T),
}

impl<T> Default for Assign<T> {
    fn default() -> Self {
        Assign::Keep
    }
}

impl<T> Assign<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Assign::Keep)
    }

    /// Overwrite `slot` unless this assignment is `Keep`.
    /// Returns true when the write happened (even if the value was equal).
    pub fn apply_to(self, slot: &mut Option<T>) -> bool {
        match self {
            Assign::Keep => false,
            Assign::Clear => {
                *slot = None;
                true
            }
            Assign::Set(v) => {
                *slot = Some(v);
                true
            }
        }
    }
}

/// Sparse output of one committed chord session. Ephemeral: consumed
/// exactly once by the merger, then discarded. Note: `uncertain` arrives
/// as an absolute write -- the interpreter resolves the `?` toggle against
/// the session context, which keeps merge application idempotent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationDelta {
    pub pos: Assign<PartOfSpeech>,
    pub gender: Assign<Gender>,
    pub number: Assign<Number>,
    pub case: Assign<Case>,
    pub declension: Assign<Declension>,
    pub pronoun_type: Assign<PronounType>,
    pub article_type: Assign<ArticleType>,
    pub verb_class: Assign<VerbClass>,
    pub verb_tense: Assign<VerbTense>,
    pub verb_person: Assign<VerbPerson>,
    pub verb_mood: Assign<VerbMood>,
    pub verb_aspect: Assign<VerbAspect>,
    pub verb_form: Assign<VerbForm>,
    pub prep_case: Assign<Case>,
    pub adjective_degree: Assign<Degree>,
    pub adjective_inflection: Assign<AdjectiveInflection>,
    pub adverb_degree: Assign<Degree>,
    pub conjunction_type: Assign<ConjunctionType>,

    pub uncertain: Assign<bool>,
    /// Alternate readings to append (duplicates are no-ops at merge time).
    pub add_alternatives: Vec<String>,
    pub confidence: Option<u8>,
    pub provenance: Option<Provenance>,
    /// `!` task asides; not grammar fields, forwarded to the note layer.
    pub tasks: Vec<String>,
}

impl AnnotationDelta {
    pub fn is_empty(&self) -> bool {
        self.touched().is_empty() && self.tasks.is_empty()
    }

    /// Mask of every field this delta writes.
    pub fn touched(&self) -> FieldMask {
        let mut mask = FieldMask::empty();
        macro_rules! mark {
            ($field:ident, $bit:ident) => {
                if !self.$field.is_keep() {
                    mask |= FieldMask::$bit;
                }
            };
        }
        mark!(pos, POS);
        mark!(gender, GENDER);
        mark!(number, NUMBER);
        mark!(case, CASE);
        mark!(declension, DECLENSION);
        mark!(pronoun_type, PRONOUN_TYPE);
        mark!(article_type, ARTICLE_TYPE);
        mark!(verb_class, VERB_CLASS);
        mark!(verb_tense, VERB_TENSE);
        mark!(verb_person, VERB_PERSON);
        mark!(verb_mood, VERB_MOOD);
        mark!(verb_aspect, VERB_ASPECT);
        mark!(verb_form, VERB_FORM);
        mark!(prep_case, PREP_CASE);
        mark!(adjective_degree, ADJECTIVE_DEGREE);
        mark!(adjective_inflection, ADJECTIVE_INFLECTION);
        mark!(adverb_degree, ADVERB_DEGREE);
        mark!(conjunction_type, CONJUNCTION_TYPE);
        mark!(uncertain, UNCERTAIN);
        if !self.add_alternatives.is_empty() {
            mask |= FieldMask::ALTERNATIVES;
        }
        if self.confidence.is_some() {
            mask |= FieldMask::CONFIDENCE;
        }
        if self.provenance.is_some() {
            mask |= FieldMask::PROVENANCE;
        }
        mask
    }
}

/// One field-level change recorded by a merge, as code strings
/// (`None` = null). The external command log replays these for undo.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AuditEntry {
    pub field: u32,
    pub old: Option<String>,
    pub new: Option<String>,
}

impl AuditEntry {
    pub fn field_mask(&self) -> FieldMask {
        FieldMask::from_bits_truncate(self.field)
    }
}

/// Immutable record of one merge, handed to the audit sink.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AuditDelta {
    /// Version of the annotation *after* this merge.
    pub version: u32,
    pub changed: FieldMask,
    pub entries: Vec<AuditEntry>,
}
