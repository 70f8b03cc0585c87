//! Field-level last-writer-wins merge of an [`AnnotationDelta`] onto an
//! [`Annotation`], producing the updated record plus an [`AuditDelta`] for
//! the external command log.

use thiserror::Error;

use uncial_protocol::{Annotation, AnnotationDelta, Assign, AuditDelta, AuditEntry, FieldMask};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Defensive invariant check only: the interpreter guarantees deltas
    /// are well-formed, so this is unreachable from the chord path.
    #[error("malformed delta: {0}")]
    InvalidFieldForDelta(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub updated: Annotation,
    pub audit: AuditDelta,
}

fn record(
    entries: &mut Vec<AuditEntry>,
    changed: &mut FieldMask,
    bit: FieldMask,
    old: Option<String>,
    new: Option<String>,
) {
    *changed |= bit;
    entries.push(AuditEntry {
        field: bit.bits(),
        old,
        new,
    });
}

/// Apply a delta. Every field present in the delta overwrites the current
/// value; absent fields are untouched. All writes are absolute, so the
/// operation is idempotent: a no-op application changes neither the record
/// nor its version.
pub fn apply(
    current: Option<&Annotation>,
    delta: &AnnotationDelta,
) -> Result<MergeOutcome, MergeError> {
    if let Some(c) = delta.confidence {
        if c > 100 {
            return Err(MergeError::InvalidFieldForDelta("confidence out of range"));
        }
    }

    let mut updated = current.cloned().unwrap_or_default();
    let mut entries = Vec::new();
    let mut changed = FieldMask::empty();

    macro_rules! merge_coded {
        ($field:ident, $bit:ident) => {
            match delta.$field {
                Assign::Keep => {}
                Assign::Clear => {
                    if let Some(old) = updated.$field.take() {
                        record(
                            &mut entries,
                            &mut changed,
                            FieldMask::$bit,
                            Some(old.code().to_string()),
                            None,
                        );
                    }
                }
                Assign::Set(v) => {
                    let old = updated.$field.replace(v);
                    if old != Some(v) {
                        record(
                            &mut entries,
                            &mut changed,
                            FieldMask::$bit,
                            old.map(|o| o.code().to_string()),
                            Some(v.code().to_string()),
                        );
                    }
                }
            }
        };
    }

    merge_coded!(pos, POS);
    merge_coded!(gender, GENDER);
    merge_coded!(number, NUMBER);
    merge_coded!(case, CASE);
    merge_coded!(declension, DECLENSION);
    merge_coded!(pronoun_type, PRONOUN_TYPE);
    merge_coded!(article_type, ARTICLE_TYPE);
    merge_coded!(verb_class, VERB_CLASS);
    merge_coded!(verb_tense, VERB_TENSE);
    merge_coded!(verb_person, VERB_PERSON);
    merge_coded!(verb_mood, VERB_MOOD);
    merge_coded!(verb_aspect, VERB_ASPECT);
    merge_coded!(verb_form, VERB_FORM);
    merge_coded!(prep_case, PREP_CASE);
    merge_coded!(adjective_degree, ADJECTIVE_DEGREE);
    merge_coded!(adjective_inflection, ADJECTIVE_INFLECTION);
    merge_coded!(adverb_degree, ADVERB_DEGREE);
    merge_coded!(conjunction_type, CONJUNCTION_TYPE);

    // Uncertain arrives as an absolute write (the interpreter resolved the
    // toggle), so overwriting keeps idempotence.
    if let Assign::Set(v) = delta.uncertain {
        if updated.uncertain != v {
            record(
                &mut entries,
                &mut changed,
                FieldMask::UNCERTAIN,
                Some(updated.uncertain.to_string()),
                Some(v.to_string()),
            );
            updated.uncertain = v;
        }
    }

    // Alternatives append; duplicates of an identical string are no-ops.
    for alt in &delta.add_alternatives {
        if !updated.alternatives.contains(alt) {
            updated.alternatives.push(alt.clone());
            record(
                &mut entries,
                &mut changed,
                FieldMask::ALTERNATIVES,
                None,
                Some(alt.clone()),
            );
        }
    }

    if let Some(c) = delta.confidence {
        if updated.confidence != Some(c) {
            record(
                &mut entries,
                &mut changed,
                FieldMask::CONFIDENCE,
                updated.confidence.map(|v| v.to_string()),
                Some(c.to_string()),
            );
            updated.confidence = Some(c);
        }
    }

    if let Some(p) = delta.provenance {
        if updated.provenance != Some(p) {
            record(
                &mut entries,
                &mut changed,
                FieldMask::PROVENANCE,
                updated.provenance.map(|v| v.code().to_string()),
                Some(p.code().to_string()),
            );
            updated.provenance = Some(p);
        }
    }

    // Version bumps only on real change; a no-op merge returns the record
    // byte-identical, which is what makes re-applies safe to detect.
    if !changed.is_empty() {
        updated.version += 1;
    }

    let audit = AuditDelta {
        version: updated.version,
        changed,
        entries,
    };

    Ok(MergeOutcome { updated, audit })
}
