pub mod editor;
pub mod store;

pub use editor::{AnnotationEditor, EditError};
pub use store::{
    attach_notes, AnnotationStore, AuditSink, MemoryAudit, MemoryNotes, MemoryStore, NoteSource,
    StoreError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use uncial_protocol::{Case, Gender, Number, PartOfSpeech, TokenId, VerbClass, VerbMood,
        VerbPerson, VerbTense};

    fn editor() -> AnnotationEditor<MemoryStore, MemoryAudit> {
        AnnotationEditor::new(MemoryStore::new(), MemoryAudit::default())
    }

    #[test]
    fn test_incremental_noun_refinement() {
        // Four separate sessions on one token: POS first, then gender,
        // number, case, each committed on its own.
        let mut ed = editor();
        let token = TokenId(7);

        ed.commit_chord(token, "P N").unwrap();
        ed.commit_chord(token, "g m").unwrap();
        ed.commit_chord(token, "n s").unwrap();
        let ann = ed.commit_chord(token, "c a").unwrap();

        assert_eq!(ann.pos, Some(PartOfSpeech::Noun));
        assert_eq!(ann.gender, Some(Gender::Masculine));
        assert_eq!(ann.number, Some(Number::Singular));
        assert_eq!(ann.case, Some(Case::Accusative));
        assert_eq!(ann.declension, None); // never chorded
        assert_eq!(ann.version, 4);
        assert_eq!(ed.audit().log.len(), 4);
    }

    #[test]
    fn test_single_session_verb_chain() {
        let mut ed = editor();
        let token = TokenId(3);

        ed.commit_chord(token, "P V").unwrap();
        let ann = ed.commit_chord(token, "c w2 t p m i p 3 n s").unwrap();

        assert_eq!(ann.verb_class, Some(VerbClass::Weak2));
        assert_eq!(ann.verb_tense, Some(VerbTense::Past));
        assert_eq!(ann.verb_mood, Some(VerbMood::Indicative));
        assert_eq!(ann.verb_person, Some(VerbPerson::Third));
        assert_eq!(ann.number, Some(Number::Singular));
    }

    #[test]
    fn test_uncertainty_then_alternative() {
        let mut ed = editor();
        let token = TokenId(9);

        ed.commit_chord(token, "P V").unwrap();
        ed.commit_chord(token, "c w2").unwrap();
        ed.commit_chord(token, "?").unwrap();
        let ann = ed.commit_chord(token, "= s3").unwrap();

        assert!(ann.uncertain);
        assert_eq!(ann.alternatives, vec!["s3".to_string()]);
    }

    #[test]
    fn test_confidence_range_enforced() {
        let mut ed = editor();
        let token = TokenId(2);

        ed.commit_chord(token, "% 80").unwrap();
        let err = ed.commit_chord(token, "% 150").unwrap_err();

        assert!(matches!(err, EditError::Chord(_)));
        // The rejected session changed nothing
        assert_eq!(ed.store().get(token).unwrap().confidence, Some(80));
    }

    #[test]
    fn test_session_isolation_on_malformed_chord() {
        let mut ed = editor();
        let token = TokenId(5);

        ed.commit_chord(token, "P N").unwrap();
        ed.commit_chord(token, "g m").unwrap();
        let before = ed.store().get(token);

        // Valid prefix, then garbage: the whole session aborts
        let err = ed.commit_chord(token, "n s # c a").unwrap_err();
        assert!(matches!(err, EditError::Chord(_)));
        assert_eq!(ed.store().get(token), before);
        assert_eq!(ed.audit().log.len(), 2); // nothing appended for the bad session
    }

    #[test]
    fn test_seeded_pos_carries_across_sessions() {
        let mut ed = editor();
        let token = TokenId(11);

        ed.commit_chord(token, "P V").unwrap();
        // Next session chords verb sub-commands without re-declaring POS
        let ann = ed.commit_chord(token, "c s7 t n").unwrap();
        assert_eq!(ann.verb_class, Some(VerbClass::Strong7));
        assert_eq!(ann.verb_tense, Some(VerbTense::Present));
    }
}
