pub mod lexer;
pub mod token;
pub mod grammar;
pub mod interpreter;

pub use interpreter::{interpret, ChordError, ChordSession, SessionContext, SessionState};
pub use lexer::lex_with_spans;
pub use token::{ChordToken, ChordTokenKind, Span};

#[cfg(test)]
mod tests {
    use super::*;
    use uncial_protocol::{Assign, Gender, PartOfSpeech};

    #[test]
    fn test_keystrokes_to_delta_integration() {
        // Whole pipeline for one session: raw key text -> tokens -> delta.
        // "A" (the annotate key itself) is consumed by the editor shell
        // before the session starts, so it never reaches the lexer.
        let tokens = lex_with_spans("P N g m ?");
        let delta = interpret(&tokens, SessionContext::default()).unwrap();

        assert_eq!(delta.pos, Assign::Set(PartOfSpeech::Noun));
        assert_eq!(delta.gender, Assign::Set(Gender::Masculine));
        assert_eq!(delta.uncertain, Assign::Set(true));
        assert!(delta.add_alternatives.is_empty());
    }

    #[test]
    fn test_unknown_key_position_reported() {
        let tokens = lex_with_spans("N g m @ c a");
        let err = interpret(&tokens, SessionContext::default()).unwrap_err();
        match err {
            ChordError::MalformedChord { token, offset } => {
                assert_eq!(token, "@");
                assert_eq!(offset, 6);
            }
            other => panic!("expected MalformedChord, got {other:?}"),
        }
    }
}
