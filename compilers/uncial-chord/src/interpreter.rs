use thiserror::Error;

use uncial_protocol::{AnnotationDelta, Assign, PartOfSpeech};

use crate::grammar::{self, SubChord};
use crate::token::{ChordToken, ChordTokenKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// Unrecognized token at the current state. Aborts the whole session's
    /// delta; the stored annotation is never touched.
    #[error("malformed chord: unexpected '{token}' at key {offset}")]
    MalformedChord { token: String, offset: usize },

    /// `%` value outside 0-100. Rejected outright, not clamped; the
    /// session emits nothing.
    #[error("confidence {value} is outside 0-100")]
    InvalidConfidenceRange { value: u32 },
}

/// What the interpreter knows about the token before the session starts.
/// A stored POS seeds the branch so follow-up sessions can chord
/// sub-commands (or meta-commands) without re-declaring POS; the stored
/// uncertain flag lets `?` resolve to an absolute write.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionContext {
    pub pos: Option<PartOfSpeech>,
    pub uncertain: bool,
}

/// Public view of where a session stands, for interactive feedback.
/// `Idle` has no session object: the session exists from the annotate key
/// until commit or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPosOrMeta,
    InPosBranch(PartOfSpeech),
    Error,
}

// Fine-grained machine state. AwaitValue/AwaitAlternative/AwaitConfidence
// are the fixed-arity tails of an open production.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Start,
    AwaitPos,
    InBranch(PartOfSpeech),
    AwaitValue(PartOfSpeech, SubChord),
    AwaitAlternative(Option<PartOfSpeech>),
    AwaitConfidence(Option<PartOfSpeech>),
    TaskText(Option<PartOfSpeech>),
    Failed(ChordError),
}

/// One in-progress chord session: accumulated delta plus a cursor into the
/// grammar. Ephemeral; never persisted. There is no timeout -- a session
/// lives until [`ChordSession::commit`] or [`ChordSession::cancel`].
#[derive(Debug)]
pub struct ChordSession {
    state: State,
    /// Branch context from the stored annotation. Only consulted before
    /// the branch is fixed.
    seeded: Option<PartOfSpeech>,
    /// Running value of the uncertain flag, so repeated `?` in one session
    /// still resolves to an absolute write.
    uncertain_now: bool,
    task_buf: Vec<String>,
    delta: AnnotationDelta,
}

impl ChordSession {
    pub fn begin(ctx: SessionContext) -> Self {
        Self {
            state: State::Start,
            seeded: ctx.pos,
            uncertain_now: ctx.uncertain,
            task_buf: Vec::new(),
            delta: AnnotationDelta::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.state {
            State::Failed(_) => SessionState::Error,
            State::Start | State::AwaitPos => match self.current_branch() {
                Some(pos) => SessionState::InPosBranch(pos),
                None => SessionState::AwaitingPosOrMeta,
            },
            State::InBranch(pos) | State::AwaitValue(pos, _) => SessionState::InPosBranch(*pos),
            State::AwaitAlternative(b) | State::AwaitConfidence(b) | State::TaskText(b) => {
                match b.or(self.seeded) {
                    Some(pos) => SessionState::InPosBranch(pos),
                    None => SessionState::AwaitingPosOrMeta,
                }
            }
        }
    }

    fn current_branch(&self) -> Option<PartOfSpeech> {
        match &self.state {
            State::InBranch(pos) | State::AwaitValue(pos, _) => Some(*pos),
            _ => self.seeded,
        }
    }

    fn fail(&mut self, err: ChordError) -> Result<(), ChordError> {
        self.state = State::Failed(err.clone());
        Err(err)
    }

    fn malformed(&mut self, tok: &ChordToken) -> Result<(), ChordError> {
        self.fail(ChordError::MalformedChord {
            token: tok.text.to_string(),
            offset: tok.span.start,
        })
    }

    /// Feed one token. An error here moves the session into the `Error`
    /// state: the delta so far is poisoned and `commit` will refuse it.
    pub fn feed(&mut self, tok: &ChordToken) -> Result<(), ChordError> {
        // Task text swallows everything after `!`, symbols included.
        if let State::TaskText(_) = self.state {
            self.task_buf.push(tok.text.to_string());
            return Ok(());
        }

        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }

        match tok.kind {
            ChordTokenKind::Symbol(sym) => self.feed_meta(sym, tok),
            ChordTokenKind::Word => self.feed_word(tok),
            ChordTokenKind::Unknown => self.malformed(tok),
        }
    }

    // Meta-productions are valid regardless of POS, but not inside the
    // fixed-arity tail of another production.
    fn feed_meta(&mut self, sym: char, tok: &ChordToken) -> Result<(), ChordError> {
        let branch = match &self.state {
            State::Start => None,
            State::InBranch(pos) => Some(*pos),
            // `P`, a sub-chord or another meta is still waiting for its tail
            _ => return self.malformed(tok),
        };

        match sym {
            '?' => {
                self.uncertain_now = !self.uncertain_now;
                self.delta.uncertain = Assign::Set(self.uncertain_now);
                Ok(())
            }
            '=' => {
                self.state = State::AwaitAlternative(branch);
                Ok(())
            }
            '%' => {
                self.state = State::AwaitConfidence(branch);
                Ok(())
            }
            '!' => {
                self.state = State::TaskText(branch);
                Ok(())
            }
            _ => self.malformed(tok),
        }
    }

    fn feed_word(&mut self, tok: &ChordToken) -> Result<(), ChordError> {
        match self.state.clone() {
            State::Start => {
                // 1. `P` declares POS explicitly
                if tok.text == "P" {
                    self.state = State::AwaitPos;
                    return Ok(());
                }
                // 2. A POS letter selects a branch for this session
                //    (without writing the pos field)
                if let Some(pos) = PartOfSpeech::from_code(tok.text) {
                    self.state = State::InBranch(pos);
                    return Ok(());
                }
                // 3. With a seeded branch, a sub-chord selector enters it
                //    directly -- no need to re-declare POS every session
                if let Some(seeded) = self.seeded {
                    if let Some(sub) = grammar::sub_chord(seeded, tok.text) {
                        self.state = State::AwaitValue(seeded, sub);
                        return Ok(());
                    }
                }
                self.malformed(tok)
            }
            State::AwaitPos => match PartOfSpeech::from_code(tok.text) {
                Some(pos) => {
                    self.delta.pos = Assign::Set(pos);
                    self.state = State::InBranch(pos);
                    Ok(())
                }
                None => self.malformed(tok),
            },
            State::InBranch(pos) => {
                // The branch is fixed for the rest of the session; only its
                // own sub-chords (and meta) are legal from here.
                match grammar::sub_chord(pos, tok.text) {
                    Some(sub) => {
                        self.state = State::AwaitValue(pos, sub);
                        Ok(())
                    }
                    None => self.malformed(tok),
                }
            }
            State::AwaitValue(pos, sub) => {
                if grammar::apply_value(sub, tok.text, &mut self.delta) {
                    self.state = State::InBranch(pos);
                    Ok(())
                } else {
                    self.malformed(tok)
                }
            }
            State::AwaitAlternative(branch) => {
                let text = tok.text.to_string();
                if !self.delta.add_alternatives.contains(&text) {
                    self.delta.add_alternatives.push(text);
                }
                self.state = self.resume(branch);
                Ok(())
            }
            State::AwaitConfidence(branch) => match tok.text.parse::<u32>() {
                Ok(value) if value <= 100 => {
                    self.delta.confidence = Some(value as u8);
                    self.state = self.resume(branch);
                    Ok(())
                }
                Ok(value) => self.fail(ChordError::InvalidConfidenceRange { value }),
                Err(_) => self.malformed(tok),
            },
            State::TaskText(_) | State::Failed(_) => unreachable!("handled in feed"),
        }
    }

    fn resume(&self, branch: Option<PartOfSpeech>) -> State {
        match branch {
            Some(pos) => State::InBranch(pos),
            None => State::Start,
        }
    }

    /// Terminal key. Emits the accumulated delta, or the session's error.
    /// A production still waiting for its tail is malformed.
    pub fn commit(mut self) -> Result<AnnotationDelta, ChordError> {
        match self.state {
            State::Start | State::InBranch(_) => {}
            State::TaskText(_) => {
                if self.task_buf.is_empty() {
                    return Err(ChordError::MalformedChord {
                        token: "!".to_string(),
                        offset: 0,
                    });
                }
                self.delta.tasks.push(self.task_buf.join(" "));
            }
            State::Failed(err) => return Err(err),
            State::AwaitPos
            | State::AwaitValue(..)
            | State::AwaitAlternative(_)
            | State::AwaitConfidence(_) => {
                return Err(ChordError::MalformedChord {
                    token: "<end of chord>".to_string(),
                    offset: 0,
                });
            }
        }
        Ok(self.delta)
    }

    /// Synchronous, total cancellation: the buffer is discarded, nothing
    /// is emitted.
    pub fn cancel(self) {}
}

/// Drive a whole token sequence through one session and commit it.
pub fn interpret(
    tokens: &[ChordToken<'_>],
    ctx: SessionContext,
) -> Result<AnnotationDelta, ChordError> {
    let mut session = ChordSession::begin(ctx);
    for tok in tokens {
        session.feed(tok)?;
    }
    session.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_with_spans;
    use uncial_protocol::{Case, Gender, Number, VerbClass, VerbMood, VerbPerson, VerbTense};

    fn run(input: &str, ctx: SessionContext) -> Result<AnnotationDelta, ChordError> {
        interpret(&lex_with_spans(input), ctx)
    }

    #[test]
    fn test_pos_declaration() {
        // "A P N" (annotate key consumed by the caller)
        let delta = run("P N", SessionContext::default()).unwrap();
        assert_eq!(delta.pos, Assign::Set(PartOfSpeech::Noun));
        assert_eq!(delta.gender, Assign::Keep);
    }

    #[test]
    fn test_noun_chain_any_order() {
        // The plan's own examples mix sibling order; both must parse
        let a = run("N g m n s c a", SessionContext::default()).unwrap();
        let b = run("N c a n s g m", SessionContext::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.gender, Assign::Set(Gender::Masculine));
        assert_eq!(a.number, Assign::Set(Number::Singular));
        assert_eq!(a.case, Assign::Set(Case::Accusative));
        assert_eq!(a.declension, Assign::Keep);
    }

    #[test]
    fn test_verb_full_chain() {
        // "A V c w2 t p m i p 3 n s" from the shortcut reference
        let delta = run("V c w2 t p m i p 3 n s", SessionContext::default()).unwrap();
        assert_eq!(delta.verb_class, Assign::Set(VerbClass::Weak2));
        assert_eq!(delta.verb_tense, Assign::Set(VerbTense::Past));
        assert_eq!(delta.verb_mood, Assign::Set(VerbMood::Indicative));
        assert_eq!(delta.verb_person, Assign::Set(VerbPerson::Third));
        assert_eq!(delta.number, Assign::Set(Number::Singular));
    }

    #[test]
    fn test_seeded_branch_skips_selector() {
        // Token already annotated as Noun: "A g f" works without "N"
        let ctx = SessionContext {
            pos: Some(PartOfSpeech::Noun),
            uncertain: false,
        };
        let delta = run("g f", ctx).unwrap();
        assert_eq!(delta.gender, Assign::Set(Gender::Feminine));
    }

    #[test]
    fn test_seeded_branch_can_be_overridden_first() {
        // POS selector as the first token still re-picks the branch
        let ctx = SessionContext {
            pos: Some(PartOfSpeech::Noun),
            uncertain: false,
        };
        let delta = run("V c s7", ctx).unwrap();
        assert_eq!(delta.verb_class, Assign::Set(VerbClass::Strong7));
    }

    #[test]
    fn test_branch_fixed_after_first_sub_chord() {
        // Once in the noun branch, "V" is just an unrecognized selector
        let err = run("N g m V", SessionContext::default()).unwrap_err();
        assert!(matches!(err, ChordError::MalformedChord { ref token, .. } if token == "V"));
    }

    #[test]
    fn test_uncertain_toggle_is_absolute() {
        // Stored uncertain=true + one "?" resolves to Set(false)
        let ctx = SessionContext {
            pos: Some(PartOfSpeech::Verb),
            uncertain: true,
        };
        let delta = run("?", ctx).unwrap();
        assert_eq!(delta.uncertain, Assign::Set(false));

        // Double toggle in one session lands back where it started
        let delta = run("? ?", ctx).unwrap();
        assert_eq!(delta.uncertain, Assign::Set(true));
    }

    #[test]
    fn test_alternative_and_confidence() {
        let delta = run("= s3 % 80", SessionContext::default()).unwrap();
        assert_eq!(delta.add_alternatives, vec!["s3".to_string()]);
        assert_eq!(delta.confidence, Some(80));
    }

    #[test]
    fn test_confidence_out_of_range() {
        let err = run("% 150", SessionContext::default()).unwrap_err();
        assert_eq!(err, ChordError::InvalidConfidenceRange { value: 150 });
    }

    #[test]
    fn test_malformed_aborts_whole_delta() {
        // "x" is no noun selector: nothing from the session survives,
        // not even the valid "g m" prefix
        let err = run("N g m x f", SessionContext::default()).unwrap_err();
        assert!(matches!(err, ChordError::MalformedChord { .. }));
    }

    #[test]
    fn test_dangling_tail_is_malformed() {
        // "c" opened a case sub-chord; committing without the value fails
        let err = run("N c", SessionContext::default()).unwrap_err();
        assert!(matches!(err, ChordError::MalformedChord { .. }));
    }

    #[test]
    fn test_task_marker_swallows_free_text() {
        let delta = run("! check the glossary for this form", SessionContext::default())
            .unwrap();
        assert_eq!(delta.tasks, vec!["check the glossary for this form".to_string()]);
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let mut session = ChordSession::begin(SessionContext::default());
        for tok in lex_with_spans("N g m") {
            session.feed(&tok).unwrap();
        }
        assert_eq!(session.state(), SessionState::InPosBranch(PartOfSpeech::Noun));
        session.cancel(); // drops the buffer, emits nothing
    }

    #[test]
    fn test_interjection_meta_only() {
        let delta = run("I ? % 40", SessionContext::default()).unwrap();
        assert_eq!(delta.uncertain, Assign::Set(true));
        assert_eq!(delta.confidence, Some(40));

        let err = run("I g m", SessionContext::default()).unwrap_err();
        assert!(matches!(err, ChordError::MalformedChord { .. }));
    }
}
