use thiserror::Error;

use uncial_chord::{interpret, lex_with_spans, ChordError, SessionContext};
use uncial_merge::MergeError;
use uncial_protocol::{Annotation, TokenId};

use crate::store::{AnnotationStore, AuditSink, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Chord(#[from] ChordError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives one chord commit end to end: fetch the stored record, seed the
/// session context from it, interpret the key text, merge, put the updated
/// snapshot (guarded by the version it was based on) and hand the audit
/// delta to the sink.
///
/// Everything here is synchronous on the interactive thread; durable
/// persistence behind the store is the implementor's business.
pub struct AnnotationEditor<S, A> {
    store: S,
    audit: A,
}

impl<S: AnnotationStore, A: AuditSink> AnnotationEditor<S, A> {
    pub fn new(store: S, audit: A) -> Self {
        Self { store, audit }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Interpret one committed chord session against a token. On any
    /// error the stored annotation is untouched (session isolation).
    pub fn commit_chord(&mut self, token: TokenId, keys: &str) -> Result<Annotation, EditError> {
        let current = self.store.get(token);
        let ctx = SessionContext {
            pos: current.as_ref().and_then(|a| a.pos),
            uncertain: current.as_ref().map_or(false, |a| a.uncertain),
        };

        let tokens = lex_with_spans(keys);
        let delta = interpret(&tokens, ctx)?;

        let expected_version = current.as_ref().map_or(0, |a| a.version);
        let outcome = uncial_merge::apply(current.as_ref(), &delta)?;

        self.store.put(token, outcome.updated.clone(), expected_version)?;
        self.audit.append(token, outcome.audit);
        Ok(outcome.updated)
    }
}
