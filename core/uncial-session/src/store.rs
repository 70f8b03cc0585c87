use std::collections::HashMap;

use thiserror::Error;

use uncial_protocol::{Annotation, AuditDelta, Note, Sentence, SentenceId, TokenId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Retryable: the caller re-fetches and re-applies. The core never
    /// auto-merges conflicting versions.
    #[error("version conflict for token {token:?}: stored {stored}, expected {expected}")]
    VersionConflict {
        token: TokenId,
        stored: u32,
        expected: u32,
    },
}

/// Durable home of annotation records. The core only reads snapshots and
/// writes whole-record replacements guarded by the version counter;
/// transactions and schema belong to the implementor.
pub trait AnnotationStore {
    fn get(&self, token: TokenId) -> Option<Annotation>;

    /// Whole-record replace, last-writer-wins by version: succeeds only
    /// when the stored version still equals `expected_version`.
    fn put(
        &mut self,
        token: TokenId,
        annotation: Annotation,
        expected_version: u32,
    ) -> Result<(), StoreError>;
}

/// Receives one [`AuditDelta`] after every successful merge.
/// Fire-and-forget from the core's perspective.
pub trait AuditSink {
    fn append(&mut self, token: TokenId, delta: AuditDelta);
}

/// Export-time collaborator resolving the notes of a sentence.
pub trait NoteSource {
    fn notes_for(&self, sentence: SentenceId) -> Vec<Note>;
}

/// Resolve every sentence's notes through the source before the sentences
/// are handed to the export renderer. Replaces whatever was embedded.
pub fn attach_notes(source: &impl NoteSource, sentences: &mut [Sentence]) {
    for sentence in sentences.iter_mut() {
        sentence.notes = source.notes_for(sentence.id);
    }
}

/// In-memory store for tests and the CLI tool.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<TokenId, Annotation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStore for MemoryStore {
    fn get(&self, token: TokenId) -> Option<Annotation> {
        self.records.get(&token).cloned()
    }

    fn put(
        &mut self,
        token: TokenId,
        annotation: Annotation,
        expected_version: u32,
    ) -> Result<(), StoreError> {
        let stored = self.records.get(&token).map_or(0, |a| a.version);
        if stored != expected_version {
            return Err(StoreError::VersionConflict {
                token,
                stored,
                expected: expected_version,
            });
        }
        self.records.insert(token, annotation);
        Ok(())
    }
}

/// In-memory audit log; keeps deltas in arrival order.
#[derive(Debug, Default)]
pub struct MemoryAudit {
    pub log: Vec<(TokenId, AuditDelta)>,
}

impl AuditSink for MemoryAudit {
    fn append(&mut self, token: TokenId, delta: AuditDelta) {
        self.log.push((token, delta));
    }
}

#[derive(Debug, Default)]
pub struct MemoryNotes {
    notes: HashMap<SentenceId, Vec<Note>>,
}

impl MemoryNotes {
    pub fn insert(&mut self, sentence: SentenceId, note: Note) {
        self.notes.entry(sentence).or_default().push(note);
    }
}

impl NoteSource for MemoryNotes {
    fn notes_for(&self, sentence: SentenceId) -> Vec<Note> {
        self.notes.get(&sentence).cloned().unwrap_or_default()
    }
}
