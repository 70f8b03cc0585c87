use rkyv::{Archive, Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::ids::SentenceId;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Ordered unit of the source-language sentence. Immutable once tokenized.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Token {
    pub surface: String,
    pub lemma: Option<String>,
    /// 0-based position within the owning sentence.
    pub order_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum NoteAnchor {
    /// Applies to the sentence as a whole.
    Sentence,
    /// Anchored to one token by order index.
    Token(u32),
    /// Anchored to an inclusive token range.
    Span(u32, u32),
}

/// A clarifying note attached to a sentence, token, or token span.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Note {
    pub anchor: NoteAnchor,
    pub text: String,
}

/// One sentence ready for export: tokens, their annotations (index-aligned
/// with `tokens`, `None` for unannotated), a modern-English translation
/// (possibly empty), and ordered notes.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Sentence {
    pub id: SentenceId,
    pub tokens: Vec<Token>,
    pub annotations: Vec<Option<Annotation>>,
    pub translation: String,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub sentences: Vec<Sentence>,
}
