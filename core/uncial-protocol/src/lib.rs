#![no_std] // The protocol crate stays allocator-only for embedding/tools

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod fields;
pub mod mask;
pub mod annotation;
pub mod model;

// Re-export core types for convenience
pub use ids::{SentenceId, TokenId};
pub use fields::*;
pub use mask::FieldMask;
pub use annotation::{
    relevant_fields, Annotation, AnnotationDelta, Assign, AuditDelta, AuditEntry,
};
pub use model::{Note, NoteAnchor, Project, Sentence, Token};
