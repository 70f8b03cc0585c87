use uncial_protocol::{NoteAnchor, Sentence};

use crate::codec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Plain,
    Italic,
    Superscript,
    Subscript,
}

/// One step of the flat instruction stream a [`DocumentSink`] consumes.
/// Keeping the stream free of nesting lets a sink stay a dumb translator
/// to whatever document format it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    ParagraphBegin,
    Run { text: String, style: RunStyle },
    ParagraphEnd,
}

impl Instruction {
    fn run(text: impl Into<String>, style: RunStyle) -> Self {
        Self::Run {
            text: text.into(),
            style,
        }
    }
}

/// Consumer of a rendered instruction stream. Implementors own the output
/// format; the renderer never sees it.
pub trait DocumentSink {
    fn write(&mut self, instruction: Instruction);
}

impl DocumentSink for Vec<Instruction> {
    fn write(&mut self, instruction: Instruction) {
        self.push(instruction);
    }
}

/// Render ordered sentences into the instruction stream. A codec failure
/// on a half-annotated token drops the affected part, never the export.
pub fn render(sentences: &[Sentence]) -> Vec<Instruction> {
    let mut out = Vec::new();
    render_to(&mut out, sentences);
    out
}

pub fn render_to(sink: &mut impl DocumentSink, sentences: &[Sentence]) {
    for sentence in sentences {
        render_sentence(sink, sentence);
    }
}

fn render_sentence(sink: &mut impl DocumentSink, sentence: &Sentence) {
    sink.write(Instruction::ParagraphBegin);
    for (index, token) in sentence.tokens.iter().enumerate() {
        if index > 0 {
            sink.write(Instruction::run(" ", RunStyle::Plain));
        }
        sink.write(Instruction::run(token.surface.clone(), RunStyle::Italic));

        let annotation = sentence.annotations.get(index).and_then(Option::as_ref);
        if let Some(annotation) = annotation {
            let tags = codec::encode_lossy(annotation);
            if !tags.superscript.is_empty() {
                sink.write(Instruction::run(
                    tags.superscript.join(" "),
                    RunStyle::Superscript,
                ));
            }
            if !tags.subscript.is_empty() {
                sink.write(Instruction::run(
                    tags.subscript.join(" "),
                    RunStyle::Subscript,
                ));
            }
        }
    }
    sink.write(Instruction::ParagraphEnd);

    // Translation paragraph is emitted even when blank so the document
    // keeps its sentence rhythm.
    sink.write(Instruction::ParagraphBegin);
    if !sentence.translation.is_empty() {
        sink.write(Instruction::run(
            sentence.translation.clone(),
            RunStyle::Plain,
        ));
    }
    sink.write(Instruction::ParagraphEnd);

    // Blank separator paragraph
    sink.write(Instruction::ParagraphBegin);
    sink.write(Instruction::ParagraphEnd);

    for (number, note) in sentence.notes.iter().enumerate() {
        let number = number + 1;
        let line = match anchor_surface(sentence, &note.anchor) {
            Some(surface) => format!("{number}. \"{surface}\" - {}", note.text),
            None => format!("{number}. {}", note.text),
        };
        sink.write(Instruction::ParagraphBegin);
        sink.write(Instruction::run(line, RunStyle::Plain));
        sink.write(Instruction::ParagraphEnd);
    }
}

/// Surface text the note is anchored to, joined across a span. Sentence
/// notes (and anchors pointing past the token list) have none.
fn anchor_surface(sentence: &Sentence, anchor: &NoteAnchor) -> Option<String> {
    let tokens = &sentence.tokens;
    match *anchor {
        NoteAnchor::Sentence => None,
        NoteAnchor::Token(index) => tokens.get(index as usize).map(|t| t.surface.clone()),
        NoteAnchor::Span(start, end) => {
            let slice = tokens.get(start as usize..=end as usize)?;
            if slice.is_empty() {
                return None;
            }
            Some(
                slice
                    .iter()
                    .map(|t| t.surface.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }
    }
}
