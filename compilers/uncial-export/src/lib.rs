pub mod codec;
pub mod renderer;

pub use codec::{encode, encode_lossy, CodecError, TagRender};
pub use renderer::{render, render_to, DocumentSink, Instruction, RunStyle};

#[cfg(test)]
mod tests {
    use super::*;
    use uncial_protocol::{
        Annotation, Case, Gender, Number, PartOfSpeech, Sentence, SentenceId, Token, VerbClass,
    };

    #[test]
    fn test_sentence_stream_end_to_end() {
        let noun = Annotation {
            pos: Some(PartOfSpeech::Noun),
            gender: Some(Gender::Masculine),
            number: Some(Number::Singular),
            case: Some(Case::Nominative),
            ..Annotation::default()
        };
        let verb = Annotation {
            pos: Some(PartOfSpeech::Verb),
            verb_class: Some(VerbClass::Strong7),
            number: Some(Number::Singular),
            uncertain: true,
            ..Annotation::default()
        };
        let sentence = Sentence {
            id: SentenceId(1),
            tokens: vec![
                Token {
                    surface: "cyning".to_string(),
                    lemma: Some("cyning".to_string()),
                    order_index: 0,
                },
                Token {
                    surface: "feoll".to_string(),
                    lemma: Some("feallan".to_string()),
                    order_index: 1,
                },
            ],
            annotations: vec![Some(noun), Some(verb)],
            translation: "the king fell".to_string(),
            notes: vec![],
        };

        let out = render(&[sentence]);
        let texts: Vec<String> = out
            .iter()
            .filter_map(|i| match i {
                Instruction::Run { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec!["cyning", "n s m N", "nom1", " ", "feoll", "s V", "s7?", "the king fell"]
        );
    }
}
