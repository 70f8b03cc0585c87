use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    IResult,
};

use crate::token::{ChordToken, ChordTokenKind, Span};

/// Predicate for characters that may form a chord word: selector letters,
/// value codes ("w2", "imp"), confidence digits. ASCII only -- the chord
/// layer never sees source-language text.
fn is_chord_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Turn the key text of one annotate-mode session into symbolic tokens.
/// Whitespace delimits tokens; no token spans a separator. Pure function
/// of the input, no grammar knowledge.
pub fn lex_with_spans(original_input: &str) -> Vec<ChordToken<'_>> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Try to match a token
        let parse_res: IResult<&str, ChordTokenKind> = alt((
            map(take_while1(is_chord_word_char), |_| ChordTokenKind::Word),
            map(char('?'), ChordTokenKind::Symbol),
            map(char('='), ChordTokenKind::Symbol),
            map(char('%'), ChordTokenKind::Symbol),
            map(char('!'), ChordTokenKind::Symbol),
        ))(input);

        let start = input.as_ptr() as usize - original_input.as_ptr() as usize;

        match parse_res {
            Ok((next_input, kind)) => {
                let len = input.len() - next_input.len();
                result.push(ChordToken {
                    span: Span::new(start, start + len),
                    text: &original_input[start..start + len],
                    kind,
                });
                input = next_input;
            }
            Err(_) => {
                // Unrecognized key: emit it as Unknown rather than skipping,
                // so the interpreter can abort the session with a position.
                if let Some(c) = input.chars().next() {
                    let len = c.len_utf8();
                    result.push(ChordToken {
                        span: Span::new(start, start + len),
                        text: &original_input[start..start + len],
                        kind: ChordTokenKind::Unknown,
                    });
                    input = &input[len..];
                } else {
                    break;
                }
            }
        }
    }

    result
}
