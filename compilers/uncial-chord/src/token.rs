#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordTokenKind {
    /// A letter/digit group: a selector letter, a value code ("m", "w2",
    /// "imp"), a confidence integer, or free text after `!`.
    Word,
    /// One of the meta keys `?`, `=`, `%`, `!`.
    Symbol(char),
    /// Anything the lexer does not recognize. Passed through so the
    /// interpreter can reject it with a position.
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ChordToken<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kind: ChordTokenKind,
}
