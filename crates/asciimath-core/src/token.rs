use std::ops::Range;

use crate::symbol_table::{Role, Symbol};

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A decimal number, possibly with a leading minus sign.
    Number,
    /// A symbol word like `alpha`, or a single unknown letter.
    Word,
    /// A symbol made of punctuation like `<=`, or a single unknown non-letter character.
    Punctuation,
    /// Raw text from a quoted string or from the argument of `text`.
    Text,
    /// End of input.
    Eoi,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn zero_width(at: usize) -> Self {
        Span { start: at, end: at }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A token together with its position in the input and, if it is a known word, its symbol.
///
/// For [`TokenKind::Text`], `raw` is the text without the surrounding quotes or brackets,
/// while the span covers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'source> {
    raw: &'source str,
    kind: TokenKind,
    span: Span,
    symbol: Option<&'static Symbol>,
}

impl<'source> Token<'source> {
    #[inline]
    pub(crate) const fn new(
        raw: &'source str,
        kind: TokenKind,
        span: Span,
        symbol: Option<&'static Symbol>,
    ) -> Self {
        Token {
            raw,
            kind,
            span,
            symbol,
        }
    }

    #[inline]
    pub(crate) const fn eoi(at: usize) -> Self {
        Token::new("", TokenKind::Eoi, Span::zero_width(at), None)
    }

    #[inline]
    pub fn raw(&self) -> &'source str {
        self.raw
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn symbol(&self) -> Option<&'static Symbol> {
        self.symbol
    }

    #[inline]
    pub fn role(&self) -> Option<Role> {
        self.symbol.map(|sym| sym.role)
    }

    /// Returns `true` if this token is the known symbol spelled `raw`.
    #[inline]
    pub(crate) fn is_symbol(&self, raw: &str) -> bool {
        self.symbol.is_some() && self.raw == raw
    }
}
