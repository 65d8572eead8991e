use std::iter::FusedIterator;
use std::mem;

use crate::symbol_table::{MAX_SYMBOL_LEN, Role, Symbol, UnaryKind, lookup};
use crate::token::{Span, Token, TokenKind};

/// Split the input into tokens.
///
/// Tokens are produced lazily; the iterator ends when the input is exhausted.
#[inline]
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// Lexer
pub struct Lexer<'source> {
    input: &'source str,
    pos: usize,
    mode: Mode,
    /// Whether the previous token can serve as a left operand.
    ///
    /// If it can't, a `-` directly in front of a number is read as the sign of that number.
    operand_available: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source str) -> Self {
        Lexer {
            input,
            pos: 0,
            mode: Mode::default(),
            operand_available: false,
        }
    }

    #[inline]
    pub(crate) fn input_length(&self) -> usize {
        self.input.len()
    }

    #[inline]
    fn rest(&self) -> &'source str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Read the next token. At the end of the input, this keeps returning [`TokenKind::Eoi`].
    pub(crate) fn next_token(&mut self) -> Token<'source> {
        self.skip_whitespace();
        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            return Token::eoi(self.input.len());
        };
        if mem::take(&mut self.mode) == Mode::TextStart
            && let Some(tok) = self.read_text_group(first)
        {
            return self.finish(tok);
        }
        let tok = if first == '"' {
            self.read_quoted()
        } else if let Some(len) = self.number_len(rest) {
            self.take(len, TokenKind::Number, None)
        } else if let Some((len, sym)) = longest_symbol(rest) {
            let kind = if first.is_alphabetic() {
                TokenKind::Word
            } else {
                TokenKind::Punctuation
            };
            self.take(len, kind, Some(sym))
        } else {
            let kind = if first.is_alphabetic() {
                TokenKind::Word
            } else {
                TokenKind::Punctuation
            };
            self.take(first.len_utf8(), kind, None)
        };
        self.finish(tok)
    }

    /// Consume `len` bytes as one token.
    fn take(&mut self, len: usize, kind: TokenKind, symbol: Option<&'static Symbol>) -> Token<'source> {
        let start = self.pos;
        self.pos += len;
        let raw = self.input.get(start..self.pos).unwrap_or_default();
        Token::new(raw, kind, Span::new(start, self.pos), symbol)
    }

    fn finish(&mut self, tok: Token<'source>) -> Token<'source> {
        self.operand_available = match tok.kind() {
            TokenKind::Number | TokenKind::Text => true,
            TokenKind::Eoi => false,
            TokenKind::Word | TokenKind::Punctuation => match tok.role() {
                None => true,
                Some(role) => matches!(
                    role,
                    Role::Identifier | Role::CloseBracket | Role::LeftRight
                ),
            },
        };
        if matches!(tok.role(), Some(Role::Unary(UnaryKind::Text))) {
            self.mode = Mode::TextStart;
        }
        tok
    }

    /// Length of a number at the start of `rest`, including a sign if one is allowed here.
    fn number_len(&self, rest: &str) -> Option<usize> {
        let bytes = rest.as_bytes();
        let sign = usize::from(!self.operand_available && bytes.first() == Some(&b'-'));
        let len = unsigned_number_len(bytes.get(sign..).unwrap_or_default());
        (len > 0).then_some(sign + len)
    }

    /// Read a string in double quotes. A missing closing quote extends the string to the end.
    fn read_quoted(&mut self) -> Token<'source> {
        let start = self.pos;
        let body = self.rest().get(1..).unwrap_or_default();
        let (raw, len) = match body.find('"') {
            Some(end) => (&body[..end], end + 2),
            None => (body, body.len() + 1),
        };
        self.pos += len;
        Token::new(raw, TokenKind::Text, Span::new(start, self.pos), None)
    }

    /// Read the bracketed argument of `text` verbatim.
    ///
    /// Nested pairs of the same bracket are kept as part of the text. Without a closing bracket,
    /// the text extends to the end of the input.
    fn read_text_group(&mut self, open: char) -> Option<Token<'source>> {
        let close = match open {
            '(' => ')',
            '[' => ']',
            '{' => '}',
            _ => return None,
        };
        let start = self.pos;
        let body = self.rest().get(1..).unwrap_or_default();
        let mut nesting = 0usize;
        let mut end = None;
        for (idx, ch) in body.char_indices() {
            if ch == open {
                nesting += 1;
            } else if ch == close {
                if nesting == 0 {
                    end = Some(idx);
                    break;
                }
                nesting -= 1;
            }
        }
        let (raw, len) = match end {
            Some(end) => (&body[..end], end + 2),
            None => (body, body.len() + 1),
        };
        self.pos += len;
        Some(Token::new(
            raw,
            TokenKind::Text,
            Span::new(start, self.pos),
            None,
        ))
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.next_token();
        (tok.kind() != TokenKind::Eoi).then_some(tok)
    }
}

impl FusedIterator for Lexer<'_> {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Mode {
    #[default]
    Math,
    /// Directly after `text`: a bracketed group is read verbatim.
    TextStart,
}

/// Matches `\d*\.?\d+` at the start of `bytes`, returning the matched length.
fn unsigned_number_len(bytes: &[u8]) -> usize {
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(int_len) == Some(&b'.') {
        let frac_len = bytes
            .get(int_len + 1..)
            .unwrap_or_default()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_len > 0 {
            return int_len + 1 + frac_len;
        }
    }
    int_len
}

/// Find the longest prefix of `rest` that is in the symbol table.
fn longest_symbol(rest: &str) -> Option<(usize, &'static Symbol)> {
    let max_len = rest.len().min(MAX_SYMBOL_LEN);
    (1..=max_len)
        .rev()
        .filter(|&len| rest.is_char_boundary(len))
        .find_map(|len| lookup(&rest[..len]).map(|sym| (len, sym)))
}
