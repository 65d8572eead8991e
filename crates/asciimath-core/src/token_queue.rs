use std::collections::VecDeque;

use crate::lexer::Lexer;
use crate::symbol_table::Role;
use crate::token::{Token, TokenKind};

/// A token queue that allows looking ahead an arbitrary number of tokens.
pub(crate) struct TokenQueue<'source> {
    lexer: Lexer<'source>,
    queue: VecDeque<Token<'source>>,
    lexer_is_eoi: bool,
    eoi: Token<'source>,
}

impl<'source> TokenQueue<'source> {
    pub(crate) fn new(lexer: Lexer<'source>) -> Self {
        let eoi = Token::eoi(lexer.input_length());
        TokenQueue {
            lexer,
            queue: VecDeque::with_capacity(2),
            lexer_is_eoi: false,
            eoi,
        }
    }

    /// Load tokens until the buffer holds at least `n + 1` tokens or the input is exhausted.
    fn ensure(&mut self, n: usize) {
        while self.queue.len() <= n && !self.lexer_is_eoi {
            let tok = self.lexer.next_token();
            if matches!(tok.kind(), TokenKind::Eoi) {
                self.lexer_is_eoi = true;
            } else {
                self.queue.push_back(tok);
            }
        }
    }

    /// Peek at the token `n` positions ahead without consuming anything.
    ///
    /// Past the end of the input, this returns an EOI token.
    pub(crate) fn peek_nth(&mut self, n: usize) -> &Token<'source> {
        self.ensure(n);
        self.queue.get(n).unwrap_or(&self.eoi)
    }

    #[inline]
    pub(crate) fn peek(&mut self) -> &Token<'source> {
        self.peek_nth(0)
    }

    #[inline]
    pub(crate) fn peek_second(&mut self) -> &Token<'source> {
        self.peek_nth(1)
    }

    pub(crate) fn next(&mut self) -> Token<'source> {
        self.ensure(0);
        self.queue.pop_front().unwrap_or(self.eoi)
    }

    /// Check whether the upcoming tokens contain a `|` which would close a group opened by a `|`
    /// that was just consumed.
    ///
    /// The `|` must appear at the same bracket depth, before an unmatched closing bracket or the
    /// end of the input.
    pub(crate) fn has_closing_bar(&mut self) -> bool {
        let mut depth = 0usize;
        let mut n = 0usize;
        loop {
            let tok = self.peek_nth(n);
            match (tok.kind(), tok.role()) {
                (TokenKind::Eoi, _) => return false,
                (_, Some(Role::OpenBracket)) => depth += 1,
                (_, Some(Role::CloseBracket)) => {
                    let Some(outer) = depth.checked_sub(1) else {
                        return false;
                    };
                    depth = outer;
                }
                (_, Some(Role::LeftRight)) if depth == 0 => return true,
                _ => {}
            }
            n += 1;
        }
    }
}
