//! Cursor over the lexed token vector.

use crate::lexer::Token;

/// Single-owner, synchronous cursor over a finite token sequence.
///
/// `peek` never consumes; `next` consumes and advances. The stream
/// carries no state beyond its position cursor.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, pos: 0 }
    }

    /// The current token without consuming it, `None` at end of input.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Consume and return the current token, advancing the cursor.
    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Remaining tokens; used for the empty-input fast path.
    pub fn len(&self) -> usize {
        self.tokens.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
