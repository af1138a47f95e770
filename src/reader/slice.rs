//! Zero-Copy Token Sequence
//!
//! Wraps a [`ScanState`] as a pull-based iterator. Input references are
//! maintained directly in the output: every token borrows the buffer passed
//! to [`tokenize`].

use std::iter::FusedIterator;

use crate::core::chars::XmlChar;
use crate::core::token::Token;
use crate::core::tokenizer::{ParseError, ScanState};

/// Lazy, restartable sequence of tokens over one buffer
///
/// Construction performs the first step, so the first item is always
/// `StartDocument` (or `Error` for a malformed buffer). The terminal token
/// is yielded before the sequence ends. Cloning a sequence forks an
/// independent traversal from the same position.
#[derive(Debug, Clone)]
pub struct TokenSequence<'a, C> {
    state: ScanState<'a, C>,
    /// Token the next pull yields; `None` once exhausted
    current: Option<Token<'a, C>>,
}

impl<'a, C: XmlChar> TokenSequence<'a, C> {
    /// Create a sequence that skips comments
    pub fn new(input: &'a [C]) -> Self {
        Self::from_state(ScanState::new(input))
    }

    /// Create a sequence that reports comments as `Comment` tokens
    pub fn with_comments(input: &'a [C]) -> Self {
        Self::from_state(ScanState::with_comments(input))
    }

    /// Continue from an existing scan state
    pub fn from_state(mut state: ScanState<'a, C>) -> Self {
        let current = if state.is_empty() { None } else { Some(state.step()) };
        TokenSequence { state, current }
    }

    /// Token the next call to `next` will return
    #[inline]
    pub fn current(&self) -> Option<Token<'a, C>> {
        self.current
    }

    /// True when no tokens remain
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// The underlying scan state
    #[inline]
    pub fn state(&self) -> &ScanState<'a, C> {
        &self.state
    }

    /// Why the document was abandoned, if it was
    #[inline]
    pub fn error(&self) -> Option<ParseError> {
        self.state.error()
    }
}

impl<'a, C: XmlChar> Iterator for TokenSequence<'a, C> {
    type Item = Token<'a, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.current?;
        self.current = if self.state.is_empty() { None } else { Some(self.state.step()) };
        Some(token)
    }
}

impl<C: XmlChar> FusedIterator for TokenSequence<'_, C> {}

/// Tokenize `input`; the buffer must outlive every token produced
pub fn tokenize<C: XmlChar>(input: &[C]) -> TokenSequence<'_, C> {
    TokenSequence::new(input)
}
