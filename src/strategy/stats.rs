//! Document statistics
//!
//! Single pass over a token stream tallying kinds and nesting, the way a
//! throughput benchmark or a sanity check over a corpus would.

use crate::core::chars::XmlChar;
use crate::core::token::{Token, TokenKind};
use crate::core::tokenizer::ParseError;
use crate::reader::slice::tokenize;

/// Counts gathered from one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    counts: [usize; TokenKind::ALL.len()],
    /// Depth after the last token (starts minus ends, floored at 0)
    pub end_depth: usize,
    pub max_depth: usize,
    pub error: Option<ParseError>,
}

impl DocumentStats {
    /// Consume `tokens` and tally them
    pub fn collect<'a, C, I>(tokens: I) -> Self
    where
        C: 'a,
        I: IntoIterator<Item = Token<'a, C>>,
    {
        let mut stats = DocumentStats::default();
        for token in tokens {
            stats.record(&token);
        }
        stats
    }

    /// Tokenize `input` and tally the result
    pub fn of<C: XmlChar>(input: &[C]) -> Self {
        let mut seq = tokenize(input);
        let mut stats = Self::collect(seq.by_ref());
        stats.error = seq.error();
        stats
    }

    fn record<C>(&mut self, token: &Token<'_, C>) {
        self.counts[token.kind.index()] += 1;
        match token.kind {
            TokenKind::StartElement => {
                self.end_depth += 1;
                self.max_depth = self.max_depth.max(self.end_depth);
            }
            TokenKind::EndElement => self.end_depth = self.end_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Number of tokens of `kind`
    #[inline]
    pub fn count(&self, kind: TokenKind) -> usize {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Every element closed and the document ended cleanly
    pub fn is_balanced(&self) -> bool {
        self.error.is_none()
            && self.count(TokenKind::Error) == 0
            && self.count(TokenKind::EndDocument) == 1
            && self.end_depth == 0
            && self.count(TokenKind::StartElement) == self.count(TokenKind::EndElement)
    }
}
