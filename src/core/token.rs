//! Token model
//!
//! A token is a kind plus up to two borrowed slices (`qname` and `value`)
//! and the nesting depth at which it was produced. Tokens never own text;
//! they are `Copy` views into the scanned buffer.

use std::fmt;

use super::chars::{Show, XmlChar};

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// XML declaration: <?xml ...?>
    Prolog,
    /// Emitted once before the first markup
    StartDocument,
    /// Element start tag, or the opening half of <name/>
    StartElement,
    /// Element end tag, or the synthesized close of <name/>
    EndElement,
    /// name="value" inside a start tag
    Attribute,
    /// Trimmed, non-empty text between tags
    Characters,
    /// Processing instruction: <?target body?>
    ProcessingInstruction,
    /// Emitted once when the root element closes
    EndDocument,
    /// Comment: <!--...-->
    Comment,
    /// Terminal parse failure; `value` holds the message
    Error,
}

impl TokenKind {
    /// Every kind, in discriminant order
    pub const ALL: [TokenKind; 10] = [
        TokenKind::Prolog,
        TokenKind::StartDocument,
        TokenKind::StartElement,
        TokenKind::EndElement,
        TokenKind::Attribute,
        TokenKind::Characters,
        TokenKind::ProcessingInstruction,
        TokenKind::EndDocument,
        TokenKind::Comment,
        TokenKind::Error,
    ];

    const NAMES: [&'static str; 10] = [
        "PROLOG",
        "START_DOCUMENT",
        "START_ELEMENT",
        "END_ELEMENT",
        "ELEMENT_ATTRIBUTE",
        "CHARACTERS",
        "PROCESSING_INSTRUCTION",
        "END_DOCUMENT",
        "COMMENT",
        "ERROR",
    ];

    /// Position of this kind in [`TokenKind::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.index())
    }
}

/// A single tokenizer event
///
/// Which slices are populated depends on `kind`:
///
/// | kind | qname | value |
/// |---|---|---|
/// | StartElement, EndElement | element name | empty |
/// | Characters, Comment, Error | empty | text or message |
/// | Attribute, ProcessingInstruction, Prolog | name or target | value or body |
/// | StartDocument, EndDocument | empty | empty |
#[derive(Debug, Clone, Copy)]
pub struct Token<'a, C> {
    pub kind: TokenKind,
    pub qname: &'a [C],
    pub value: &'a [C],
    /// Open elements at the point this token was produced
    pub depth: usize,
}

impl<'a, C> Token<'a, C> {
    /// Token with neither name nor value
    #[inline]
    pub const fn new(kind: TokenKind, depth: usize) -> Self {
        Token { kind, qname: &[], value: &[], depth }
    }

    /// Token carrying one slice, routed to `qname` or `value` by kind.
    ///
    /// Kinds that take both slices or none ignore `text`; use
    /// [`Token::pair`] or [`Token::new`] for those.
    pub fn single(kind: TokenKind, text: &'a [C], depth: usize) -> Self {
        let mut token = Token::new(kind, depth);
        match kind {
            TokenKind::StartElement | TokenKind::EndElement => token.qname = text,
            TokenKind::Characters | TokenKind::Comment | TokenKind::Error => token.value = text,
            TokenKind::Prolog
            | TokenKind::Attribute
            | TokenKind::ProcessingInstruction
            | TokenKind::StartDocument
            | TokenKind::EndDocument => {}
        }
        token
    }

    /// Token carrying both a name and a value
    #[inline]
    pub const fn pair(kind: TokenKind, qname: &'a [C], value: &'a [C], depth: usize) -> Self {
        Token { kind, qname, value, depth }
    }

    #[inline]
    pub fn is_start_element(&self) -> bool {
        self.kind == TokenKind::StartElement
    }

    #[inline]
    pub fn is_end_element(&self) -> bool {
        self.kind == TokenKind::EndElement
    }

    /// `EndDocument` or `Error`: nothing follows this token
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::EndDocument | TokenKind::Error)
    }
}

impl<'a> Token<'a, u8> {
    /// Get the name as a string
    pub fn qname_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.qname).ok()
    }

    /// Get the value as a string
    pub fn value_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }
}

impl<C> Default for Token<'_, C> {
    fn default() -> Self {
        Token::new(TokenKind::EndDocument, 0)
    }
}

// Depth is positional information, not part of the token's identity.
impl<C: PartialEq> PartialEq for Token<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.qname == other.qname && self.value == other.value
    }
}

impl<C: Eq> Eq for Token<'_, C> {}

impl<C: XmlChar> fmt::Display for Token<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, qname={}, value={}", self.kind, Show(self.qname), Show(self.value))
    }
}
