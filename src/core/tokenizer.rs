//! XML Tokenizer - State machine for XML token extraction
//!
//! A non-validating, forward-only scanner. Each call to
//! [`ScanState::step`] classifies the next piece of markup and returns
//! exactly one token:
//! - Document start/end
//! - Prolog and processing instructions
//! - Element start/end (self-closing tags are split into both)
//! - Attributes, one per step
//! - Trimmed character data
//!
//! Comments are consumed silently unless the state was built with
//! [`ScanState::with_comments`]. Every slice in a token borrows the input.

use log::{debug, trace, warn};

use super::chars::XmlChar;
use super::scanner::{drop_prefix, find, find_any, find_from, first, matches_at};
use super::split::split_before;
use super::token::{Token, TokenKind};
use super::trim::{trim, trim_left};

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    /// Before the first `<`
    Pre,
    /// At top level, between the prolog and the root element
    Start,
    /// Just past a `<` inside an open element
    StartElement,
    /// A self-closing tag still owes its `EndElement`
    EmptyNode,
    /// Between a `>` and the next `<`
    Characters,
    /// Attributes of an open tag remain
    Attribs,
    /// Attributes of a self-closing tag remain
    AttribsEmpty,
    /// Clean end of document
    End,
    /// Malformed input; nothing more is produced
    Error,
}

impl ParseState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParseState::End | ParseState::Error)
    }
}

/// Reasons the tokenizer gives up on a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseError {
    /// First non-whitespace character is not `<`
    #[error("Malformed document")]
    MalformedDocument,
    /// `<!` not followed by `--`
    #[error("Node started with illegal character")]
    IllegalMarkup,
    #[error("Unterminated comment")]
    UnterminatedComment,
    #[error("Unterminated processing instruction")]
    UnterminatedProcessingInstruction,
    /// Markup was expected but the buffer ran out
    #[error("Unexpected end of document")]
    UnexpectedEof,
}

/// Cursor of the tokenizer over one fully resident buffer
///
/// The state is a plain `Copy` value: copying it forks an independent
/// traversal that replays the same tokens.
#[derive(Debug, Clone, Copy)]
pub struct ScanState<'a, C> {
    state: ParseState,
    /// Unscanned input
    document: &'a [C],
    /// Attribute text of the current tag not yet reported
    attribs: &'a [C],
    /// Name of the self-closing element awaiting its `EndElement`
    empty_node: &'a [C],
    token: Token<'a, C>,
    depth: usize,
    error: Option<ParseError>,
    emit_comments: bool,
}

impl<C> Default for ScanState<'_, C> {
    /// A state over no document: already empty, last token `EndDocument`
    fn default() -> Self {
        ScanState {
            state: ParseState::Pre,
            document: &[],
            attribs: &[],
            empty_node: &[],
            token: Token::default(),
            depth: 0,
            error: None,
            emit_comments: false,
        }
    }
}

impl<'a, C: XmlChar> ScanState<'a, C> {
    /// Create a state positioned before `input`; comments are skipped
    pub fn new(input: &'a [C]) -> Self {
        ScanState {
            document: input,
            token: Token::new(TokenKind::StartDocument, 0),
            ..ScanState::default()
        }
    }

    /// Create a state that reports comments as `Comment` tokens
    pub fn with_comments(input: &'a [C]) -> Self {
        ScanState {
            emit_comments: true,
            ..ScanState::new(input)
        }
    }

    /// Token produced by the most recent step
    #[inline]
    pub fn last_token(&self) -> Token<'a, C> {
        self.token
    }

    /// Input not yet scanned
    #[inline]
    pub fn remainder(&self) -> &'a [C] {
        self.document
    }

    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Number of currently open elements
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Why the document was abandoned, once in the `Error` state
    #[inline]
    pub fn error(&self) -> Option<ParseError> {
        self.error
    }

    /// True when no further token can be produced
    pub fn is_empty(&self) -> bool {
        self.state.is_terminal() || (self.state == ParseState::Pre && self.document.is_empty())
    }

    /// Advance by one token and return it.
    ///
    /// In a terminal state the last token is returned again and nothing moves.
    pub fn step(&mut self) -> Token<'a, C> {
        if self.state.is_terminal() {
            return self.token;
        }

        // The root element has closed: whatever follows is not reported.
        if self.depth == 0 && !matches!(self.state, ParseState::Pre | ParseState::Start) {
            debug!("root element closed, ending document");
            self.finish();
            return self.token;
        }

        loop {
            trace!("processing in state {:?}", self.state);
            let have_token = match self.state {
                ParseState::Pre => self.split_pre_start(),
                ParseState::Start => self.split_start(),
                ParseState::StartElement => self.split_on_node(),
                ParseState::EmptyNode => self.split_empty_node(),
                ParseState::Characters => self.split_characters(),
                ParseState::Attribs | ParseState::AttribsEmpty => self.split_attributes(),
                ParseState::End | ParseState::Error => true,
            };
            if have_token {
                return self.token;
            }
        }
    }

    fn finish(&mut self) {
        self.state = ParseState::End;
        self.token = Token::new(TokenKind::EndDocument, 0);
    }

    /// Record `error` as the terminal token. Always yields a token.
    fn fail(&mut self, error: ParseError) -> bool {
        warn!("XML parse error: {}", error);
        self.error = Some(error);
        self.token = Token::single(TokenKind::Error, C::message(error), self.depth);
        self.state = ParseState::Error;
        true
    }

    fn split_pre_start(&mut self) -> bool {
        if self.document.is_empty() {
            self.finish();
            return true;
        }
        self.document = trim_left(self.document, C::WHITESPACE);
        if first(self.document) != Some(C::LT) {
            return self.fail(ParseError::MalformedDocument);
        }
        self.token = Token::new(TokenKind::StartDocument, 0);
        self.state = ParseState::Start;
        self.document = drop_prefix(self.document, 1);
        true
    }

    fn split_start(&mut self) -> bool {
        match first(self.document) {
            None => self.fail(ParseError::UnexpectedEof),
            Some(c) if c == C::QUESTION => match self.split_pi() {
                Ok(()) => {
                    self.state = ParseState::Start;
                    self.document = trim_left(self.document, C::TAG_SEPARATORS);
                    if self.token.qname == C::XML {
                        self.token.kind = TokenKind::Prolog;
                    }
                    true
                }
                Err(error) => self.fail(error),
            },
            Some(c) if c == C::BANG => match self.split_comment() {
                Ok(()) => {
                    self.state = ParseState::Start;
                    self.document = trim_left(self.document, C::TAG_SEPARATORS);
                    self.emit_comments
                }
                Err(error) => self.fail(error),
            },
            Some(_) => self.split_open_or_empty_node(),
        }
    }

    fn split_on_node(&mut self) -> bool {
        match first(self.document) {
            None => self.fail(ParseError::UnexpectedEof),
            Some(c) if c == C::SLASH => self.split_close_node(),
            Some(c) if c == C::BANG => match self.split_comment() {
                Ok(()) => self.emit_comments,
                Err(error) => self.fail(error),
            },
            Some(c) if c == C::QUESTION => match self.split_pi() {
                Ok(()) => true,
                Err(error) => self.fail(error),
            },
            Some(_) => self.split_open_or_empty_node(),
        }
    }

    fn split_open_or_empty_node(&mut self) -> bool {
        let closing = find(self.document, C::GT).unwrap_or(self.document.len());
        let tag = &self.document[..closing];
        let end_qname = find_any(tag, C::TAG_NAME_END).unwrap_or(tag.len());
        let qname = trim(&tag[..end_qname], C::NAME_TRIM);
        let attribs = trim(&tag[end_qname..], C::NAME_TRIM);
        let self_closing = tag.last() == Some(&C::SLASH);

        self.depth += 1;
        self.token = Token::single(TokenKind::StartElement, qname, self.depth);
        self.attribs = attribs;
        self.empty_node = if self_closing { qname } else { &[] };
        self.state = match (attribs.is_empty(), self_closing) {
            (true, true) => ParseState::EmptyNode,
            (true, false) => ParseState::Characters,
            (false, true) => ParseState::AttribsEmpty,
            (false, false) => ParseState::Attribs,
        };
        self.document = drop_prefix(self.document, closing + 1);
        true
    }

    fn split_close_node(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        let body = drop_prefix(self.document, 1);
        let closing = find(body, C::GT).unwrap_or(body.len());
        let name = trim(&body[..closing], C::WHITESPACE);
        self.token = Token::single(TokenKind::EndElement, name, self.depth);
        self.document = drop_prefix(body, closing + 1);
        self.state = ParseState::Characters;
        true
    }

    fn split_empty_node(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        self.token = Token::single(TokenKind::EndElement, self.empty_node, self.depth);
        self.empty_node = &[];
        self.state = ParseState::Characters;
        true
    }

    fn split_attributes(&mut self) -> bool {
        let attribs = self.attribs;
        let equals = find(attribs, C::EQUALS);
        let open = find(attribs, C::QUOTE);

        // Value is everything between the first pair of quotes; a missing
        // closing quote swallows the rest of the tag.
        let (value, rest): (&'a [C], &'a [C]) = match open {
            Some(open) => {
                let quoted = &attribs[open + 1..];
                match find(quoted, C::QUOTE) {
                    Some(close) => (&quoted[..close], &quoted[close + 1..]),
                    None => (quoted, &[]),
                }
            }
            None => (&[], &[]),
        };
        let name_end = [equals, open].into_iter().flatten().min().unwrap_or(attribs.len());
        let qname = trim(&attribs[..name_end], C::WHITESPACE);

        self.token = Token::pair(TokenKind::Attribute, qname, value, self.depth);
        self.attribs = trim_left(rest, C::WHITESPACE);
        if self.attribs.is_empty() {
            self.state = if self.state == ParseState::AttribsEmpty {
                ParseState::EmptyNode
            } else {
                ParseState::Characters
            };
        }
        true
    }

    /// Whitespace-only runs between tags produce no token.
    fn split_characters(&mut self) -> bool {
        let len = self.document.len();
        let opening = find(self.document, C::LT);
        let text = trim(&self.document[..opening.unwrap_or(len)], C::WHITESPACE);
        self.token = Token::single(TokenKind::Characters, text, self.depth);
        self.document = drop_prefix(self.document, opening.map_or(len, |i| i + 1));
        self.state = ParseState::StartElement;
        !text.is_empty()
    }

    /// Consume `!--...-->`; the cursor is on the `!`.
    fn split_comment(&mut self) -> Result<(), ParseError> {
        if !matches_at(self.document, 0, C::COMMENT_OPEN) {
            return Err(ParseError::IllegalMarkup);
        }
        let body = drop_prefix(self.document, C::COMMENT_OPEN.len());

        // Only a '>' preceded by "--" closes the comment.
        let mut from = 0;
        let closing = loop {
            let gt = find_from(body, C::GT, from).ok_or(ParseError::UnterminatedComment)?;
            if gt >= 2 && matches_at(body, gt - 2, C::COMMENT_CLOSE) {
                break gt;
            }
            from = gt + 1;
        };

        self.token = Token::single(TokenKind::Comment, &body[..closing - 2], self.depth);
        self.document = drop_prefix(body, closing + 1);
        self.state = ParseState::Characters;
        Ok(())
    }

    /// Consume `?target body?>`; the cursor is on the `?`.
    fn split_pi(&mut self) -> Result<(), ParseError> {
        let body = drop_prefix(self.document, 1);

        // The body may embed markup, so skip every '>' not preceded by '?'.
        let mut from = 1;
        let closing = loop {
            let gt = find_from(body, C::GT, from)
                .ok_or(ParseError::UnterminatedProcessingInstruction)?;
            if matches_at(body, gt - 1, C::PI_CLOSE) {
                break gt;
            }
            from = gt + 1;
        };

        let whole = trim(&body[..closing - 1], C::WHITESPACE);
        let parts = split_before(whole, C::WHITESPACE);
        self.token = Token::pair(
            TokenKind::ProcessingInstruction,
            parts.left,
            trim_left(parts.right, C::WHITESPACE),
            self.depth,
        );
        self.document = drop_prefix(body, closing + 1);
        self.state = ParseState::Characters;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, qname: &'static str, value: &'static str) -> Token<'static, u8> {
        Token::pair(kind, qname.as_bytes(), value.as_bytes(), 0)
    }

    /// Step until terminal, collecting every produced token
    fn drain(mut fsm: ScanState<'_, u8>) -> Vec<Token<'_, u8>> {
        let mut tokens = Vec::new();
        while !fsm.is_empty() {
            tokens.push(fsm.step());
        }
        tokens
    }

    #[test]
    fn test_instantiate_empty() {
        let fsm: ScanState<'_, u8> = ScanState::default();
        assert_eq!(fsm.last_token(), tok(TokenKind::EndDocument, "", ""));
        assert!(fsm.is_empty());
    }

    #[test]
    fn test_instantiate() {
        let fsm = ScanState::new(b"<ROOT></ROOT>");
        assert_eq!(fsm.last_token(), tok(TokenKind::StartDocument, "", ""));
        assert!(!fsm.is_empty());
        assert_eq!(fsm.state(), ParseState::Pre);
    }

    #[test]
    fn test_empty_buffer_is_empty() {
        let mut fsm = ScanState::new(b"");
        assert!(fsm.is_empty());
        assert_eq!(fsm.step(), tok(TokenKind::EndDocument, "", ""));
        assert_eq!(fsm.state(), ParseState::End);
    }

    #[test]
    fn test_document_prolog() {
        let document = b"<?xml encoding=\"UTF-8\"?>\n\
            <?some.com <embedded x=\"5\"></embedded>?>\
            <ROOT></ROOT>";
        let mut fsm = ScanState::new(document);

        assert_eq!(fsm.step(), tok(TokenKind::StartDocument, "", ""));
        assert_eq!(fsm.step(), tok(TokenKind::Prolog, "xml", "encoding=\"UTF-8\""));
        assert!(!fsm.is_empty());
        assert_eq!(
            fsm.step(),
            tok(TokenKind::ProcessingInstruction, "some.com", "<embedded x=\"5\"></embedded>")
        );
        assert_eq!(fsm.step(), tok(TokenKind::StartElement, "ROOT", ""));
        assert_eq!(fsm.step(), tok(TokenKind::EndElement, "ROOT", ""));
        assert_eq!(fsm.step(), tok(TokenKind::EndDocument, "", ""));
        assert!(fsm.is_empty());
    }

    #[test]
    fn test_simple_doc() {
        let mut fsm = ScanState::new(b"<ROOT></ROOT>");

        assert_eq!(fsm.step(), tok(TokenKind::StartDocument, "", ""));
        let start = fsm.step();
        assert_eq!(start, tok(TokenKind::StartElement, "ROOT", ""));
        assert_eq!(start.depth, 1);
        let end = fsm.step();
        assert_eq!(end, tok(TokenKind::EndElement, "ROOT", ""));
        assert_eq!(end.depth, 0);
        assert!(!fsm.is_empty());
        assert_eq!(fsm.step(), tok(TokenKind::EndDocument, "", ""));
        assert!(fsm.is_empty());
        assert_eq!(fsm.depth(), 0);
    }

    #[test]
    fn test_empty_node() {
        let tokens = drain(ScanState::new(b"<ROOT><EMPTY/></ROOT>"));
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::StartDocument, "", ""),
                tok(TokenKind::StartElement, "ROOT", ""),
                tok(TokenKind::StartElement, "EMPTY", ""),
                tok(TokenKind::EndElement, "EMPTY", ""),
                tok(TokenKind::EndElement, "ROOT", ""),
                tok(TokenKind::EndDocument, "", ""),
            ]
        );
        assert_eq!(tokens[2].depth, 2);
        assert_eq!(tokens[3].depth, 1);
    }

    #[test]
    fn test_attributes() {
        let document = b"<ROOT xmlns:svbb=\"svbb\">\n\
            <svbb:node test=\"true\"   foo:ran = \"some text\" fizzypop=\" unusual \" />\n\
            </ROOT>";
        let tokens = drain(ScanState::new(document));
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::StartDocument, "", ""),
                tok(TokenKind::StartElement, "ROOT", ""),
                tok(TokenKind::Attribute, "xmlns:svbb", "svbb"),
                tok(TokenKind::StartElement, "svbb:node", ""),
                tok(TokenKind::Attribute, "test", "true"),
                tok(TokenKind::Attribute, "foo:ran", "some text"),
                tok(TokenKind::Attribute, "fizzypop", " unusual "),
                tok(TokenKind::EndElement, "svbb:node", ""),
                tok(TokenKind::EndElement, "ROOT", ""),
                tok(TokenKind::EndDocument, "", ""),
            ]
        );
    }

    #[test]
    fn test_comment_hides_bad_structure() {
        let tokens = drain(ScanState::new(b"<ROOT>Start<!--<BAD NODE>->-!>-->Text</ROOT>"));
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::StartDocument, "", ""),
                tok(TokenKind::StartElement, "ROOT", ""),
                tok(TokenKind::Characters, "", "Start"),
                tok(TokenKind::Characters, "", "Text"),
                tok(TokenKind::EndElement, "ROOT", ""),
                tok(TokenKind::EndDocument, "", ""),
            ]
        );
    }

    #[test]
    fn test_comments_reported_on_request() {
        let tokens = drain(ScanState::with_comments(
            b"<!-- top --><ROOT>a<!--<BAD NODE>->-!>-->b</ROOT>",
        ));
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::StartDocument, "", ""),
                tok(TokenKind::Comment, "", " top "),
                tok(TokenKind::StartElement, "ROOT", ""),
                tok(TokenKind::Characters, "", "a"),
                tok(TokenKind::Comment, "", "<BAD NODE>->-!>"),
                tok(TokenKind::Characters, "", "b"),
                tok(TokenKind::EndElement, "ROOT", ""),
                tok(TokenKind::EndDocument, "", ""),
            ]
        );
    }

    #[test]
    fn test_pi_inside_element() {
        let tokens = drain(ScanState::new(b"<a><?render fast?>text</a>"));
        assert_eq!(tokens[2], tok(TokenKind::ProcessingInstruction, "render", "fast"));
        assert_eq!(tokens[3], tok(TokenKind::Characters, "", "text"));
        assert_eq!(tokens[4], tok(TokenKind::EndElement, "a", ""));
    }

    #[test]
    fn test_malformed_document() {
        let mut fsm = ScanState::new(b"  \n hello <ROOT/>");
        assert_eq!(fsm.step(), tok(TokenKind::Error, "", "Malformed document"));
        assert!(fsm.is_empty());
        assert_eq!(fsm.error(), Some(ParseError::MalformedDocument));
        // Terminal: stepping again changes nothing.
        assert_eq!(fsm.step(), tok(TokenKind::Error, "", "Malformed document"));
        assert_eq!(fsm.state(), ParseState::Error);
    }

    #[test]
    fn test_whitespace_only_is_malformed() {
        let mut fsm = ScanState::new(b" \r\n\t");
        assert_eq!(fsm.step().kind, TokenKind::Error);
        assert_eq!(fsm.error(), Some(ParseError::MalformedDocument));
    }

    #[test]
    fn test_unterminated_comment() {
        let tokens = drain(ScanState::new(b"<a><!-- no end > here"));
        let last = tokens.last().copied().unwrap_or_default();
        assert_eq!(last, tok(TokenKind::Error, "", "Unterminated comment"));
    }

    #[test]
    fn test_comment_needs_two_dashes_of_its_own() {
        let tokens = drain(ScanState::new(b"<a><!-->x</a>"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Error));
    }

    #[test]
    fn test_unterminated_pi() {
        let mut fsm = ScanState::new(b"<?xml version=\"1.0\" >");
        fsm.step();
        assert_eq!(
            fsm.step(),
            tok(TokenKind::Error, "", "Unterminated processing instruction")
        );
        assert_eq!(fsm.error(), Some(ParseError::UnterminatedProcessingInstruction));
    }

    #[test]
    fn test_doctype_is_illegal_markup() {
        let tokens = drain(ScanState::new(b"<!DOCTYPE html><html/>"));
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::StartDocument, "", ""),
                tok(TokenKind::Error, "", "Node started with illegal character"),
            ]
        );
    }

    #[test]
    fn test_truncated_document() {
        let tokens = drain(ScanState::new(b"<a><b>text"));
        assert_eq!(tokens[3], tok(TokenKind::Characters, "", "text"));
        assert_eq!(tokens[4], tok(TokenKind::Error, "", "Unexpected end of document"));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_prolog_without_root() {
        let tokens = drain(ScanState::new(b"<?xml version=\"1.0\"?>\n"));
        assert_eq!(tokens[1].kind, TokenKind::Prolog);
        assert_eq!(tokens[2], tok(TokenKind::Error, "", "Unexpected end of document"));
    }

    #[test]
    fn test_unquoted_attribute_does_not_loop() {
        let tokens = drain(ScanState::new(b"<a flag other=\"x></a>"));
        assert_eq!(tokens[2], tok(TokenKind::Attribute, "flag other", "x"));
        assert_eq!(tokens[3], tok(TokenKind::EndElement, "a", ""));
    }

    #[test]
    fn test_unbalanced_close_saturates() {
        let tokens = drain(ScanState::new(b"<a></b></c>"));
        assert_eq!(tokens[2], tok(TokenKind::EndElement, "b", ""));
        assert_eq!(tokens[3], tok(TokenKind::EndDocument, "", ""));
    }

    #[test]
    fn test_copy_replays_identically() {
        let fsm = ScanState::new(b"<r a=\"1\"><c/>t</r>");
        let first = drain(fsm);
        let second = drain(fsm);
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn test_wide_buffers() {
        let text = "<r k=\"v\">x</r>";
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut fsm = ScanState::new(wide.as_slice());
        fsm.step();
        assert_eq!(fsm.step().qname, &wide[1..2]);
        let attr = fsm.step();
        assert_eq!(attr.kind, TokenKind::Attribute);
        assert_eq!(String::from_utf16_lossy(attr.value), "v");

        let chars: Vec<char> = text.chars().collect();
        let mut fsm = ScanState::new(chars.as_slice());
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| (!fsm.is_empty()).then(|| fsm.step().kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::StartDocument,
                TokenKind::StartElement,
                TokenKind::Attribute,
                TokenKind::Characters,
                TokenKind::EndElement,
                TokenKind::EndDocument,
            ]
        );
    }

    #[test]
    fn test_wide_error_message() {
        let chars: Vec<char> = "oops".chars().collect();
        let mut fsm = ScanState::new(chars.as_slice());
        let token = fsm.step();
        assert_eq!(token.to_string(), "ERROR(9), qname=, value=Malformed document");
    }
}
