//! Character width abstraction
//!
//! The tokenizer is written once over `[C]` and runs on byte (`u8`),
//! UTF-16 (`u16`) and decoded (`char`) buffers. Every delimiter the state
//! machine compares against lives here as an associated constant, widened
//! at compile time from its ASCII spelling.
//!
//! Byte buffers get SIMD-accelerated search through memchr; the wider
//! element types fall back to linear scans.

use std::fmt;

use memchr::{memchr, memchr2, memchr3, memmem};

use super::tokenizer::ParseError;

/// Element type of a buffer the tokenizer can scan.
pub trait XmlChar: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const LT: Self;
    const GT: Self;
    const SLASH: Self;
    const QUESTION: Self;
    const BANG: Self;
    const EQUALS: Self;
    const QUOTE: Self;

    /// Space, tab, carriage return, line feed
    const WHITESPACE: &'static [Self];
    /// Characters that end an element name inside a tag
    const TAG_NAME_END: &'static [Self];
    /// Trimmed from both ends of element names and attribute regions
    const NAME_TRIM: &'static [Self];
    /// Skipped after a prolog, PI or comment at the top level
    const TAG_SEPARATORS: &'static [Self];
    /// PI target that marks the XML declaration
    const XML: &'static [Self];
    const COMMENT_OPEN: &'static [Self];
    const COMMENT_CLOSE: &'static [Self];
    const PI_CLOSE: &'static [Self];

    /// Diagnostic text for `error` in this character width
    fn message(error: ParseError) -> &'static [Self];

    /// Render a slice for `Display` output
    fn write_slice(f: &mut fmt::Formatter<'_>, slice: &[Self]) -> fmt::Result;

    /// Position of the first `needle`
    #[inline]
    fn find(haystack: &[Self], needle: Self) -> Option<usize> {
        haystack.iter().position(|&c| c == needle)
    }

    /// Position of the first character contained in `set`
    #[inline]
    fn find_any(haystack: &[Self], set: &[Self]) -> Option<usize> {
        haystack.iter().position(|c| set.contains(c))
    }

    /// Position of the first occurrence of the sequence `needle`
    fn find_seq(haystack: &[Self], needle: &[Self]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        haystack.windows(needle.len()).position(|w| w == needle)
    }
}

const fn widen_u8<const N: usize>(ascii: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = ascii[i];
        i += 1;
    }
    out
}

const fn widen_u16<const N: usize>(ascii: &[u8]) -> [u16; N] {
    let mut out = [0u16; N];
    let mut i = 0;
    while i < N {
        out[i] = ascii[i] as u16;
        i += 1;
    }
    out
}

const fn widen_char<const N: usize>(ascii: &[u8]) -> [char; N] {
    let mut out = ['\0'; N];
    let mut i = 0;
    while i < N {
        out[i] = ascii[i] as char;
        i += 1;
    }
    out
}

/// `&'static [$t]` built from an ASCII byte literal at compile time
macro_rules! widen {
    ($t:ty, $widen:ident, $lit:expr) => {{
        const ASCII: &[u8] = $lit;
        const WIDE: [$t; ASCII.len()] = $widen(ASCII);
        &WIDE
    }};
}

macro_rules! impl_xml_char {
    ($t:ty, $widen:ident, { $($extra:tt)* }) => {
        impl XmlChar for $t {
            const LT: Self = b'<' as $t;
            const GT: Self = b'>' as $t;
            const SLASH: Self = b'/' as $t;
            const QUESTION: Self = b'?' as $t;
            const BANG: Self = b'!' as $t;
            const EQUALS: Self = b'=' as $t;
            const QUOTE: Self = b'"' as $t;

            const WHITESPACE: &'static [Self] = widen!($t, $widen, b" \t\r\n");
            const TAG_NAME_END: &'static [Self] = widen!($t, $widen, b" \n\t\r>");
            const NAME_TRIM: &'static [Self] = widen!($t, $widen, b" \n\t\r/");
            const TAG_SEPARATORS: &'static [Self] = widen!($t, $widen, b" \r\n\t<");
            const XML: &'static [Self] = widen!($t, $widen, b"xml");
            const COMMENT_OPEN: &'static [Self] = widen!($t, $widen, b"!--");
            const COMMENT_CLOSE: &'static [Self] = widen!($t, $widen, b"-->");
            const PI_CLOSE: &'static [Self] = widen!($t, $widen, b"?>");

            fn message(error: ParseError) -> &'static [Self] {
                match error {
                    ParseError::MalformedDocument => {
                        widen!($t, $widen, b"Malformed document")
                    }
                    ParseError::IllegalMarkup => {
                        widen!($t, $widen, b"Node started with illegal character")
                    }
                    ParseError::UnterminatedComment => {
                        widen!($t, $widen, b"Unterminated comment")
                    }
                    ParseError::UnterminatedProcessingInstruction => {
                        widen!($t, $widen, b"Unterminated processing instruction")
                    }
                    ParseError::UnexpectedEof => {
                        widen!($t, $widen, b"Unexpected end of document")
                    }
                }
            }

            $($extra)*
        }
    };
}

impl_xml_char!(u8, widen_u8, {
    fn write_slice(f: &mut fmt::Formatter<'_>, slice: &[u8]) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(slice))
    }

    #[inline]
    fn find(haystack: &[u8], needle: u8) -> Option<usize> {
        memchr(needle, haystack)
    }

    #[inline]
    fn find_any(haystack: &[u8], set: &[u8]) -> Option<usize> {
        match *set {
            [] => None,
            [a] => memchr(a, haystack),
            [a, b] => memchr2(a, b, haystack),
            [a, b, c] => memchr3(a, b, c, haystack),
            _ => haystack.iter().position(|c| set.contains(c)),
        }
    }

    #[inline]
    fn find_seq(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        memmem::find(haystack, needle)
    }
});

impl_xml_char!(u16, widen_u16, {
    fn write_slice(f: &mut fmt::Formatter<'_>, slice: &[u16]) -> fmt::Result {
        for c in char::decode_utf16(slice.iter().copied()) {
            fmt::Write::write_char(f, c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
});

impl_xml_char!(char, widen_char, {
    fn write_slice(f: &mut fmt::Formatter<'_>, slice: &[char]) -> fmt::Result {
        for &c in slice {
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
});

/// Adapter that renders any `[C]` through [`XmlChar::write_slice`]
pub struct Show<'a, C>(pub &'a [C]);

impl<C: XmlChar> fmt::Display for Show<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        C::write_slice(f, self.0)
    }
}
