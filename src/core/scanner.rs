//! Slice search and sub-slicing helpers
//!
//! Thin, total wrappers over `&[C]` used by the tokenizer and the split
//! primitives. Searches return `Option<usize>`; sub-slicing clamps to the
//! slice bounds instead of panicking.

use super::chars::XmlChar;

/// Find the first `needle`
#[inline]
pub fn find<C: XmlChar>(s: &[C], needle: C) -> Option<usize> {
    C::find(s, needle)
}

/// Find the first `needle` at or after `from`
#[inline]
pub fn find_from<C: XmlChar>(s: &[C], needle: C, from: usize) -> Option<usize> {
    let from = from.min(s.len());
    C::find(&s[from..], needle).map(|i| from + i)
}

/// Find the first character contained in `set`
#[inline]
pub fn find_any<C: XmlChar>(s: &[C], set: &[C]) -> Option<usize> {
    C::find_any(s, set)
}

/// Find the first occurrence of the literal `needle`
#[inline]
pub fn find_seq<C: XmlChar>(s: &[C], needle: &[C]) -> Option<usize> {
    C::find_seq(s, needle)
}

/// Find the first occurrence of the literal `needle` at or after `from`
#[inline]
pub fn find_seq_from<C: XmlChar>(s: &[C], needle: &[C], from: usize) -> Option<usize> {
    let from = from.min(s.len());
    C::find_seq(&s[from..], needle).map(|i| from + i)
}

/// Check whether `s[pos..]` starts with `literal`
#[inline]
pub fn matches_at<C: XmlChar>(s: &[C], pos: usize, literal: &[C]) -> bool {
    s.get(pos..).is_some_and(|rest| rest.starts_with(literal))
}

/// `s[start..start + len]`, clamped to the slice
#[inline]
pub fn substr<C>(s: &[C], start: usize, len: usize) -> &[C] {
    let start = start.min(s.len());
    let end = start.saturating_add(len).min(s.len());
    &s[start..end]
}

/// `s[n..]`, or the empty tail when `n` is past the end
#[inline]
pub fn drop_prefix<C>(s: &[C], n: usize) -> &[C] {
    &s[n.min(s.len())..]
}

/// First character, if any
#[inline]
pub fn first<C: Copy>(s: &[C]) -> Option<C> {
    s.first().copied()
}
