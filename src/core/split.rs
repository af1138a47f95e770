//! Splitting a slice into two borrowed halves
//!
//! Every function is total: positions are clamped and a missing delimiter
//! leaves the whole input on the left with an empty right half.

use std::fmt;

use super::chars::{Show, XmlChar};
use super::scanner::{find, find_any};

/// Left and right halves of a split, both borrowing the source slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitResult<'a, C> {
    pub left: &'a [C],
    pub right: &'a [C],
}

impl<'a, C> SplitResult<'a, C> {
    #[inline]
    pub const fn new(left: &'a [C], right: &'a [C]) -> Self {
        SplitResult { left, right }
    }
}

impl<'a, C> From<SplitResult<'a, C>> for (&'a [C], &'a [C]) {
    fn from(split: SplitResult<'a, C>) -> Self {
        (split.left, split.right)
    }
}

impl<C: XmlChar> fmt::Display for SplitResult<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Show(self.left), Show(self.right))
    }
}

/// Split at `pos` (clamped to the length)
#[inline]
pub fn split_at<C>(input: &[C], pos: usize) -> SplitResult<'_, C> {
    let (left, right) = input.split_at(pos.min(input.len()));
    SplitResult::new(left, right)
}

/// Drop the window `[start, start + length)` and return what surrounds it
#[inline]
pub fn split_around<C>(input: &[C], start: usize, length: usize) -> SplitResult<'_, C> {
    let start = start.min(input.len());
    let resume = start.saturating_add(length).min(input.len());
    SplitResult::new(&input[..start], &input[resume..])
}

/// Drop the single character at `pos`
#[inline]
pub fn split_around_one<C>(input: &[C], pos: usize) -> SplitResult<'_, C> {
    split_around(input, pos, 1)
}

/// Split before the first character found in `delims`; the delimiter starts the right half
#[inline]
pub fn split_before<'a, C: XmlChar>(input: &'a [C], delims: &[C]) -> SplitResult<'a, C> {
    split_at(input, find_any(input, delims).unwrap_or(input.len()))
}

/// Split before the first `delim`; the delimiter starts the right half
#[inline]
pub fn split_before_char<C: XmlChar>(input: &[C], delim: C) -> SplitResult<'_, C> {
    split_at(input, find(input, delim).unwrap_or(input.len()))
}

/// Split after the first character found in `delims`; the delimiter ends the left half
#[inline]
pub fn split_after<'a, C: XmlChar>(input: &'a [C], delims: &[C]) -> SplitResult<'a, C> {
    split_at(input, find_any(input, delims).map_or(input.len(), |i| i + 1))
}

/// Split after the first `delim`; the delimiter ends the left half
#[inline]
pub fn split_after_char<C: XmlChar>(input: &[C], delim: C) -> SplitResult<'_, C> {
    split_at(input, find(input, delim).map_or(input.len(), |i| i + 1))
}
