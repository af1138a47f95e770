//! Trimming characters from the ends of a slice

/// Strip every leading character contained in `set`
pub fn trim_left<'a, C: PartialEq>(s: &'a [C], set: &[C]) -> &'a [C] {
    let start = s.iter().position(|c| !set.contains(c)).unwrap_or(s.len());
    &s[start..]
}

/// Strip every trailing character contained in `set`
pub fn trim_right<'a, C: PartialEq>(s: &'a [C], set: &[C]) -> &'a [C] {
    let end = s.iter().rposition(|c| !set.contains(c)).map_or(0, |i| i + 1);
    &s[..end]
}

/// Strip characters contained in `set` from both ends
pub fn trim<'a, C: PartialEq>(s: &'a [C], set: &[C]) -> &'a [C] {
    trim_right(trim_left(s, set), set)
}
