//! Core slicing and tokenizing primitives
//!
//! - Chars: character width abstraction (`u8`, `u16`, `char`), memchr for bytes
//! - Scanner: clamped search and sub-slice helpers over `&[C]`
//! - Trim: strip a character set from either end
//! - Split: partition a slice by position, delimiter or window
//! - Token: the event kinds and their borrowed payloads
//! - Tokenizer: the state machine producing one token per step

pub mod chars;
pub mod scanner;
pub mod split;
pub mod token;
pub mod tokenizer;
pub mod trim;
