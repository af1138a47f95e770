//! XML Reader Module
//!
//! - TokenSequence: lazy, restartable iterator over a fully resident buffer

pub mod slice;

pub use slice::{tokenize, TokenSequence};
