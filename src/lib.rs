//! svxml - zero-copy slicing and SAX-style XML tokenizing
//!
//! Layers:
//! - core: split/trim primitives and the tokenizer state machine
//! - reader: the lazy, restartable token sequence (`tokenize`)
//! - strategy: whole-document statistics, parallel batches
//!
//! Every token is a view into the caller's buffer; nothing is copied or
//! allocated while scanning. The tokenizer does not validate: it reports
//! structure, not correctness.
//!
//! ```
//! use svxml::{tokenize, TokenKind};
//!
//! let names: Vec<_> = tokenize(b"<ROOT><EMPTY/></ROOT>")
//!     .filter(|t| t.kind == TokenKind::StartElement)
//!     .filter_map(|t| t.qname_str())
//!     .collect();
//! assert_eq!(names, ["ROOT", "EMPTY"]);
//! ```

pub mod core;
pub mod reader;
pub mod strategy;

pub use crate::core::chars::XmlChar;
pub use crate::core::split::{
    split_after, split_after_char, split_around, split_around_one, split_at, split_before,
    split_before_char, SplitResult,
};
pub use crate::core::token::{Token, TokenKind};
pub use crate::core::tokenizer::{ParseError, ParseState, ScanState};
pub use crate::core::trim::{trim, trim_left, trim_right};
pub use reader::{tokenize, TokenSequence};
#[cfg(feature = "parallel")]
pub use strategy::{collect_stats_parallel, count_tokens_parallel};
pub use strategy::DocumentStats;
