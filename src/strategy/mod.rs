//! Whole-document strategies built on the token sequence
//!
//! - Stats: single-pass tallies of kinds and depth
//! - Parallel: independent buffers tokenized on a Rayon pool (feature `parallel`)

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod stats;

#[cfg(feature = "parallel")]
pub use parallel::{collect_stats_parallel, count_tokens_parallel};
pub use stats::DocumentStats;
