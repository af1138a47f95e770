//! Parallel Batch Tokenization
//!
//! Uses Rayon to tokenize many independent buffers at once. Each buffer gets
//! its own scan state; the buffers themselves are only read.

use rayon::prelude::*;

use super::stats::DocumentStats;
use crate::core::chars::XmlChar;
use crate::reader::slice::tokenize;

/// Tokenize every buffer in parallel and collect its statistics, in input order
pub fn collect_stats_parallel<C: XmlChar>(buffers: &[&[C]]) -> Vec<DocumentStats> {
    buffers.par_iter().map(|&buffer| DocumentStats::of(buffer)).collect()
}

/// Total number of tokens per buffer, in input order
pub fn count_tokens_parallel<C: XmlChar>(buffers: &[&[C]]) -> Vec<usize> {
    buffers.par_iter().map(|&buffer| tokenize(buffer).count()).collect()
}
