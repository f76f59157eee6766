//! Crate-level error type.
//!
//! Construction-time validation (instances, configurations, patterns and
//! dataset files) reports through [`Error`]. Once a search is constructed
//! its `run()` does not fail: stagnation is reported as data.

use thiserror::Error;

/// Errors raised while building instances, patterns or search runners.
#[derive(Debug, Error)]
pub enum Error {
    #[error("item sequence must not be empty")]
    EmptyItems,

    #[error("bin capacity must be positive")]
    ZeroCapacity,

    #[error("item {index} has size 0; sizes must be positive")]
    ZeroItemSize { index: usize },

    #[error("item {index} has size {size}, which exceeds bin capacity {capacity}")]
    ItemTooLarge {
        index: usize,
        size: u64,
        capacity: u64,
    },

    #[error("pattern must contain at least one heuristic symbol")]
    EmptyPattern,

    #[error("unknown heuristic symbol '{0}' (expected one of f, n, w, b)")]
    UnknownSymbol(char),

    #[error("pattern length {len} exceeds the maximum of {max}")]
    PatternTooLong { len: usize, max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset line {line}: {message}")]
    Dataset { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-level result alias.
pub type Result<T> = std::result::Result<T, Error>;
