//! Error types for pagesim.

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// Page references themselves never fail: once a policy is constructed,
/// `read_memory` and `write_memory` always succeed. Errors come from
/// configuration and from trace input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A policy was asked for zero frames.
    #[error("Invalid frame count {0}: at least one frame is required")]
    InvalidFrameCount(usize),

    /// The policy name is not one of `clock`, `lru` or `rand`.
    #[error("Unknown replacement policy '{0}' (expected clock, lru or rand)")]
    UnknownPolicy(String),

    /// A trace line could not be parsed.
    ///
    /// `line` is 1-based.
    #[error("Trace line {line}: {reason}")]
    TraceParse { line: usize, reason: String },

    /// I/O error while reading a trace.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
