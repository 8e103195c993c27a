use core::result;

/// Errors produced while coercing inputs into cursors or draining them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is neither a cursor, an ordered sequence, nor a mapping.
    ///
    /// Only dynamic inputs ([`serde_json::Value`]) can hit this at runtime, every
    /// statically typed input is accepted or rejected by the compiler.
    #[error("cannot convert argument to iterator: {0}")]
    UnsupportedInput(String),

    /// `next` or `peek` was called after the cursor ran out of elements.
    #[error("next called on an exhausted iterator")]
    ExhaustedIterator,

    /// An element handed to [`to_map`] was not a key/value entry.
    ///
    /// [`to_map`]: crate::to_map
    #[error("expected a key/value entry: {0}")]
    NotAnEntry(String),
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = result::Result<T, Error>;
