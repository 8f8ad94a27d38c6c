//! Error types shared across the ink model

use thiserror::Error;

/// Errors raised by stroke and point buffer operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    /// A point index outside `[0, len)`
    #[error("point index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// Caller supplied data the operation cannot accept
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for stroke operations
pub type StrokeResult<T> = Result<T, StrokeError>;

/// Errors raised while reading or writing an object stream
///
/// Any of these means the value being read or written must be discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    #[error("unexpected end of stream")]
    UnexpectedEof,

    #[error("expected value of type '{expected}', found '{found}'")]
    UnexpectedType { expected: char, found: char },

    #[error("expected object '{expected}', found '{found}'")]
    UnexpectedObject { expected: String, found: String },

    #[error("invalid length {0}")]
    InvalidLength(i64),

    #[error("length {0} does not fit in a stream length field")]
    TooLong(usize),

    #[error("record size mismatch: expected {expected} bytes, found {found}")]
    RecordSize { expected: usize, found: usize },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown stroke tool {0}")]
    InvalidToolType(i32),

    #[error("unknown element type '{0}'")]
    UnknownElement(String),

    #[error("{0} trailing bytes after document")]
    TrailingData(usize),
}

/// Result type for stream decoding
pub type StreamResult<T> = Result<T, StreamError>;
