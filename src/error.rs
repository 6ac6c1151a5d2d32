use thiserror::Error;

/// Error type for the span cursors and the free-standing primitive codec.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum Error {
    /// A length or count was negative, or too large to be represented in the encoding.
    #[error("count {count} is out of range")]
    OutOfRange {
        /// The offending count.
        count: i64,
    },

    /// The buffer does not have enough bytes left to finish the operation.
    ///
    /// Unless documented otherwise, an operation that fails with this error has not moved the
    /// cursor position.
    #[error("needed {needed} bytes but only {remaining} remain")]
    EndOfData {
        /// The number of bytes the operation required.
        needed: usize,
        /// The number of bytes that were available.
        remaining: usize,
    },

    /// A null-terminated string had no terminator before the end of the buffer.
    #[error("null terminator not found")]
    Malformed,

    /// A string payload was not well-formed UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// Shorthand for results of span cursor and codec operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
pub use stream_error::StreamError;

#[cfg(feature = "std")]
mod stream_error {
    use thiserror::Error;

    /// Error type for the stream cursors.
    #[derive(Debug, Error)]
    pub enum StreamError {
        /// The underlying stream failed, or ended in the middle of a value.
        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),

        /// A length or count prefix was negative, or a slice is too long for an `i32` prefix.
        #[error("count {count} is out of range")]
        OutOfRange {
            /// The offending count.
            count: i64,
        },

        /// A string payload was not well-formed UTF-8.
        #[error("string is not valid UTF-8")]
        InvalidUtf8(#[from] std::string::FromUtf8Error),

        /// A null-terminated string hit the end of the stream before its terminator.
        #[error("null terminator not found")]
        Malformed,

        /// An array element could not be decoded.
        #[error("end of stream: read {read}, expected {expected} elements")]
        TruncatedArray {
            /// Elements decoded successfully before the failure.
            read: usize,
            /// Elements announced by the count prefix.
            expected: usize,
            /// The failure that stopped decoding.
            #[source]
            source: Box<StreamError>,
        },
    }

    /// Shorthand for results of stream cursor operations.
    pub type StreamResult<T> = core::result::Result<T, StreamError>;
}

#[cfg(feature = "std")]
pub use stream_error::StreamResult;
