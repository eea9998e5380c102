//! Error types surfaced to the JMS API shell

/// The three error kinds the facade can raise.
///
/// Reads are permissive and never raise: absence of optional wire state always
/// yields the AMQP default. Only setters and the id codec can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A setter received a value outside its legal range, or an encoded id could
    /// not be parsed. The message is left unchanged.
    #[error("message format error: {0}")]
    MessageFormat(String),

    /// A caller-supplied argument was itself invalid, independent of message
    /// state (e.g. a null property key).
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// A section was missing where a prior write should have created it. This
    /// is a programming bug in the facade, not a caller error, and is never
    /// silently healed.
    #[error("internal invariant breach: {0}")]
    Internal(String),
}

impl From<crate::id::IdCodecError> for Error {
    fn from(err: crate::id::IdCodecError) -> Self {
        Error::MessageFormat(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
