//! Errors raised by the summary structures of this crate.

/// Convenience alias for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or querying a summary.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied argument was outside of its documented domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Human readable description of the accepted domain.
        reason: String,
    },

    /// A query was issued before any observation was inserted.
    #[error("summary holds no observations")]
    Empty,

    /// A freshly computed tuple carries more rank uncertainty than the error
    /// bound admits.
    ///
    /// The GK invariants make this unreachable. Seeing it means the summary
    /// was corrupted by a defect in this crate, not by bad input, and the
    /// caller has no meaningful way to recover.
    #[error("delta {delta} exceeds the error bound {bound} at count {count}")]
    InvariantViolation {
        /// The delta computed for the incoming observation.
        delta: usize,
        /// `floor(2 * epsilon * count)` at the time of insertion.
        bound: usize,
        /// Number of observations held before the insertion.
        count: usize,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Error {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
