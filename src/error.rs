//! Error types for cipher and mode operations.

use core::fmt;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by cipher and mode configuration calls.
///
/// Every variant is a synchronous, recoverable configuration or usage error;
/// the affected object stays in its previous valid state (or a defined
/// unkeyed state) and can be re-initialized. A failed tag check is *not* an
/// error — [`Eax::check_tag`](crate::Eax::check_tag) reports it as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Unsupported key length for the cipher or mode.
    InvalidKeyLength,

    /// Empty IV passed to an AEAD session.
    InvalidIvLength,

    /// Tweak longer than one cipher block (16 bytes).
    InvalidTweakLength,

    /// Requested tag longer than one cipher block (16 bytes).
    InvalidTagLength,

    /// Sector size smaller than one cipher block (16 bytes).
    InvalidSectorSize,

    /// Operation called out of session order (e.g. associated data after
    /// encryption has begun, or encryption before an IV was set).
    InvalidState,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength => write!(f, "unsupported key length"),
            Error::InvalidIvLength => write!(f, "IV must not be empty"),
            Error::InvalidTweakLength => write!(f, "tweak longer than 16 bytes"),
            Error::InvalidTagLength => write!(f, "tag longer than 16 bytes"),
            Error::InvalidSectorSize => write!(f, "sector size smaller than 16 bytes"),
            Error::InvalidState => write!(f, "operation not valid in the current session state"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
