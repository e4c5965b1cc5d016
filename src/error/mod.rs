//! Error handling for the Bitcoin cryptography primitives

use std::fmt;

/// The error type for all fallible operations in this crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error: the caller passed a value outside the
    /// domain of the operation (out-of-range field value, invalid private
    /// scalar, bad recovery index, signing without a private key, ...)
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Malformed external input: bad Base58 character, checksum mismatch,
    /// unknown SEC1 prefix, wrong WIF version or payload layout
    Encoding {
        /// Context where the malformed input was detected
        context: &'static str,
        /// Reason why the input does not decode
        reason: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }

    /// Shorthand to create an Encoding error
    pub fn encoding(context: &'static str, reason: &'static str) -> Self {
        Error::Encoding { context, reason }
    }
}

/// Result type for operations in this crate
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Encoding { context, reason } => {
                write!(f, "Invalid encoding for {}: {}", context, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

pub mod validate;
