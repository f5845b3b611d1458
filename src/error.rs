//! Error types for symkey.
//!
//! Every variant is a distinct failure mode of the key engine. Messages are
//! intentionally minimal: they say *what* failed and carry sizes or check
//! values, never key material.

use std::fmt;

/// Failure kinds reported by the block cipher primitive.
///
/// The numeric codes are stable and follow the status values conventionally
/// returned by platform cipher APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherStatus {
    /// The key or IV was rejected by the primitive.
    ParamError,
    /// The output buffer cannot hold the result.
    BufferTooSmall,
    /// Input length is not a multiple of the block size.
    AlignmentError,
    /// Decrypted data did not carry valid padding.
    DecodeError,
}

impl CipherStatus {
    /// Numeric status code.
    pub fn code(&self) -> i32 {
        match self {
            Self::ParamError => -4300,
            Self::BufferTooSmall => -4301,
            Self::AlignmentError => -4303,
            Self::DecodeError => -4304,
        }
    }
}

impl fmt::Display for CipherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParamError => "parameter error",
            Self::BufferTooSmall => "buffer too small",
            Self::AlignmentError => "alignment error",
            Self::DecodeError => "decode error",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// The single error type for all symkey operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEngineError {
    /// Hex input had odd length or a non-hex character.
    InvalidHexData,

    /// Base64 input was malformed.
    InvalidBase64Data,

    /// Supplied key material does not match the key type's size.
    ///
    /// For hex input both values count hex characters; otherwise bytes.
    KeySizeMismatch { expected: usize, got: usize },

    /// The IV length differs from the cipher block size.
    InitialVectorMismatch { expected: usize },

    /// The block cipher primitive reported a failure.
    CryptoOperationFailed(CipherStatus),

    /// A wire blob is too short, malformed, or names an unknown key type.
    NoKeyFound,

    /// The check value stored with a key disagrees with the recomputed one.
    KcvMismatch { expected: [u8; 3], got: [u8; 3] },

    /// A wire blob declares a check value length other than 3.
    InvalidCheckValueLength(u8),

    /// PBKDF2 was asked for zero rounds or an unusable output size.
    InvalidKdfParameters,

    /// The system's random number generator failed to produce bytes.
    RandomnessFailure,

    /// Configuration could not be read or parsed.
    InvalidConfig(String),
}

impl fmt::Display for KeyEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHexData => write!(f, "invalid hex data"),
            Self::InvalidBase64Data => write!(f, "invalid base64 data"),
            Self::KeySizeMismatch { expected, got } => {
                write!(f, "key length mismatch: expected {}, got {}", expected, got)
            }
            Self::InitialVectorMismatch { expected } => {
                write!(f, "initial vector must be {} bytes", expected)
            }
            Self::CryptoOperationFailed(status) => {
                write!(f, "crypto operation failed: {}", status)
            }
            Self::NoKeyFound => write!(f, "no key found"),
            Self::KcvMismatch { expected, got } => write!(
                f,
                "key check value mismatch: expected {}, got {}",
                hex::encode(expected),
                hex::encode(got)
            ),
            Self::InvalidCheckValueLength(len) => {
                write!(f, "invalid key check value length: {}", len)
            }
            Self::InvalidKdfParameters => write!(f, "invalid key derivation parameters"),
            Self::RandomnessFailure => write!(f, "randomness source failed"),
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for KeyEngineError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeyEngineError>;
