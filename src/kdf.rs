//! Password-based key derivation (PBKDF2).
//!
//! Derivation runs through `ring::pbkdf2`. The default PRF is HMAC-SHA1,
//! which keeps derived keys compatible with keys produced by other PBKDF2
//! implementations using RFC 2898 defaults; SHA-2 PRFs are available for
//! new deployments.
//!
//! Cost grows linearly with `rounds`. The engine runs derivation on the
//! calling thread; callers needing responsiveness should move it off any
//! latency-sensitive path.

use std::num::NonZeroU32;

use ring::pbkdf2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::ByteBuffer;
use crate::error::{KeyEngineError, Result};

/// Round count used for passphrase-derived keys unless configured otherwise.
pub const DEFAULT_ROUNDS: u32 = 20_000;

/// The HMAC pseudo-random function driving PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Prf {
    #[default]
    HmacSha1,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl Prf {
    fn algorithm(&self) -> pbkdf2::Algorithm {
        match self {
            Self::HmacSha1 => pbkdf2::PBKDF2_HMAC_SHA1,
            Self::HmacSha256 => pbkdf2::PBKDF2_HMAC_SHA256,
            Self::HmacSha384 => pbkdf2::PBKDF2_HMAC_SHA384,
            Self::HmacSha512 => pbkdf2::PBKDF2_HMAC_SHA512,
        }
    }

    /// Digest output length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::HmacSha1 => 20,
            Self::HmacSha256 => 32,
            Self::HmacSha384 => 48,
            Self::HmacSha512 => 64,
        }
    }
}

/// PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    pub rounds: u32,
    pub prf: Prf,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            prf: Prf::HmacSha1,
        }
    }
}

/// PBKDF2-HMAC-SHA1 over raw bytes.
pub fn derive(passphrase: &[u8], salt: &[u8], rounds: u32, output_size: usize) -> Result<ByteBuffer> {
    derive_with(Prf::HmacSha1, passphrase, salt, rounds, output_size)
}

/// PBKDF2-HMAC-SHA1 over the UTF-8 bytes of `passphrase` and `salt`.
pub fn derive_str(passphrase: &str, salt: &str, rounds: u32, output_size: usize) -> Result<ByteBuffer> {
    derive(passphrase.as_bytes(), salt.as_bytes(), rounds, output_size)
}

/// PBKDF2 with an explicit PRF.
///
/// Fails with `InvalidKdfParameters` when `rounds` or `output_size` is zero,
/// or when `output_size` exceeds the PBKDF2 limit of `(2^32 - 1)` digest
/// blocks.
pub fn derive_with(
    prf: Prf,
    passphrase: &[u8],
    salt: &[u8],
    rounds: u32,
    output_size: usize,
) -> Result<ByteBuffer> {
    let iterations = NonZeroU32::new(rounds).ok_or(KeyEngineError::InvalidKdfParameters)?;
    let max_output = (u32::MAX as u64).saturating_mul(prf.output_len() as u64);
    if output_size == 0 || output_size as u64 > max_output {
        return Err(KeyEngineError::InvalidKdfParameters);
    }

    debug!(?prf, rounds, output_size, "deriving key material");
    let mut derived = ByteBuffer::new(output_size);
    pbkdf2::derive(prf.algorithm(), iterations, salt, passphrase, derived.as_mut_bytes());
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc6070_single_round() {
        let derived = derive_str("password", "salt", 1, 20).unwrap();
        assert_eq!(derived.hex_string(), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
    }

    #[test]
    fn test_rfc6070_two_rounds() {
        let derived = derive_str("password", "salt", 2, 20).unwrap();
        assert_eq!(derived.hex_string(), "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957");
    }

    #[test]
    fn test_sha256_prf() {
        let derived = derive_with(Prf::HmacSha256, b"password", b"salt", 1, 32).unwrap();
        assert_eq!(
            derived.hex_string(),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = derive(b"secret", b"pepper", 10, 16).unwrap();
        let b = derive(b"secret", b"pepper", 10, 16).unwrap();
        let c = derive(b"secret", b"paprika", 10, 16).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(derive(b"p", b"s", 0, 16), Err(KeyEngineError::InvalidKdfParameters));
        assert_eq!(derive(b"p", b"s", 1, 0), Err(KeyEngineError::InvalidKdfParameters));
    }

    #[test]
    fn test_params_serde_defaults() {
        let params: KdfParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, KdfParams::default());
        let params: KdfParams =
            serde_json::from_str(r#"{"rounds": 100, "prf": "hmac-sha512"}"#).unwrap();
        assert_eq!(params.rounds, 100);
        assert_eq!(params.prf, Prf::HmacSha512);
    }
}
