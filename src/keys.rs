//! Symmetric key material and its check value.
//!
//! A `CryptoKey` owns its material exclusively and carries a key check
//! value (KCV): the first three bytes of a zero block enciphered under the
//! key in CBC mode with a zero IV and no padding. The KCV identifies a key
//! without revealing it.
//!
//! - Not `Clone`. A key is moved, never duplicated implicitly.
//! - Zeroised on drop.
//! - Fully built or not at all: every constructor computes the KCV before
//!   returning, and any failure discards the partial key.

use std::fmt;

use tracing::debug;
use zeroize::Zeroize;

use crate::buffer::ByteBuffer;
use crate::crypto::{self, Direction};
use crate::cryptor::{self, Mode, Padding};
use crate::error::{KeyEngineError, Result};
use crate::kdf::{self, KdfParams};
use crate::key_type::KeyType;

/// Length of a key check value in bytes.
pub const KCV_LEN: usize = 3;

/// A typed symmetric key with its check value.
pub struct CryptoKey {
    key_type: KeyType,
    material: ByteBuffer,
    check_value: [u8; KCV_LEN],
}

impl CryptoKey {
    /// Generate a key from the system's secure random source.
    pub fn generate(key_type: KeyType) -> Result<Self> {
        let mut material = ByteBuffer::new(key_type.key_size());
        crypto::fill_random(material.as_mut_bytes())?;
        Self::from_material(key_type, material)
    }

    /// Build a key from hex-encoded material.
    ///
    /// The character count is checked before decoding, so `expected` and
    /// `got` in a `KeySizeMismatch` count hex characters.
    pub fn from_hex(key_type: KeyType, hex_key_data: &str) -> Result<Self> {
        let expected = key_type.key_size() * 2;
        let got = hex_key_data.chars().count();
        if got != expected {
            return Err(KeyEngineError::KeySizeMismatch { expected, got });
        }
        let material = ByteBuffer::from_hex(hex_key_data)?;
        Self::from_material(key_type, material)
    }

    /// Build a key from raw material. The slice is copied.
    pub fn from_bytes(key_type: KeyType, key_data: &[u8]) -> Result<Self> {
        if key_data.len() != key_type.key_size() {
            return Err(KeyEngineError::KeySizeMismatch {
                expected: key_type.key_size(),
                got: key_data.len(),
            });
        }
        Self::from_material(key_type, ByteBuffer::from_bytes(key_data))
    }

    /// Derive a key from a passphrase and salt with the default PBKDF2
    /// parameters (HMAC-SHA1, [`kdf::DEFAULT_ROUNDS`] rounds).
    pub fn derive(key_type: KeyType, passphrase: &str, salt: &str) -> Result<Self> {
        Self::derive_with(key_type, passphrase, salt, &KdfParams::default())
    }

    /// Derive a key from a passphrase and salt with explicit parameters.
    pub fn derive_with(
        key_type: KeyType,
        passphrase: &str,
        salt: &str,
        params: &KdfParams,
    ) -> Result<Self> {
        let derived = kdf::derive_with(
            params.prf,
            passphrase.as_bytes(),
            salt.as_bytes(),
            params.rounds,
            key_type.key_size(),
        )?;
        Self::from_bytes(key_type, derived.as_bytes())
    }

    fn from_material(key_type: KeyType, material: ByteBuffer) -> Result<Self> {
        let check_value = check_value(key_type, material.as_bytes())?;
        debug!(%key_type, kcv = %hex::encode(check_value), "key constructed");
        Ok(Self {
            key_type,
            material,
            check_value,
        })
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Borrow the raw key material.
    pub fn key_material(&self) -> &ByteBuffer {
        &self.material
    }

    pub fn key_byte_count(&self) -> usize {
        self.material.size()
    }

    /// The three check value bytes.
    pub fn key_check_value(&self) -> [u8; KCV_LEN] {
        self.check_value
    }

    /// The check value as six lowercase hex characters.
    pub fn key_check_value_string(&self) -> String {
        hex::encode(self.check_value)
    }

    /// True if `other` has the same type and check value.
    ///
    /// Compares fingerprints only; distinct keys collide with probability
    /// about 2^-24.
    pub fn matches(&self, other: &CryptoKey) -> bool {
        self.key_type == other.key_type && self.check_value == other.check_value
    }
}

impl Drop for CryptoKey {
    fn drop(&mut self) {
        self.material.zeroize();
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("key_type", &self.key_type)
            .field("kcv", &self.key_check_value_string())
            .finish_non_exhaustive()
    }
}

/// Compute the key check value of raw material.
pub(crate) fn check_value(key_type: KeyType, material: &[u8]) -> Result<[u8; KCV_LEN]> {
    let zero_block = vec![0u8; key_type.block_size()];
    let enciphered = cryptor::operation(
        Direction::Encrypt,
        key_type,
        material,
        Mode::Cbc,
        Padding::None,
        None,
        &zero_block,
    )?;
    let mut kcv = [0u8; KCV_LEN];
    kcv.copy_from_slice(&enciphered.as_bytes()[..KCV_LEN]);
    Ok(kcv)
}
