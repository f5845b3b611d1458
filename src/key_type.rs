//! The closed catalog of supported key types.
//!
//! This table is the single source of truth for key sizes, block sizes and
//! the two-byte wire encoding. Both key construction and the wire codec
//! consult it, so the two can never disagree.
//!
//! | Key type | Family code | Key bytes | Block bytes |
//! |----------|-------------|-----------|-------------|
//! | AES-128  | 1           | 16        | 16          |
//! | AES-192  | 1           | 24        | 16          |
//! | AES-256  | 1           | 32        | 16          |
//! | DES      | 2           | 7         | 8           |
//! | 3DES     | 2           | 21        | 8           |
//!
//! DES sizes count the 56 effective key bits per DES key; parity bits are
//! added only when the primitive is keyed (see `crypto`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyEngineError;

/// Wire family code for AES keys.
pub const AES_FAMILY: u8 = 1;

/// Wire family code for DES and triple-DES keys.
pub const DES_FAMILY: u8 = 2;

/// AES key length variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesKeyLength {
    Aes128,
    Aes192,
    Aes256,
}

/// DES key length variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesKeyLength {
    /// Single DES.
    Single,
    /// Triple DES (EDE, three independent keys).
    Triple,
}

/// The block cipher algorithm a key type is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Aes128,
    Aes192,
    Aes256,
    Des,
    TripleDes,
}

/// A cipher family and key length. Every other property is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyType {
    Aes(AesKeyLength),
    Des(DesKeyLength),
}

impl KeyType {
    /// Every supported key type, in catalog order.
    pub const ALL: [KeyType; 5] = [
        KeyType::Aes(AesKeyLength::Aes128),
        KeyType::Aes(AesKeyLength::Aes192),
        KeyType::Aes(AesKeyLength::Aes256),
        KeyType::Des(DesKeyLength::Single),
        KeyType::Des(DesKeyLength::Triple),
    ];

    /// Look up a key type by its wire encoding.
    ///
    /// Returns `None` for any pair outside the catalog.
    pub fn decode(family_code: u8, size_bytes: u8) -> Option<KeyType> {
        match (family_code, size_bytes) {
            (AES_FAMILY, 16) => Some(KeyType::Aes(AesKeyLength::Aes128)),
            (AES_FAMILY, 24) => Some(KeyType::Aes(AesKeyLength::Aes192)),
            (AES_FAMILY, 32) => Some(KeyType::Aes(AesKeyLength::Aes256)),
            (DES_FAMILY, 7) => Some(KeyType::Des(DesKeyLength::Single)),
            (DES_FAMILY, 21) => Some(KeyType::Des(DesKeyLength::Triple)),
            _ => None,
        }
    }

    /// The wire encoding `(family_code, key_size_bytes)`.
    pub fn encode(&self) -> (u8, u8) {
        (self.family_code(), self.key_size() as u8)
    }

    /// The wire encoding as the two leading bytes of a key blob.
    pub fn raw_value(&self) -> [u8; 2] {
        let (family, size) = self.encode();
        [family, size]
    }

    pub fn family_code(&self) -> u8 {
        match self {
            Self::Aes(_) => AES_FAMILY,
            Self::Des(_) => DES_FAMILY,
        }
    }

    /// Key material length in bytes.
    pub fn key_size(&self) -> usize {
        match self {
            Self::Aes(AesKeyLength::Aes128) => 16,
            Self::Aes(AesKeyLength::Aes192) => 24,
            Self::Aes(AesKeyLength::Aes256) => 32,
            Self::Des(DesKeyLength::Single) => 7,
            Self::Des(DesKeyLength::Triple) => 21,
        }
    }

    /// Effective key strength in bits.
    pub fn key_bits(&self) -> usize {
        self.key_size() * 8
    }

    /// Cipher block size in bytes.
    pub fn block_size(&self) -> usize {
        match self {
            Self::Aes(_) => 16,
            Self::Des(_) => 8,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Aes(AesKeyLength::Aes128) => Algorithm::Aes128,
            Self::Aes(AesKeyLength::Aes192) => Algorithm::Aes192,
            Self::Aes(AesKeyLength::Aes256) => Algorithm::Aes256,
            Self::Des(DesKeyLength::Single) => Algorithm::Des,
            Self::Des(DesKeyLength::Triple) => Algorithm::TripleDes,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Aes(AesKeyLength::Aes128) => "AES-128",
            Self::Aes(AesKeyLength::Aes192) => "AES-192",
            Self::Aes(AesKeyLength::Aes256) => "AES-256",
            Self::Des(DesKeyLength::Single) => "DES",
            Self::Des(DesKeyLength::Triple) => "3DES",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyType {
    type Err = KeyEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .into_iter()
            .find(|key_type| key_type.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| KeyEngineError::InvalidConfig(format!("unknown key type: {}", s)))
    }
}

impl TryFrom<String> for KeyType {
    type Error = KeyEngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyType> for String {
    fn from(key_type: KeyType) -> Self {
        key_type.name().to_string()
    }
}
