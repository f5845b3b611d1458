//! # symkey
//!
//! Symmetric key engine.
//!
//! Keys are typed (AES-128/192/256, DES, 3DES), carry a three-byte key check
//! value (KCV) that identifies them without revealing them, and serialize to
//! a compact wire blob that an external store can persist verbatim. The
//! cipher engine runs ECB or CBC with optional PKCS#7 padding, and PBKDF2
//! turns passphrases into key material.
//!
//! ```text
//! KeyType ──► CryptoKey ──► cryptor::{encrypt, decrypt}
//!                │
//!                └──► wire::{wrap, unwrap} ──► KeyStore (external)
//! kdf::derive ──► CryptoKey::from_bytes
//! ```
//!
//! ## Public API
//!
//! The public surface is the types and functions re-exported here plus the
//! `cryptor`, `kdf`, `wire`, `config` and `store` modules. Primitive
//! dispatch lives in a crate-private module.

// Module declarations.
pub mod buffer;
pub mod config;
pub(crate) mod crypto;
pub mod cryptor;
pub mod error;
pub mod kdf;
pub mod key_type;
pub mod keys;
pub mod store;
pub mod wire;

pub use buffer::ByteBuffer;
pub use config::EngineConfig;
pub use cryptor::{Mode, Padding};
pub use error::{CipherStatus, KeyEngineError, Result};
pub use key_type::{AesKeyLength, Algorithm, DesKeyLength, KeyType};
pub use keys::{CryptoKey, KCV_LEN};

/// Generate a random key of the given type.
///
/// Fails only if the system's secure random source is unavailable; weak
/// material is never returned.
pub fn generate_key(key_type: KeyType) -> Result<CryptoKey> {
    CryptoKey::generate(key_type)
}

/// Draw `size` bytes from the system's secure random source.
///
/// Suitable for IVs and salts.
pub fn random_bytes(size: usize) -> Result<ByteBuffer> {
    let mut buffer = ByteBuffer::new(size);
    crypto::fill_random(buffer.as_mut_bytes())?;
    Ok(buffer)
}
