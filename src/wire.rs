//! Key wire format.
//!
//! A wrapped key is a flat byte blob that an external store persists
//! verbatim:
//!
//! ```text
//! [ family (1) ][ key size N (1) ][ key material (N) ][ kcv len = 3 (1) ][ kcv (3) ]
//! ```
//!
//! Unwrapping rebuilds the key, recomputes its check value and compares it
//! to the stored one, so a corrupted blob is rejected before the key can be
//! used.

use tracing::warn;

use crate::buffer::ByteBuffer;
use crate::error::{KeyEngineError, Result};
use crate::key_type::KeyType;
use crate::keys::{CryptoKey, KCV_LEN};

/// Shortest blob that can hold a header, the KCV length byte and a KCV.
pub const MIN_BLOB_LEN: usize = 2 + 1 + KCV_LEN;

/// Serialize a key into its wire blob.
pub fn wrap(key: &CryptoKey) -> ByteBuffer {
    let mut blob = ByteBuffer::new(0);
    blob.append(&key.key_type().raw_value());
    blob.append(key.key_material().as_bytes());
    blob.append(&[KCV_LEN as u8]);
    blob.append(&key.key_check_value());
    blob
}

/// Parse a wire blob back into a key, verifying its check value.
pub fn unwrap(blob: &[u8]) -> Result<CryptoKey> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(KeyEngineError::NoKeyFound);
    }
    let key_type = KeyType::decode(blob[0], blob[1]).ok_or(KeyEngineError::NoKeyFound)?;

    let material_end = 2 + key_type.key_size();
    let material = blob.get(2..material_end).ok_or(KeyEngineError::NoKeyFound)?;
    let kcv_len = *blob.get(material_end).ok_or(KeyEngineError::NoKeyFound)?;
    if kcv_len as usize != KCV_LEN {
        return Err(KeyEngineError::InvalidCheckValueLength(kcv_len));
    }
    let kcv_start = material_end + 1;
    if blob.len() != kcv_start + KCV_LEN {
        return Err(KeyEngineError::NoKeyFound);
    }
    let mut stored_kcv = [0u8; KCV_LEN];
    stored_kcv.copy_from_slice(&blob[kcv_start..]);

    let key = CryptoKey::from_bytes(key_type, material)?;
    if key.key_check_value() != stored_kcv {
        warn!(%key_type, "stored key check value does not match key material");
        return Err(KeyEngineError::KcvMismatch {
            expected: stored_kcv,
            got: key.key_check_value(),
        });
    }
    Ok(key)
}
