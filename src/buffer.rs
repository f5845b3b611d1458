//! Owned, resizable byte buffer.
//!
//! `ByteBuffer` is the currency of the engine: key material, IVs, plaintext
//! and ciphertext all travel as buffers. A buffer always copies on
//! construction, so no two owners ever share storage. Growing pads with
//! zeroes at the tail; shrinking truncates from the tail and the dropped
//! bytes are gone for good.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroize;

use crate::error::{KeyEngineError, Result};

/// An ordered, mutable sequence of bytes with an explicit size.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Create a buffer of `size` zero bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0u8; size],
        }
    }

    /// Copy an existing byte sequence into a new buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Decode a hex string. Decoding is case-insensitive.
    ///
    /// Fails with `InvalidHexData` on odd length or any non-hex character.
    pub fn from_hex(hex_data: &str) -> Result<Self> {
        let bytes = hex::decode(hex_data).map_err(|_| KeyEngineError::InvalidHexData)?;
        Ok(Self { bytes })
    }

    /// Decode a standard (padded) base64 string.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| KeyEngineError::InvalidBase64Data)?;
        Ok(Self { bytes })
    }

    /// Number of bytes held.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Set the size: truncate from the tail or append zero bytes.
    pub fn resize(&mut self, new_size: usize) {
        // Spare capacity is never exposed.
        self.bytes.resize(new_size, 0);
    }

    /// Append bytes in place.
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Borrow the contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Lowercase hex, two characters per byte, no separators.
    pub fn hex_string(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Standard padded base64.
    pub fn base64_string(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("size", &self.bytes.len())
            .field("hex", &self.hex_string())
            .finish()
    }
}
