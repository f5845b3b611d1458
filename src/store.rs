//! Storage seam for wrapped keys.
//!
//! The engine does not persist anything itself. A `KeyStore` accepts a blob
//! under a label and hands back the same bytes later, unmodified; it never
//! interprets key material. Implement the trait over a platform key store,
//! a database, or anything else that can hold opaque bytes.

use std::collections::HashMap;

use crate::error::{KeyEngineError, Result};
use crate::keys::CryptoKey;
use crate::wire;

/// An opaque blob store. Implementations must return blobs byte-for-byte.
pub trait KeyStore: Send {
    /// Store `blob` under `label`, replacing any previous blob.
    fn put(&mut self, label: &str, blob: Vec<u8>);

    /// Fetch the blob stored under `label`.
    fn get(&self, label: &str) -> Option<Vec<u8>>;

    /// Remove the blob under `label`. Returns true if one was present.
    fn remove(&mut self, label: &str) -> bool;
}

/// A `KeyStore` held in process memory.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl KeyStore for MemoryKeyStore {
    fn put(&mut self, label: &str, blob: Vec<u8>) {
        self.blobs.insert(label.to_string(), blob);
    }

    fn get(&self, label: &str) -> Option<Vec<u8>> {
        self.blobs.get(label).cloned()
    }

    fn remove(&mut self, label: &str) -> bool {
        self.blobs.remove(label).is_some()
    }
}

/// Wrap `key` and hand the blob to `store`.
pub fn store_key(store: &mut dyn KeyStore, label: &str, key: &CryptoKey) {
    store.put(label, wire::wrap(key).into_vec());
}

/// Fetch and unwrap the key under `label`.
///
/// Fails with `NoKeyFound` if nothing is stored there, and with the wire
/// codec's errors if the stored blob is damaged.
pub fn load_key(store: &dyn KeyStore, label: &str) -> Result<CryptoKey> {
    let blob = store.get(label).ok_or(KeyEngineError::NoKeyFound)?;
    wire::unwrap(&blob)
}
