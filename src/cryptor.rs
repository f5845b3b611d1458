//! The cipher engine.
//!
//! `encrypt` and `decrypt` are thin entry points over one routine
//! parameterized by direction. Each call is self-contained: validate the
//! IV, allocate an output buffer of `input + block_size` bytes (the PKCS#7
//! worst case), run the primitive, then truncate to the byte count the
//! primitive reports. No state survives between calls.

use tracing::{debug, trace};

use crate::buffer::ByteBuffer;
use crate::crypto::{self, Direction};
use crate::error::{KeyEngineError, Result};
use crate::key_type::KeyType;
use crate::keys::CryptoKey;

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Each block is enciphered independently. Any IV is ignored.
    Ecb,
    /// Each block is chained to the previous ciphertext block.
    Cbc,
}

impl Mode {
    /// Raw option value.
    pub fn raw_value(&self) -> u32 {
        match self {
            Self::Ecb => 2,
            Self::Cbc => 0,
        }
    }

    pub fn from_raw(value: u32) -> Option<Mode> {
        match value {
            2 => Some(Self::Ecb),
            0 => Some(Self::Cbc),
            _ => None,
        }
    }
}

/// Block padding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Input must already be block-aligned.
    None,
    /// PKCS#7 padding, added on encrypt and stripped on decrypt.
    Pkcs7,
}

impl Padding {
    /// Raw option value.
    pub fn raw_value(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Pkcs7 => 1,
        }
    }

    pub fn from_raw(value: u32) -> Option<Padding> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Pkcs7),
            _ => None,
        }
    }
}

/// Encrypt `input` under `key`.
///
/// A missing IV behaves as an all-zero IV in CBC mode. A supplied IV must be
/// exactly one block long, in either mode.
pub fn encrypt(
    input: &ByteBuffer,
    key: &CryptoKey,
    mode: Mode,
    padding: Padding,
    initial_vector: Option<&ByteBuffer>,
) -> Result<ByteBuffer> {
    operation(
        Direction::Encrypt,
        key.key_type(),
        key.key_material().as_bytes(),
        mode,
        padding,
        initial_vector.map(ByteBuffer::as_bytes),
        input.as_bytes(),
    )
}

/// Decrypt `input` under `key`. See [`encrypt`] for the IV rules.
pub fn decrypt(
    input: &ByteBuffer,
    key: &CryptoKey,
    mode: Mode,
    padding: Padding,
    initial_vector: Option<&ByteBuffer>,
) -> Result<ByteBuffer> {
    operation(
        Direction::Decrypt,
        key.key_type(),
        key.key_material().as_bytes(),
        mode,
        padding,
        initial_vector.map(ByteBuffer::as_bytes),
        input.as_bytes(),
    )
}

/// The shared routine. Also used to compute check values from raw material
/// before a `CryptoKey` exists.
pub(crate) fn operation(
    direction: Direction,
    key_type: KeyType,
    material: &[u8],
    mode: Mode,
    padding: Padding,
    initial_vector: Option<&[u8]>,
    input: &[u8],
) -> Result<ByteBuffer> {
    let block_size = key_type.block_size();
    if let Some(iv) = initial_vector {
        if iv.len() != block_size {
            debug!(expected = block_size, got = iv.len(), "initial vector rejected");
            return Err(KeyEngineError::InitialVectorMismatch {
                expected: block_size,
            });
        }
    }
    let zero_iv = vec![0u8; block_size];
    let iv = initial_vector.unwrap_or(&zero_iv[..]);

    let mut output = ByteBuffer::new(input.len() + block_size);
    let written = crypto::run_cipher(
        direction,
        key_type.algorithm(),
        material,
        mode,
        padding,
        iv,
        input,
        output.as_mut_bytes(),
    )
    .map_err(|status| {
        debug!(%key_type, ?direction, ?mode, ?padding, %status, "cipher primitive failed");
        KeyEngineError::CryptoOperationFailed(status)
    })?;
    output.resize(written);

    trace!(%key_type, ?direction, ?mode, input_len = input.len(), written, "cipher operation");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CipherStatus;
    use crate::key_type::{AesKeyLength, DesKeyLength};

    fn zero_aes_key() -> CryptoKey {
        CryptoKey::from_hex(KeyType::Aes(AesKeyLength::Aes128), "00000000000000000000000000000000")
            .unwrap()
    }

    fn buf(s: &str) -> ByteBuffer {
        ByteBuffer::from_hex(s).unwrap()
    }

    #[test]
    fn test_zero_key_known_answers() {
        let key = zero_aes_key();
        let iv = ByteBuffer::new(16);
        let cases = [
            ("f34481ec3cc627bacd5dc3fb08f273e6", "0336763e966d92595a567cc9ce537f5e"),
            ("9798c4640bad75c7c3227db910174e72", "a9a1631bf4996954ebc093957b234589"),
        ];
        for (plaintext, expected) in cases {
            let out = encrypt(&buf(plaintext), &key, Mode::Cbc, Padding::None, Some(&iv)).unwrap();
            assert_eq!(out.hex_string(), expected);
        }
    }

    #[test]
    fn test_missing_iv_equals_zero_iv() {
        let key = CryptoKey::generate(KeyType::Aes(AesKeyLength::Aes128)).unwrap();
        let zero = ByteBuffer::new(16);
        let with_none = encrypt(&zero, &key, Mode::Cbc, Padding::None, None).unwrap();
        let with_zero = encrypt(&zero, &key, Mode::Cbc, Padding::None, Some(&zero)).unwrap();
        assert_eq!(with_none, with_zero);

        let decrypted = decrypt(&with_none, &key, Mode::Cbc, Padding::None, None).unwrap();
        assert_eq!(decrypted.hex_string(), "00000000000000000000000000000000");

        let random_iv = crate::random_bytes(16).unwrap();
        let with_random = encrypt(&zero, &key, Mode::Cbc, Padding::None, Some(&random_iv)).unwrap();
        assert_ne!(with_random, with_none);
        let decrypted = decrypt(&with_random, &key, Mode::Cbc, Padding::None, Some(&random_iv)).unwrap();
        assert_eq!(decrypted, zero);
    }

    #[test]
    fn test_des_zero_block_roundtrip() {
        let key = CryptoKey::generate(KeyType::Des(DesKeyLength::Single)).unwrap();
        let zero = ByteBuffer::new(8);
        let ciphertext = encrypt(&zero, &key, Mode::Cbc, Padding::None, None).unwrap();
        assert_eq!(ciphertext.size(), 8);
        let plaintext = decrypt(&ciphertext, &key, Mode::Cbc, Padding::None, None).unwrap();
        assert_eq!(plaintext.hex_string(), "0000000000000000");
    }

    #[test]
    fn test_pkcs7_expands_and_strips() {
        let key = zero_aes_key();
        let plaintext = ByteBuffer::from_bytes(b"hello");
        let ciphertext = encrypt(&plaintext, &key, Mode::Ecb, Padding::Pkcs7, None).unwrap();
        assert_eq!(ciphertext.hex_string(), "9834ed518cbc8fbe9af3c6ecb75eb8c0");
        let roundtrip = decrypt(&ciphertext, &key, Mode::Ecb, Padding::Pkcs7, None).unwrap();
        assert_eq!(roundtrip.as_bytes(), b"hello");

        // A full block of input gains a full block of padding.
        let block = ByteBuffer::new(16);
        let ciphertext = encrypt(&block, &key, Mode::Cbc, Padding::Pkcs7, None).unwrap();
        assert_eq!(
            ciphertext.hex_string(),
            "66e94bd4ef8a2c3b884cfa59ca342b2e9434dec2d00fdac765f00c0c11628cd1"
        );
    }

    #[test]
    fn test_iv_mismatch() {
        let key = zero_aes_key();
        let short_iv = ByteBuffer::new(8);
        let result = encrypt(&ByteBuffer::new(16), &key, Mode::Cbc, Padding::None, Some(&short_iv));
        assert_eq!(result, Err(KeyEngineError::InitialVectorMismatch { expected: 16 }));

        let result = decrypt(&ByteBuffer::new(16), &key, Mode::Ecb, Padding::None, Some(&short_iv));
        assert_eq!(result, Err(KeyEngineError::InitialVectorMismatch { expected: 16 }));
    }

    #[test]
    fn test_unaligned_without_padding_is_operation_failure() {
        let key = zero_aes_key();
        let result = encrypt(&ByteBuffer::new(15), &key, Mode::Cbc, Padding::None, None);
        assert_eq!(
            result,
            Err(KeyEngineError::CryptoOperationFailed(CipherStatus::AlignmentError))
        );
    }

    #[test]
    fn test_bad_padding_is_decode_error() {
        let key = zero_aes_key();
        // Zero block deciphers to random-looking bytes, not a valid pad.
        let bogus = buf("0336763e966d92595a567cc9ce537f5e");
        let result = decrypt(&bogus, &key, Mode::Ecb, Padding::Pkcs7, None);
        assert_eq!(
            result,
            Err(KeyEngineError::CryptoOperationFailed(CipherStatus::DecodeError))
        );
    }

    #[test]
    fn test_raw_option_values() {
        for mode in [Mode::Ecb, Mode::Cbc] {
            assert_eq!(Mode::from_raw(mode.raw_value()), Some(mode));
        }
        for padding in [Padding::None, Padding::Pkcs7] {
            assert_eq!(Padding::from_raw(padding.raw_value()), Some(padding));
        }
        assert_eq!(Mode::from_raw(7), None);
        assert_eq!(Padding::from_raw(7), None);
    }
}
