//! Low-level cryptographic primitives.
//!
//! This is the only module that touches the block cipher crates and the
//! system random source. Everything above it works in terms of
//! `ByteBuffer`, `KeyType` and the engine error type.
//!
//! Primitive choices:
//! - **AES**: `aes` (128/192/256-bit keys, 16-byte blocks)
//! - **DES / 3DES**: `des` (`Des`, `TdesEde3`, 8-byte blocks)
//! - **Modes**: ECB drives the raw block cipher; CBC uses `cbc`
//! - **Padding**: `NoPadding` or `Pkcs7` from `cipher::block_padding`
//! - **Randomness**: `ring::rand::SystemRandom`

use cipher::block_padding::{NoPadding, Pkcs7};
use cipher::{
    BlockCipher, BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit,
};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::cryptor::{Mode, Padding};
use crate::error::{CipherStatus, KeyEngineError};
use crate::key_type::Algorithm;

/// Direction of a block cipher operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt,
}

/// Fill `buf` from the system's secure random source.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<(), KeyEngineError> {
    let rng = SystemRandom::new();
    rng.fill(buf).map_err(|_| KeyEngineError::RandomnessFailure)
}

/// Spread packed 56-bit DES keys into the 64-bit form the primitive expects.
///
/// Each 7-byte group becomes 8 bytes carrying 7 key bits in the high bits
/// and an odd-parity bit in the LSB.
pub(crate) fn spread_des_key(packed: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut spread = Zeroizing::new(Vec::with_capacity(packed.len() / 7 * 8));
    for group in packed.chunks(7) {
        let mut bits: u64 = 0;
        for byte in group {
            bits = (bits << 8) | u64::from(*byte);
        }
        for i in (0..8).rev() {
            let seven = ((bits >> (i * 7)) & 0x7f) as u8;
            let mut byte = seven << 1;
            if byte.count_ones() % 2 == 0 {
                byte |= 1;
            }
            spread.push(byte);
        }
    }
    spread
}

/// Run one block cipher operation, writing into `output`.
///
/// Returns the number of bytes written. `output` must hold at least the
/// input length plus one block. The caller validates the IV length; `iv`
/// is ignored in ECB mode.
pub(crate) fn run_cipher(
    direction: Direction,
    algorithm: Algorithm,
    key: &[u8],
    mode: Mode,
    padding: Padding,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CipherStatus> {
    match algorithm {
        Algorithm::Aes128 => run::<aes::Aes128>(direction, key, mode, padding, iv, input, output),
        Algorithm::Aes192 => run::<aes::Aes192>(direction, key, mode, padding, iv, input, output),
        Algorithm::Aes256 => run::<aes::Aes256>(direction, key, mode, padding, iv, input, output),
        Algorithm::Des => {
            let key = spread_des_key(key);
            run::<des::Des>(direction, &key, mode, padding, iv, input, output)
        }
        Algorithm::TripleDes => {
            let key = spread_des_key(key);
            run::<des::TdesEde3>(direction, &key, mode, padding, iv, input, output)
        }
    }
}

fn run<C>(
    direction: Direction,
    key: &[u8],
    mode: Mode,
    padding: Padding,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CipherStatus>
where
    C: BlockCipher + BlockEncrypt + BlockDecrypt + KeyInit,
{
    let block_size = C::block_size();
    let aligned = input.len() % block_size == 0;
    if !aligned && (padding == Padding::None || direction == Direction::Decrypt) {
        return Err(CipherStatus::AlignmentError);
    }
    if output.len() < input.len() + block_size {
        return Err(CipherStatus::BufferTooSmall);
    }

    match (direction, mode) {
        (Direction::Encrypt, Mode::Ecb) => {
            let cipher = C::new_from_slice(key).map_err(|_| CipherStatus::ParamError)?;
            encrypt_padded(cipher, padding, input, output)
        }
        (Direction::Encrypt, Mode::Cbc) => {
            let cipher = cbc::Encryptor::<C>::new_from_slices(key, iv)
                .map_err(|_| CipherStatus::ParamError)?;
            encrypt_padded(cipher, padding, input, output)
        }
        (Direction::Decrypt, Mode::Ecb) => {
            let cipher = C::new_from_slice(key).map_err(|_| CipherStatus::ParamError)?;
            decrypt_padded(cipher, padding, input, output)
        }
        (Direction::Decrypt, Mode::Cbc) => {
            let cipher = cbc::Decryptor::<C>::new_from_slices(key, iv)
                .map_err(|_| CipherStatus::ParamError)?;
            decrypt_padded(cipher, padding, input, output)
        }
    }
}

fn encrypt_padded<E: BlockEncryptMut>(
    cipher: E,
    padding: Padding,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CipherStatus> {
    let written = match padding {
        Padding::None => cipher.encrypt_padded_b2b_mut::<NoPadding>(input, output),
        Padding::Pkcs7 => cipher.encrypt_padded_b2b_mut::<Pkcs7>(input, output),
    }
    .map_err(|_| CipherStatus::BufferTooSmall)?;
    Ok(written.len())
}

fn decrypt_padded<D: BlockDecryptMut>(
    cipher: D,
    padding: Padding,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, CipherStatus> {
    let written = match padding {
        Padding::None => cipher.decrypt_padded_b2b_mut::<NoPadding>(input, output),
        Padding::Pkcs7 => cipher.decrypt_padded_b2b_mut::<Pkcs7>(input, output),
    }
    .map_err(|_| CipherStatus::DecodeError)?;
    Ok(written.len())
}
