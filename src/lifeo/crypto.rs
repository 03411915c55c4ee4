//! Cryptographic operations for the native format.

use aes::cipher::{AsyncStreamCipher, KeyIvInit};
use aes::Aes256;
use log::{debug, trace};
use sha2::{Digest, Sha256};

use super::error::{FormatError, Result};

pub const SALT_SIZE: usize = 16;
pub const IV_SIZE: usize = 16;

type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// Derive the 256-bit body key.
///
/// Key = SHA-256(salt || password bytes).
fn expand_key(password: &[u8], salt: &[u8]) -> [u8; 32] {
    trace!("Expanding {}-byte password with {}-byte salt", password.len(), salt.len());
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password);
    hasher.finalize().into()
}

/// Decrypt an encrypted body and strip the check prefix.
///
/// Body layout: `[16-byte salt][16-byte IV][ciphertext]`, where the
/// ciphertext decrypts (AES-256-CFB) to `[2-byte check prefix][content]`.
/// The prefix must satisfy `prefix[0] == password[0]` or `prefix[1] == b'\n'`;
/// anything else means the derived key was wrong and the call fails with
/// `DecryptionError` before any grammar parsing happens.
pub fn decrypt_body(body: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let min_len = SALT_SIZE + IV_SIZE + 2;
    if body.len() < min_len {
        return Err(FormatError::SizeMismatch {
            context: "encrypted body",
            expected: min_len,
            found: body.len(),
        });
    }

    let (salt, rest) = body.split_at(SALT_SIZE);
    let (iv, ciphertext) = rest.split_at(IV_SIZE);
    debug!("Decrypting {} ciphertext bytes", ciphertext.len());

    let key = expand_key(password, salt);
    let mut plaintext = ciphertext.to_vec();
    Aes256CfbDec::new_from_slices(&key, iv)
        .map_err(|e| FormatError::DecryptionError(e.to_string()))?
        .decrypt(&mut plaintext);

    let first_matches = password.first().is_some_and(|&b| plaintext[0] == b);
    if !first_matches && plaintext[1] != b'\n' {
        return Err(FormatError::DecryptionError(
            "plaintext check prefix mismatch (wrong password?)".to_string(),
        ));
    }

    Ok(plaintext.split_off(2))
}
