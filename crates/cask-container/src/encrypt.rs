use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::RngCore;

use crate::error::{ContainerError, ContainerResult};

/// 24-byte nonce for XChaCha20-Poly1305.
const NONCE_LEN: usize = 24;

/// Byte-in/byte-out encryption stage.
pub trait Encryptor: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> ContainerResult<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8]) -> ContainerResult<Vec<u8>>;
}

/// XChaCha20-Poly1305 encryptor.
///
/// Each `encrypt` call draws a fresh random 24-byte nonce and prepends it to
/// the ciphertext, so the output is self-contained. Key material is supplied
/// by the caller; key persistence is out of scope here.
pub struct XChaChaEncryptor {
    key: Key,
}

impl XChaChaEncryptor {
    /// Create an encryptor from a 32-byte key.
    pub fn new(key: [u8; 32]) -> Self {
        Self {
            key: Key::from(key),
        }
    }
}

impl Encryptor for XChaChaEncryptor {
    fn encrypt(&self, plaintext: &[u8]) -> ContainerResult<Vec<u8>> {
        let cipher = XChaCha20Poly1305::new(&self.key);
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        let ciphertext = cipher
            .encrypt(XNonce::from_slice(&nonce), plaintext)
            .map_err(|e| ContainerError::Encryption(e.to_string()))?;
        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> ContainerResult<Vec<u8>> {
        if ciphertext.len() <= NONCE_LEN {
            return Err(ContainerError::Encryption(
                "ciphertext shorter than nonce".into(),
            ));
        }
        let (nonce, body) = ciphertext.split_at(NONCE_LEN);
        let cipher = XChaCha20Poly1305::new(&self.key);
        cipher
            .decrypt(XNonce::from_slice(nonce), body)
            .map_err(|e| ContainerError::Encryption(e.to_string()))
    }
}
