//! The encrypt-then-MAC envelope.
//!
//! Wire layout: `base64url( mac(32) || '|' || iv(16) || ciphertext )`.
//! The MAC authenticates `iv || ciphertext`. Parsing splits at the fixed MAC
//! length; the delimiter byte is a structural check only, since it may
//! legally occur inside the MAC or ciphertext bytes.

use crate::{
    error::{Error, Result},
    key::KeyMaterial,
};
use aes::{
    cipher::{generic_array::GenericArray, KeyIvInit, StreamCipher},
    Aes256,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type HmacSha256 = Hmac<Sha256>;

const MAC_LEN: usize = 32;
const IV_LEN: usize = 16;
const DELIMITER: u8 = b'|';

/// Shortest decodable envelope: MAC, delimiter, and IV with empty ciphertext
const MIN_ENVELOPE_LEN: usize = MAC_LEN + 1 + IV_LEN;

/// Applies confidentiality and integrity to arbitrary byte payloads
///
/// Pure over its inputs plus the injected [`KeyMaterial`]; cheap to clone and
/// safe to use from any number of concurrent tasks.
#[derive(Clone)]
pub struct Sealer {
    keys: KeyMaterial,
}

impl Sealer {
    #[must_use]
    pub fn new(keys: KeyMaterial) -> Self {
        Self { keys }
    }

    /// Encrypt `plaintext` under a fresh random IV and authenticate the result
    ///
    /// # Errors
    ///
    /// The OS RNG failed while drawing the IV.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String> {
        let mut iv = [0_u8; IV_LEN];
        OsRng.try_fill_bytes(&mut iv)?;

        let mut body = Vec::with_capacity(IV_LEN + plaintext.len());
        body.extend_from_slice(&iv);
        body.extend_from_slice(plaintext);

        let mut cipher = Aes256Ctr::new(
            GenericArray::from_slice(&self.keys.cipher_key),
            GenericArray::from_slice(&iv),
        );
        cipher.apply_keystream(&mut body[IV_LEN..]);

        let mac = self.mac_over(&body);

        let mut sealed = Vec::with_capacity(MAC_LEN + 1 + body.len());
        sealed.extend_from_slice(&mac);
        sealed.push(DELIMITER);
        sealed.extend_from_slice(&body);

        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Verify and decrypt an envelope produced by [`Sealer::seal`]
    ///
    /// The MAC is recomputed over the supplied `iv || ciphertext` and compared
    /// in constant time. Nothing is decrypted unless it verifies.
    ///
    /// # Errors
    ///
    /// - [`Error::Malformed`]: bad base64 or a buffer too short to contain
    ///   MAC, delimiter, and IV
    /// - [`Error::InvalidCredential`]: the MAC does not verify
    pub fn open(&self, sealed: &str) -> Result<Vec<u8>> {
        let envelope = URL_SAFE_NO_PAD
            .decode(sealed)
            .map_err(|_| Error::Malformed)?;

        if envelope.len() < MIN_ENVELOPE_LEN || envelope[MAC_LEN] != DELIMITER {
            return Err(Error::Malformed);
        }

        let (mac, rest) = envelope.split_at(MAC_LEN);
        let body = &rest[1..];

        let mut verifier = <HmacSha256 as Mac>::new_from_slice(&self.keys.mac_key)
            .expect("HMAC accepts any key length");
        verifier.update(body);
        verifier
            .verify_slice(mac)
            .map_err(|_| Error::InvalidCredential)?;

        let (iv, ciphertext) = body.split_at(IV_LEN);
        let mut plaintext = ciphertext.to_vec();
        let mut cipher = Aes256Ctr::new(
            GenericArray::from_slice(&self.keys.cipher_key),
            GenericArray::from_slice(iv),
        );
        cipher.apply_keystream(&mut plaintext);

        Ok(plaintext)
    }

    fn mac_over(&self, body: &[u8]) -> [u8; MAC_LEN] {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.keys.mac_key)
            .expect("HMAC accepts any key length");
        mac.update(body);
        mac.finalize().into_bytes().into()
    }
}
