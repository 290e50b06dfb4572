//! Identifier cookies: an opaque record identifier plus an absolute expiry,
//! sealed into one envelope.
//!
//! The expiry travels *inside* the ciphertext rather than relying on the
//! transport's `Max-Age`, so it survives cookie-jar manipulation. The codec
//! is identifier-agnostic; keeping the session and visit slots apart is the
//! caller's job.

use crate::{
    envelope::Sealer,
    error::{Error, Result},
    payload,
};
use std::time::Duration;

/// Seal `identifier` with an absolute expiry `ttl` from now
///
/// # Errors
///
/// The OS RNG failed while sealing.
pub fn seal_identifier(sealer: &Sealer, identifier: &str, ttl: Duration) -> Result<String> {
    let joined = payload::join(identifier, payload::deadline(ttl));
    sealer.seal(joined.as_bytes())
}

/// Recover the identifier out of a value produced by [`seal_identifier`]
///
/// # Errors
///
/// - [`Error::Malformed`] / [`Error::InvalidCredential`]: the envelope does
///   not open, or the decrypted payload has no parsable expiry
/// - [`Error::Expired`]: MAC-valid payload whose deadline has passed
pub fn unseal_identifier(sealer: &Sealer, value: &str) -> Result<String> {
    let plaintext = sealer.open(value)?;
    let plaintext = String::from_utf8(plaintext).map_err(|_| Error::Malformed)?;

    let (identifier, expires_at) = payload::split(&plaintext)?;
    if expires_at <= payload::unix_now() {
        return Err(Error::Expired);
    }

    Ok(identifier.to_owned())
}
