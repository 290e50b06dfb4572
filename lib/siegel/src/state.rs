//! Consume-once CSRF challenges.
//!
//! A challenge is a random nonce plus an absolute expiry. Its *raw* form is
//! stored on the Session/Visit record it is bound to; its *sealed* form is
//! rendered into the page. Verification demands three independent things: the
//! envelope opens, the opened payload equals the stored raw form
//! byte-for-byte, and the embedded deadline has not passed. The byte
//! comparison re-validates that the MAC-verified content matches what this
//! particular record stored, so a valid token minted for record A can never
//! be replayed against record B.

use crate::{
    envelope::Sealer,
    error::{Error, Result},
    payload, random, NONCE_LEN,
};
use std::time::Duration;
use subtle::ConstantTimeEq;

/// A freshly issued CSRF challenge
///
/// The caller stores [`raw`](Self::raw) on the bound record and hands
/// [`token`](Self::token) to the client. Neither is valid without the other.
#[derive(Clone)]
pub struct Challenge {
    raw: String,
    token: String,
}

impl Challenge {
    /// Issue a challenge expiring `ttl` from now
    ///
    /// # Errors
    ///
    /// The OS RNG failed while drawing the nonce or the IV.
    pub fn issue(sealer: &Sealer, ttl: Duration) -> Result<Self> {
        let nonce = random::alphanumeric(NONCE_LEN)?;
        let raw = payload::join(&nonce, payload::deadline(ttl));
        let token = sealer.seal(raw.as_bytes())?;

        Ok(Self { raw, token })
    }

    /// The unencoded form to store on the bound record
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The sealed form to embed in the rendered form
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Verify a submitted token against the raw form stored on the record
    ///
    /// Checks run in order: non-empty inputs, envelope opens, byte-for-byte
    /// equality with `expected_raw` (constant-time), embedded deadline still
    /// in the future. All must pass.
    ///
    /// # Errors
    ///
    /// - [`Error::StateMismatch`]: no outstanding challenge on the record, or
    ///   the token was minted for a different record
    /// - [`Error::Malformed`] / [`Error::InvalidCredential`]: the envelope
    ///   does not open
    /// - [`Error::Expired`]: the challenge outlived its deadline
    pub fn verify(sealer: &Sealer, submitted: &str, expected_raw: &str) -> Result<()> {
        if submitted.is_empty() || expected_raw.is_empty() {
            return Err(Error::StateMismatch);
        }

        let opened = sealer.open(submitted)?;
        if !bool::from(opened.as_slice().ct_eq(expected_raw.as_bytes())) {
            return Err(Error::StateMismatch);
        }

        let opened = String::from_utf8(opened).map_err(|_| Error::Malformed)?;
        let (_nonce, expires_at) = payload::split(&opened)?;
        if expires_at <= payload::unix_now() {
            return Err(Error::Expired);
        }

        Ok(())
    }
}
