use crate::error::Result;
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of both symmetric keys, in bytes (AES-256 strength)
pub const KEY_LEN: usize = 32;

/// Process-lifetime symmetric secrets
///
/// Generated once at startup and injected into every [`Sealer`]. The keys are
/// never persisted, so a restart invalidates every cookie and challenge
/// sealed before it. That is the intended rotation mechanism.
///
/// [`Sealer`]: crate::Sealer
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    pub(crate) cipher_key: [u8; KEY_LEN],
    pub(crate) mac_key: [u8; KEY_LEN],
}

impl KeyMaterial {
    /// Draw fresh cipher and MAC keys from the operating system RNG
    ///
    /// # Errors
    ///
    /// The OS RNG failed. Treat this as fatal; the process must not serve
    /// requests without key material.
    pub fn generate() -> Result<Self> {
        let mut cipher_key = [0_u8; KEY_LEN];
        OsRng.try_fill_bytes(&mut cipher_key)?;

        let mut mac_key = [0_u8; KEY_LEN];
        OsRng.try_fill_bytes(&mut mac_key)?;

        Ok(Self {
            cipher_key,
            mac_key,
        })
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("cipher_key", &"[REDACTED]")
            .field("mac_key", &"[REDACTED]")
            .finish()
    }
}
