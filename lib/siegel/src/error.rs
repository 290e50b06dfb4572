use thiserror::Error;

pub type Result<T, E = self::Error> = std::result::Result<T, E>;

/// Codec failure taxonomy
///
/// The variants are distinguishable on purpose so callers can log precisely,
/// but every credential-shaped variant must collapse to the same externally
/// visible outcome. That collapse happens at the HTTP boundary, not here.
#[derive(Debug, Error)]
pub enum Error {
    /// Structurally invalid input: bad base64, truncated envelope,
    /// missing delimiter, unparsable expiry
    #[error("malformed credential")]
    Malformed,

    /// The envelope is well-formed but the MAC does not verify
    #[error("credential failed verification")]
    InvalidCredential,

    /// MAC-valid payload whose embedded deadline has passed
    #[error("credential expired")]
    Expired,

    /// MAC-valid token that does not match the outstanding challenge
    #[error("token does not match the outstanding challenge")]
    StateMismatch,

    /// The operating system RNG failed; partial output is never used
    #[error("random source failure")]
    RandomSource(#[from] rand::Error),
}
