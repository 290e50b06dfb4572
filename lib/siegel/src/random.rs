use crate::error::Result;
use rand::{rngs::OsRng, RngCore};

/// 62-character alphanumeric alphabet every random string is drawn from
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Largest multiple of the alphabet size representable in a byte. Bytes at or
/// above this are rejected so the mapping stays uniform (no modulo bias).
const REJECT_AT: u8 = (u8::MAX / ALPHABET.len() as u8) * ALPHABET.len() as u8;

/// Generate `length` characters drawn uniformly from the alphanumeric alphabet
///
/// Sampling is rejection-based over OS RNG bytes; every character is uniform
/// over the full alphabet.
///
/// # Errors
///
/// The OS RNG failed. The whole draw is aborted; partial output is never
/// returned.
pub fn alphanumeric(length: usize) -> Result<String> {
    let mut out = String::with_capacity(length);
    let mut buf = [0_u8; 64];

    while out.len() < length {
        OsRng.try_fill_bytes(&mut buf)?;

        for byte in buf {
            if byte >= REJECT_AT {
                continue;
            }

            out.push(char::from(ALPHABET[usize::from(byte) % ALPHABET.len()]));
            if out.len() == length {
                break;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{alphanumeric, ALPHABET};

    #[test]
    fn exact_length() {
        for length in [0, 1, 31, 32, 100] {
            assert_eq!(alphanumeric(length).unwrap().len(), length);
        }
    }

    #[test]
    fn stays_inside_alphabet() {
        let value = alphanumeric(4096).unwrap();
        assert!(value.bytes().all(|byte| ALPHABET.contains(&byte)));
    }

    #[test]
    fn not_constant() {
        assert_ne!(alphanumeric(32).unwrap(), alphanumeric(32).unwrap());
    }
}
