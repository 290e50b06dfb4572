//! Plaintext payload layout shared by cookies and challenges:
//! `value || '|' || unix-expiry-seconds`
//!
//! Identifiers are UUIDs and nonces are alphanumeric, so the delimiter cannot
//! occur inside `value` by construction.

use crate::error::{Error, Result};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const DELIMITER: char = '|';

/// Join a value with its absolute deadline
pub(crate) fn join(value: &str, expires_at: i64) -> String {
    format!("{value}{DELIMITER}{expires_at}")
}

/// Split a payload into its value and deadline
///
/// Splits on the *last* delimiter so the expiry is unambiguous even if a
/// future payload type ever carries one inside its value.
pub(crate) fn split(joined: &str) -> Result<(&str, i64)> {
    let (value, expiry) = joined.rsplit_once(DELIMITER).ok_or(Error::Malformed)?;
    let expires_at = expiry.parse().map_err(|_| Error::Malformed)?;
    Ok((value, expires_at))
}

/// Absolute deadline `ttl` from now, as unix seconds
pub(crate) fn deadline(ttl: Duration) -> i64 {
    unix_now().saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{join, split};
    use crate::error::Error;

    #[test]
    fn round_trip() {
        let joined = join("some-uuid", 1_700_000_000);
        let (value, expires_at) = split(&joined).unwrap();
        assert_eq!(value, "some-uuid");
        assert_eq!(expires_at, 1_700_000_000);
    }

    #[test]
    fn splits_on_last_delimiter() {
        let (value, expires_at) = split("a|b|42").unwrap();
        assert_eq!(value, "a|b");
        assert_eq!(expires_at, 42);
    }

    #[test]
    fn rejects_missing_delimiter() {
        assert!(matches!(split("no-delimiter"), Err(Error::Malformed)));
    }

    #[test]
    fn rejects_unparsable_expiry() {
        assert!(matches!(split("value|soon"), Err(Error::Malformed)));
    }
}
