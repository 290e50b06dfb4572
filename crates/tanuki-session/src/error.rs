use http::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T, E = self::Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Any codec-level rejection: malformed, bad MAC, expired, state mismatch
    #[error(transparent)]
    Credential(#[from] siegel::Error),

    /// The request carried nothing in the cookie slot
    #[error("cookie slot is empty")]
    MissingCookie,

    /// The record store answered with a non-success status
    #[error("record store responded with {0}")]
    Upstream(StatusCode),

    /// Building the request failed
    #[error(transparent)]
    Http(#[from] http::Error),

    /// Transport-level failure talking to the record store, including timeout
    #[error("record store request failed: {0}")]
    Client(#[source] BoxError),

    /// The record store sent a body we could not (de)serialize
    #[error(transparent)]
    Json(#[from] sonic_rs::Error),
}

impl Error {
    /// The externally visible outcome
    ///
    /// Every credential-shaped failure collapses to a single `401`; which
    /// check failed is logged internally, never leaked to the client. Store
    /// and serialization failures are the upstream's fault, RNG failure is
    /// ours; both fail the request without killing the process.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Credential(siegel::Error::RandomSource(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Credential(_) | Self::MissingCookie => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) | Self::Http(_) | Self::Client(_) | Self::Json(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use http::StatusCode;

    #[test]
    fn credential_failures_collapse_to_unauthorized() {
        let kinds = [
            Error::Credential(siegel::Error::Malformed),
            Error::Credential(siegel::Error::InvalidCredential),
            Error::Credential(siegel::Error::Expired),
            Error::Credential(siegel::Error::StateMismatch),
            Error::MissingCookie,
        ];

        for error in kinds {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let error = Error::Upstream(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }
}
