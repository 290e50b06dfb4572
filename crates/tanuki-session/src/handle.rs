use crate::{
    error::{Error, Result},
    policy::CookiePolicy,
};
use siegel::Sealer;
use std::sync::Mutex;
use triomphe::Arc;

pub(crate) struct Shared {
    pub(crate) read_session: Option<String>,
    pub(crate) read_visit: Option<String>,
    pub(crate) set_session: Option<String>,
    pub(crate) set_visit: Option<String>,
}

/// Per-request view of the two cookie slots
///
/// Inserted into the request extensions by [`SlotService`]. Recover
/// operations unseal whatever the request carried; store operations seal a
/// fresh value and queue a `Set-Cookie` that the response future applies
/// with the mandatory attributes. The two slots are strictly separate.
///
/// [`SlotService`]: crate::SlotService
#[derive(Clone)]
pub struct SlotHandle {
    pub(crate) inner: Arc<Mutex<Shared>>,
    pub(crate) sealer: Sealer,
    pub(crate) policy: CookiePolicy,
}

impl SlotHandle {
    /// Recover the session identifier out of the short-lived slot
    ///
    /// # Errors
    ///
    /// [`Error::MissingCookie`] when the request carried no session cookie,
    /// otherwise any codec rejection (bad MAC, expired, malformed).
    pub fn recover_session(&self) -> Result<String> {
        let value = self
            .inner
            .lock()
            .unwrap()
            .read_session
            .clone()
            .ok_or(Error::MissingCookie)?;

        Ok(siegel::unseal_identifier(&self.sealer, &value)?)
    }

    /// Recover the visit identifier out of the long-lived slot
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SlotHandle::recover_session`].
    pub fn recover_visit(&self) -> Result<String> {
        let value = self
            .inner
            .lock()
            .unwrap()
            .read_visit
            .clone()
            .ok_or(Error::MissingCookie)?;

        Ok(siegel::unseal_identifier(&self.sealer, &value)?)
    }

    /// Seal `identifier` into the session slot and queue the `Set-Cookie`
    ///
    /// # Errors
    ///
    /// The OS RNG failed while sealing.
    pub fn store_session(&self, identifier: &str) -> Result<()> {
        let sealed = siegel::seal_identifier(&self.sealer, identifier, self.policy.session_ttl)?;
        self.inner.lock().unwrap().set_session = Some(sealed);
        Ok(())
    }

    /// Seal `identifier` into the visit slot and queue the `Set-Cookie`
    ///
    /// # Errors
    ///
    /// The OS RNG failed while sealing.
    pub fn store_visit(&self, identifier: &str) -> Result<()> {
        let sealed = siegel::seal_identifier(&self.sealer, identifier, self.policy.visit_ttl)?;
        self.inner.lock().unwrap().set_visit = Some(sealed);
        Ok(())
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use super::SlotHandle;
    use axum_core::extract::FromRequestParts;
    use http::request::Parts;
    use std::convert::Infallible;

    impl<S> FromRequestParts<S> for SlotHandle
    where
        S: Sync,
    {
        type Rejection = Infallible;

        async fn from_request_parts(
            parts: &mut Parts,
            _state: &S,
        ) -> Result<Self, Self::Rejection> {
            let handle = parts
                .extensions
                .get::<Self>()
                .expect("Service not wrapped by cookie-slot middleware")
                .clone();

            Ok(handle)
        }
    }
}
