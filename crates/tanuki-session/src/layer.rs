use crate::{policy::CookiePolicy, service::SlotService};
use siegel::{KeyMaterial, Sealer};
use tower::Layer;

/// Layer wrapping a service with the cookie-slot middleware
///
/// Clone the same [`KeyMaterial`] into this layer and into the
/// [`RecordBinding`]; cookies sealed by one must open under the other.
///
/// [`RecordBinding`]: crate::RecordBinding
#[derive(Clone)]
pub struct SlotLayer {
    sealer: Sealer,
    policy: CookiePolicy,
}

impl SlotLayer {
    #[must_use]
    pub fn new(keys: KeyMaterial, policy: CookiePolicy) -> Self {
        Self {
            sealer: Sealer::new(keys),
            policy,
        }
    }
}

impl<S> Layer<S> for SlotLayer {
    type Service = SlotService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SlotService::new(inner, self.sealer.clone(), self.policy.clone())
    }
}
