use std::time::Duration;
use typed_builder::TypedBuilder;

/// TTL and attribute policy for the two cookie slots and the CSRF challenges
///
/// The transport `Max-Age` on the visit slot and the expiry embedded in the
/// sealed payload can drift; the embedded one is authoritative, the
/// transport one is a hint to well-behaved browsers.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CookiePolicy {
    /// Lifetime of an authenticated session cookie
    #[builder(default = Duration::from_secs(60 * 60 * 8))]
    pub session_ttl: Duration,

    /// Lifetime of an anonymous visit cookie
    #[builder(default = Duration::from_secs(60 * 60 * 24 * 365))]
    pub visit_ttl: Duration,

    /// Lifetime of an outstanding CSRF challenge
    #[builder(default = Duration::from_secs(60 * 20))]
    pub state_ttl: Duration,

    /// `Domain` attribute for both slots, if any
    #[builder(default, setter(strip_option, into))]
    pub domain: Option<String>,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}
