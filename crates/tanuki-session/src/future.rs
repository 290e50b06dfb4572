use crate::{
    handle::SlotHandle, policy::CookiePolicy, SESSION_COOKIE_NAME, VISIT_COOKIE_NAME,
};
use cookie::{Cookie, Expiration, SameSite};
use http::{header, HeaderValue, Response};
use pin_project_lite::pin_project;
use std::{
    future::Future,
    pin::Pin,
    task::{self, ready, Poll},
};

pin_project! {
    pub struct ResponseFuture<F> {
        #[pin]
        pub(crate) inner: F,
        pub(crate) handle: SlotHandle,
    }
}

/// Attributes every slot cookie carries, no matter which identifier type is
/// inside: `HttpOnly`, `Secure`, `SameSite=Strict`, `Path=/`
fn slot_cookie(name: &'static str, value: String, policy: &CookiePolicy) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/");

    if let Some(ref domain) = policy.domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

impl<F, E, ResBody> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        let mut response = ready!(this.inner.poll(cx))?;

        let guard = this.handle.inner.lock().unwrap();
        let policy = &this.handle.policy;

        if let Some(ref sealed) = guard.set_session {
            // Browser-session cookie; the authoritative deadline is sealed
            // inside the value.
            let mut cookie = slot_cookie(SESSION_COOKIE_NAME, sealed.clone(), policy);
            cookie.set_expires(Expiration::Session);

            let header_value =
                HeaderValue::from_str(&cookie.encoded().to_string()).unwrap();
            response
                .headers_mut()
                .append(header::SET_COOKIE, header_value);
        }

        if let Some(ref sealed) = guard.set_visit {
            let mut cookie = slot_cookie(VISIT_COOKIE_NAME, sealed.clone(), policy);
            cookie.set_max_age(
                cookie::time::Duration::try_from(policy.visit_ttl)
                    .unwrap_or(cookie::time::Duration::MAX),
            );

            let header_value =
                HeaderValue::from_str(&cookie.encoded().to_string()).unwrap();
            response
                .headers_mut()
                .append(header::SET_COOKIE, header_value);
        }

        Poll::Ready(Ok(response))
    }
}
