use crate::{
    future::ResponseFuture,
    handle::{Shared, SlotHandle},
    policy::CookiePolicy,
    SESSION_COOKIE_NAME, VISIT_COOKIE_NAME,
};
use cookie::Cookie;
use http::{header, Request, Response};
use siegel::Sealer;
use std::{
    sync::Mutex,
    task::{self, Poll},
};
use tower::Service;
use triomphe::Arc;

/// Middleware that materializes the two cookie slots for every request
#[derive(Clone)]
pub struct SlotService<S> {
    inner: S,
    sealer: Sealer,
    policy: CookiePolicy,
}

impl<S> SlotService<S> {
    pub fn new(inner: S, sealer: Sealer, policy: CookiePolicy) -> Self {
        Self {
            inner,
            sealer,
            policy,
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SlotService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let mut read_session = None;
        let mut read_visit = None;

        for header in req.headers().get_all(header::COOKIE) {
            let Ok(value_str) = header.to_str() else {
                continue;
            };

            for cookie in Cookie::split_parse_encoded(value_str) {
                let Ok(cookie) = cookie else {
                    continue;
                };

                match cookie.name() {
                    SESSION_COOKIE_NAME => {
                        read_session = Some(cookie.value_trimmed().to_owned());
                    }
                    VISIT_COOKIE_NAME => {
                        read_visit = Some(cookie.value_trimmed().to_owned());
                    }
                    _ => {}
                }
            }
        }

        let handle = SlotHandle {
            inner: Arc::new(Mutex::new(Shared {
                read_session,
                read_visit,
                set_session: None,
                set_visit: None,
            })),
            sealer: self.sealer.clone(),
            policy: self.policy.clone(),
        };

        req.extensions_mut().insert(handle.clone());

        ResponseFuture {
            inner: self.inner.call(req),
            handle,
        }
    }
}
