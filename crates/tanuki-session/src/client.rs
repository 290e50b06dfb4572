use crate::{
    error::{Error, Result},
    record::{Session, Visit},
};
use async_trait::async_trait;
use bytes::Bytes;
use http::{header::CONTENT_TYPE, Method, Request};
use http_body_util::{BodyExt, Full};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HyperClient},
    rt::TokioExecutor,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Default bound on every record store round-trip; timeouts fail closed
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The remote Session/Visit record store
///
/// The slots route to distinct endpoints by construction; a visit identifier
/// can never resolve through the session calls or vice versa.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Resolve a session identifier to its record
    async fn fetch_session(&self, uuid: &str) -> Result<Session>;

    /// Write a session record back
    async fn persist_session(&self, session: &Session) -> Result<()>;

    /// Mint a brand-new visit record
    async fn create_visit(&self) -> Result<Visit>;

    /// Resolve a visit identifier to its record
    async fn fetch_visit(&self, uuid: &str) -> Result<Visit>;

    /// Write a visit record back
    async fn persist_visit(&self, visit: &Visit) -> Result<()>;
}

/// Identifier-only request body for the `check-*` endpoints
#[derive(Serialize)]
struct Lookup<'a> {
    uuid: &'a str,
}

/// HTTP/JSON implementation of [`RecordStore`] against the user service
#[derive(Clone, TypedBuilder)]
pub struct HttpRecordStore {
    /// Authority of the user service, e.g. `localhost:8081`
    #[builder(setter(into))]
    authority: String,

    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    timeout: Duration,

    #[builder(default = HyperClient::builder(TokioExecutor::new()).build_http())]
    client: HyperClient<HttpConnector, Full<Bytes>>,
}

impl HttpRecordStore {
    fn endpoint(&self, path: &str) -> String {
        format!("http://{}{path}", self.authority)
    }

    fn get(&self, path: &str) -> Result<Request<Full<Bytes>>> {
        Request::builder()
            .method(Method::GET)
            .uri(self.endpoint(path))
            .body(Full::default())
            .map_err(Error::from)
    }

    fn post_json<B>(&self, path: &str, body: &B) -> Result<Request<Full<Bytes>>>
    where
        B: Serialize,
    {
        let payload = sonic_rs::to_vec(body)?;

        Request::builder()
            .method(Method::POST)
            .uri(self.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(payload)))
            .map_err(Error::from)
    }

    /// Execute a request and check the status; non-success and timeout both
    /// fail closed
    async fn execute(&self, req: Request<Full<Bytes>>) -> Result<Bytes> {
        let response = tokio::time::timeout(self.timeout, self.client.request(req))
            .await
            .map_err(|elapsed| Error::Client(elapsed.into()))?
            .map_err(|error| Error::Client(error.into()))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(response.status()));
        }

        Ok(response
            .into_body()
            .collect()
            .await
            .map_err(|error| Error::Client(error.into()))?
            .to_bytes())
    }

    async fn execute_json<T>(&self, req: Request<Full<Bytes>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.execute(req).await?;
        Ok(sonic_rs::from_slice(&bytes)?)
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_session(&self, uuid: &str) -> Result<Session> {
        let req = self.post_json("/check-session", &Lookup { uuid })?;
        self.execute_json(req).await
    }

    async fn persist_session(&self, session: &Session) -> Result<()> {
        let req = self.post_json("/update-session", session)?;
        self.execute(req).await.map(drop)
    }

    async fn create_visit(&self) -> Result<Visit> {
        let req = self.get("/create-visit")?;
        self.execute_json(req).await
    }

    async fn fetch_visit(&self, uuid: &str) -> Result<Visit> {
        let req = self.post_json("/check-visit", &Lookup { uuid })?;
        self.execute_json(req).await
    }

    async fn persist_visit(&self, visit: &Visit) -> Result<()> {
        let req = self.post_json("/update-visit", visit)?;
        self.execute(req).await.map(drop)
    }
}
