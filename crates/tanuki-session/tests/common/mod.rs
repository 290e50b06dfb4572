#![allow(dead_code)]

use async_trait::async_trait;
use http::StatusCode;
use iso8601_timestamp::Timestamp;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tanuki_session::{Error, RecordStore, Session, Visit};

/// In-memory stand-in for the user service; clones share the same records
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: Mutex<HashMap<String, Session>>,
    visits: Mutex<HashMap<String, Visit>>,
}

impl MemoryStore {
    pub fn add_session(&self, uuid: &str) -> Session {
        let session = Session {
            id: 1,
            uuid: uuid.to_owned(),
            user_name: "mallory".to_owned(),
            user_id: 1,
            state: String::new(),
            created_at: Timestamp::now_utc(),
        };

        self.inner
            .sessions
            .lock()
            .unwrap()
            .insert(uuid.to_owned(), session.clone());

        session
    }

    pub fn session(&self, uuid: &str) -> Option<Session> {
        self.inner.sessions.lock().unwrap().get(uuid).cloned()
    }

    pub fn visit(&self, uuid: &str) -> Option<Visit> {
        self.inner.visits.lock().unwrap().get(uuid).cloned()
    }

    pub fn visit_count(&self) -> usize {
        self.inner.visits.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_session(&self, uuid: &str) -> Result<Session, Error> {
        self.session(uuid)
            .ok_or(Error::Upstream(StatusCode::NOT_FOUND))
    }

    async fn persist_session(&self, session: &Session) -> Result<(), Error> {
        self.inner
            .sessions
            .lock()
            .unwrap()
            .insert(session.uuid.clone(), session.clone());
        Ok(())
    }

    async fn create_visit(&self) -> Result<Visit, Error> {
        let visit = Visit {
            id: 1,
            uuid: siegel::alphanumeric(32).unwrap(),
            state: String::new(),
            created_at: Timestamp::now_utc(),
        };

        self.inner
            .visits
            .lock()
            .unwrap()
            .insert(visit.uuid.clone(), visit.clone());

        Ok(visit)
    }

    async fn fetch_visit(&self, uuid: &str) -> Result<Visit, Error> {
        self.visit(uuid)
            .ok_or(Error::Upstream(StatusCode::NOT_FOUND))
    }

    async fn persist_visit(&self, visit: &Visit) -> Result<(), Error> {
        self.inner
            .visits
            .lock()
            .unwrap()
            .insert(visit.uuid.clone(), visit.clone());
        Ok(())
    }
}
