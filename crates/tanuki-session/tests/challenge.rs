use siegel::KeyMaterial;
use std::time::Duration;
use tanuki_session::{CookiePolicy, Error, RecordBinding, RecordStore};

mod common;

use self::common::MemoryStore;

fn binding(store: &MemoryStore, policy: CookiePolicy) -> RecordBinding<MemoryStore> {
    RecordBinding::new(store.clone(), KeyMaterial::generate().unwrap(), policy)
}

#[tokio::test]
async fn consume_once_then_reject_replay() {
    let store = MemoryStore::default();
    let mut session = store.add_session("v1");
    let binding = binding(&store, CookiePolicy::default());

    let token = binding.issue_session_challenge(&mut session).await.unwrap();
    assert!(session.is_challenged());
    assert!(store.session("v1").unwrap().is_challenged());

    binding
        .consume_session_challenge(&mut session, &token)
        .await
        .unwrap();
    assert_eq!(session.state, "");

    // The cleared state is persisted before consume returns, not just local.
    assert!(!store.session("v1").unwrap().is_challenged());

    let replay = binding
        .consume_session_challenge(&mut session, &token)
        .await
        .unwrap_err();
    assert!(matches!(
        replay,
        Error::Credential(siegel::Error::StateMismatch)
    ));
}

#[tokio::test]
async fn token_is_not_transferable_across_records() {
    let store = MemoryStore::default();
    let mut ours = store.add_session("record-a");
    let mut theirs = store.add_session("record-b");
    let binding = binding(&store, CookiePolicy::default());

    let our_token = binding.issue_session_challenge(&mut ours).await.unwrap();
    let _their_token = binding.issue_session_challenge(&mut theirs).await.unwrap();

    // Both records are in the challenged state; a MAC-valid, unexpired token
    // minted for one must still fail against the other.
    let error = binding
        .consume_session_challenge(&mut theirs, &our_token)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Credential(siegel::Error::StateMismatch)
    ));
    assert!(theirs.is_challenged());
    assert!(store.session("record-b").unwrap().is_challenged());
}

#[tokio::test]
async fn failed_consume_leaves_challenge_intact() {
    let store = MemoryStore::default();
    let mut session = store.add_session("v1");
    let binding = binding(&store, CookiePolicy::default());

    let token = binding.issue_session_challenge(&mut session).await.unwrap();

    let garbage = binding
        .consume_session_challenge(&mut session, "definitely-not-a-token")
        .await
        .unwrap_err();
    assert!(matches!(garbage, Error::Credential(_)));
    assert!(session.is_challenged());

    // A client that fat-fingered one submission can still complete the flow.
    binding
        .consume_session_challenge(&mut session, &token)
        .await
        .unwrap();
}

#[tokio::test]
async fn reissue_invalidates_previous_token() {
    let store = MemoryStore::default();
    let mut session = store.add_session("v1");
    let binding = binding(&store, CookiePolicy::default());

    let first = binding.issue_session_challenge(&mut session).await.unwrap();
    let second = binding.issue_session_challenge(&mut session).await.unwrap();

    let error = binding
        .consume_session_challenge(&mut session, &first)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Credential(siegel::Error::StateMismatch)
    ));

    binding
        .consume_session_challenge(&mut session, &second)
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_challenge_is_rejected() {
    let store = MemoryStore::default();
    let mut session = store.add_session("v1");
    let policy = CookiePolicy::builder().state_ttl(Duration::ZERO).build();
    let binding = binding(&store, policy);

    let token = binding.issue_session_challenge(&mut session).await.unwrap();

    let error = binding
        .consume_session_challenge(&mut session, &token)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Credential(siegel::Error::Expired)));
    assert!(session.is_challenged());
}

#[tokio::test]
async fn visit_challenges_work_the_same_way() {
    let store = MemoryStore::default();
    let binding = binding(&store, CookiePolicy::default());

    let mut visit = store.create_visit().await.unwrap();

    let token = binding.issue_visit_challenge(&mut visit).await.unwrap();
    assert!(store.visit(&visit.uuid).unwrap().is_challenged());

    binding
        .consume_visit_challenge(&mut visit, &token)
        .await
        .unwrap();
    assert_eq!(visit.state, "");
    assert!(!store.visit(&visit.uuid).unwrap().is_challenged());
}

#[tokio::test]
async fn restart_invalidates_outstanding_tokens() {
    let store = MemoryStore::default();
    let mut session = store.add_session("v1");

    let before = binding(&store, CookiePolicy::default());
    let token = before.issue_session_challenge(&mut session).await.unwrap();

    // Same store, fresh key material: the restarted process.
    let after = binding(&store, CookiePolicy::default());
    let error = after
        .consume_session_challenge(&mut session, &token)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Credential(siegel::Error::InvalidCredential)
    ));
}
