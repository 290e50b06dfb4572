use crate::{
    client::RecordStore,
    error::Result,
    handle::SlotHandle,
    policy::CookiePolicy,
    record::{Session, Visit},
};
use siegel::{Challenge, KeyMaterial, Sealer};

/// Resolves cookie slots to remote records and drives the challenge cycle
///
/// All operations are pure over the injected key material plus the remote
/// record they touch. The record read-modify-write in issue/consume is not
/// transactionally isolated: two requests racing to consume the same
/// challenge can both observe it outstanding before either clears it. The
/// collaborator contract has no compare-and-swap, so that narrow window is
/// accepted.
pub struct RecordBinding<S> {
    store: S,
    sealer: Sealer,
    policy: CookiePolicy,
}

impl<S> RecordBinding<S>
where
    S: RecordStore,
{
    pub fn new(store: S, keys: KeyMaterial, policy: CookiePolicy) -> Self {
        Self {
            store,
            sealer: Sealer::new(keys),
            policy,
        }
    }

    /// Resolve the session slot to its record
    ///
    /// # Errors
    ///
    /// Credential failure when the slot is empty or does not unseal;
    /// upstream failure when the record store misbehaves. Either way the
    /// request is not authenticated.
    pub async fn session_for(&self, handle: &SlotHandle) -> Result<Session> {
        let uuid = handle.recover_session()?;
        self.store.fetch_session(&uuid).await
    }

    /// Resolve the visit slot to its record, minting a fresh visit when the
    /// slot is empty, stale, or unresolvable
    ///
    /// # Errors
    ///
    /// Only when minting the replacement visit itself fails.
    pub async fn visit_for(&self, handle: &SlotHandle) -> Result<Visit> {
        match self.resolve_visit(handle).await {
            Ok(visit) => Ok(visit),
            Err(error) => {
                warn!(%error, "minting a fresh visit");

                let visit = self.store.create_visit().await?;
                handle.store_visit(&visit.uuid)?;
                Ok(visit)
            }
        }
    }

    async fn resolve_visit(&self, handle: &SlotHandle) -> Result<Visit> {
        let uuid = handle.recover_visit()?;
        self.store.fetch_visit(&uuid).await
    }

    /// Issue a CSRF challenge bound to `session`
    ///
    /// Overwrites any outstanding challenge; only the newest token is valid.
    /// Returns the sealed token to embed in the rendered form.
    ///
    /// # Errors
    ///
    /// RNG failure while sealing, or the record store refusing the persist.
    pub async fn issue_session_challenge(&self, session: &mut Session) -> Result<String> {
        let challenge = Challenge::issue(&self.sealer, self.policy.state_ttl)?;
        session.state = challenge.raw().to_owned();
        self.store.persist_session(session).await?;

        Ok(challenge.token().to_owned())
    }

    /// Issue a CSRF challenge bound to `visit`
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RecordBinding::issue_session_challenge`].
    pub async fn issue_visit_challenge(&self, visit: &mut Visit) -> Result<String> {
        let challenge = Challenge::issue(&self.sealer, self.policy.state_ttl)?;
        visit.state = challenge.raw().to_owned();
        self.store.persist_visit(visit).await?;

        Ok(challenge.token().to_owned())
    }

    /// Verify and consume the challenge outstanding on `session`
    ///
    /// On success the state is cleared and persisted before this returns, so
    /// the token can never verify twice. On failure the outstanding
    /// challenge is left untouched and the caller must reject the action.
    ///
    /// # Errors
    ///
    /// Any of the three challenge checks failing, or the record store
    /// refusing the persist.
    pub async fn consume_session_challenge(
        &self,
        session: &mut Session,
        submitted: &str,
    ) -> Result<()> {
        Challenge::verify(&self.sealer, submitted, &session.state)?;

        session.state.clear();
        self.store.persist_session(session).await
    }

    /// Verify and consume the challenge outstanding on `visit`
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RecordBinding::consume_session_challenge`].
    pub async fn consume_visit_challenge(
        &self,
        visit: &mut Visit,
        submitted: &str,
    ) -> Result<()> {
        Challenge::verify(&self.sealer, submitted, &visit.state)?;

        visit.state.clear();
        self.store.persist_visit(visit).await
    }
}
