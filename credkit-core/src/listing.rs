//! The credential list view model: ordered identifier read, concurrent
//! detail resolution, and the refresh signal linking it to the issuance
//! action.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::ledger::Credential;
use crate::session::Session;

/// A monotonically bumped counter requesting credential-list refreshes.
/// The issuance form bumps it; the listing watches it.
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    tx: watch::Sender<u64>,
}

impl RefreshSignal {
    /// Creates a fresh signal.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    /// Requests a refresh.
    pub fn bump(&self) {
        self.tx.send_modify(|n| *n += 1);
    }

    /// A watch handle for consumers.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// The set of credentials owned by the active account, as last
/// successfully read.
///
/// On any read failure the previous entries stay in place: stale data is
/// preferred over a cleared table, and the failure is logged rather than
/// surfaced as a notification.
pub struct CredentialListing {
    session: Arc<Session>,
    entries: Vec<Credential>,
}

impl CredentialListing {
    /// Creates an empty listing bound to `session`.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            entries: Vec::new(),
        }
    }

    /// The entries from the last successful refresh, in the order the
    /// ledger returned their identifiers.
    #[must_use]
    pub fn entries(&self) -> &[Credential] {
        &self.entries
    }

    /// Re-reads the listing for the active account.
    ///
    /// Fetches the ordered identifier sequence, then resolves every
    /// identifier concurrently and pairs each result positionally with
    /// the identifier it originated from; arrival order is irrelevant.
    /// Returns whether the entries were replaced.
    pub async fn refresh(&mut self) -> bool {
        let account = self.session.account();
        let ledger = self.session.ledger();

        let ids = match ledger.credentials_of(account).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(%account, cause = %err, "credential listing read failed; keeping previous entries");
                return false;
            }
        };

        let details =
            join_all(ids.iter().map(|id| ledger.credential_details(*id))).await;

        let mut entries = Vec::with_capacity(ids.len());
        for (id, detail) in ids.iter().zip(details) {
            match detail {
                Ok(credential) => entries.push(credential),
                Err(err) => {
                    warn!(%account, %id, cause = %err, "credential detail read failed; keeping previous entries");
                    return false;
                }
            }
        }

        debug!(%account, count = entries.len(), "credential listing refreshed");
        self.entries = entries;
        true
    }

    /// Serves signal-driven refreshes until the signal sender is dropped.
    pub async fn follow(&mut self, mut signal: watch::Receiver<u64>) {
        while signal.changed().await.is_ok() {
            self.refresh().await;
        }
    }
}
