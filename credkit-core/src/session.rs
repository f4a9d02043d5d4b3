//! The session context: active account, bound ledger handle and the
//! scoped wallet subscription.
//!
//! A session is created once at startup and is never partially valid: if
//! the wallet cannot supply an account, no session exists and the
//! application stays not ready. The active account is the only shared
//! mutable state in the system; it is replaced (never mutated in place)
//! on each account-change notification, so in-flight operations keep the
//! value they captured at submission time.

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::CredKitError;
use crate::ledger::Ledger;
use crate::wallet::Wallet;

/// Scoped handle on the wallet's account-change subscription. Dropping it
/// releases the subscription; the session owns one for its whole life.
#[derive(Debug)]
pub struct AccountSubscription(JoinHandle<()>);

impl Drop for AccountSubscription {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A connected session: the active account, the bound gateway and the
/// account-change subscription.
pub struct Session {
    ledger: Arc<dyn Ledger>,
    account_rx: watch::Receiver<Address>,
    _subscription: AccountSubscription,
}

impl Session {
    /// Connects a session: requests the account list from the wallet
    /// (which may prompt the user), takes the first entry as the active
    /// account, binds the gateway and subscribes to account changes.
    ///
    /// There is no retry: a failure here leaves the application not
    /// ready until the caller reconnects with a working wallet.
    ///
    /// # Errors
    ///
    /// Returns [`CredKitError::Connectivity`] if the wallet yields no
    /// accounts, or whatever connectivity error the wallet itself raises.
    pub async fn connect(
        wallet: Arc<dyn Wallet>,
        ledger: Arc<dyn Ledger>,
    ) -> Result<Self, CredKitError> {
        let accounts = wallet.request_accounts().await?;
        let active = *accounts
            .first()
            .ok_or_else(|| CredKitError::connectivity("wallet returned no accounts"))?;

        let (account_tx, account_rx) = watch::channel(active);
        let subscription = AccountSubscription(tokio::spawn(forward_account_changes(
            wallet.subscribe(),
            account_tx,
        )));

        debug!(account = %active, "session connected");
        Ok(Self {
            ledger,
            account_rx,
            _subscription: subscription,
        })
    }

    /// The active account at this moment. Callers capture the value once
    /// at the start of an operation; a concurrent account change does not
    /// rebind anything mid-flight.
    #[must_use]
    pub fn account(&self) -> Address {
        *self.account_rx.borrow()
    }

    /// A watch handle on the active account, for consumers that need to
    /// react to switches.
    #[must_use]
    pub fn watch_account(&self) -> watch::Receiver<Address> {
        self.account_rx.clone()
    }

    /// The bound gateway handle.
    #[must_use]
    pub fn ledger(&self) -> Arc<dyn Ledger> {
        Arc::clone(&self.ledger)
    }
}

/// Forwards wallet account-change notifications into the session's watch
/// channel, replacing the active account with each new first entry.
async fn forward_account_changes(
    mut changes: broadcast::Receiver<Vec<Address>>,
    account_tx: watch::Sender<Address>,
) {
    loop {
        match changes.recv().await {
            Ok(accounts) => {
                let Some(first) = accounts.first() else {
                    warn!("wallet reported an empty account list; keeping current account");
                    continue;
                };
                debug!(account = %first, "active account replaced");
                if account_tx.send(*first).is_err() {
                    // Session dropped; the subscription is being torn down.
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "account-change notifications lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}
