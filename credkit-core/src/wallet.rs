//! The wallet boundary: a capability the host environment may or may not
//! provide.
//!
//! A wallet supplies the account list (possibly after prompting the user)
//! and a stream of account-change notifications. Hosts without a wallet
//! simply have no [`Wallet`] to hand to [`crate::Session::connect`], which
//! leaves the application permanently not ready.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::CredKitError;

/// A signing identity provider in the host environment.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Requests the current account list. May prompt the user. The first
    /// entry is the active account.
    ///
    /// # Errors
    ///
    /// Returns a connectivity error if the account list cannot be
    /// obtained; this is terminal for the session.
    async fn request_accounts(&self) -> Result<Vec<Address>, CredKitError>;

    /// Subscribes to account-change notifications. Each message carries
    /// the wallet's new account list.
    fn subscribe(&self) -> broadcast::Receiver<Vec<Address>>;
}

/// A wallet over a fixed set of locally known addresses.
///
/// This is the wallet shape the CLI uses (one local signer, no prompt);
/// multi-account hosts can feed it a longer list and switch it at will.
pub struct SignerWallet {
    accounts: std::sync::RwLock<Vec<Address>>,
    changes: broadcast::Sender<Vec<Address>>,
}

impl SignerWallet {
    /// Capacity of the account-change channel. Changes are rare; a small
    /// buffer only has to absorb bursts while the session task catches up.
    const CHANGE_BUFFER: usize = 16;

    /// Creates a wallet holding exactly the signer's address.
    #[must_use]
    pub fn new(signer: &PrivateKeySigner) -> Self {
        Self::from_addresses(vec![signer.address()])
    }

    /// Creates a wallet from an explicit account list. The first entry is
    /// the active account.
    #[must_use]
    pub fn from_addresses(accounts: Vec<Address>) -> Self {
        let (changes, _) = broadcast::channel(Self::CHANGE_BUFFER);
        Self {
            accounts: std::sync::RwLock::new(accounts),
            changes,
        }
    }

    /// Replaces the account list and notifies subscribers, mirroring a
    /// host wallet's account switch.
    pub fn switch_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.write().expect("account list lock poisoned") = accounts.clone();
        // Nobody listening is fine; the session may already be gone.
        let _ = self.changes.send(accounts);
    }
}

#[async_trait]
impl Wallet for SignerWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, CredKitError> {
        Ok(self
            .accounts
            .read()
            .expect("account list lock poisoned")
            .clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<Vec<Address>> {
        self.changes.subscribe()
    }
}
