#![allow(dead_code, reason = "each integration test binary uses a subset")]

//! Common test doubles shared across integration tests: a scriptable
//! in-memory ledger and wallet variants for the connectivity cases.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use credkit_core::{Credential, CredKitError, CredentialId, Ledger, Wallet};
use tokio::sync::{broadcast, Semaphore};

/// Every request the mock ledger has received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    Register {
        from: Address,
        name: String,
        metadata_uri: String,
    },
    Issue {
        from: Address,
        student: Address,
        details_uri: String,
        transferable: bool,
    },
    Verify {
        from: Address,
        credential_id: CredentialId,
    },
    Transfer {
        from: Address,
        credential_id: CredentialId,
        new_owner: Address,
    },
    CredentialsOf {
        student: Address,
    },
    DetailsOf {
        credential_id: CredentialId,
    },
}

/// An in-memory stand-in for the registry contract.
///
/// Writes optionally park on a semaphore so tests can hold an operation
/// in flight; reads resolve from scripted state with optional per-id
/// delays to control arrival order.
pub struct MockLedger {
    pub calls: Mutex<Vec<LedgerCall>>,
    credentials: Mutex<HashMap<Address, Vec<CredentialId>>>,
    details: Mutex<HashMap<CredentialId, Credential>>,
    detail_delays: Mutex<HashMap<CredentialId, Duration>>,
    next_id: AtomicUsize,
    gate: Semaphore,
    gated: AtomicBool,
    fail_writes: AtomicBool,
    fail_listing: AtomicBool,
    fail_details: AtomicBool,
    in_flight_writes: AtomicUsize,
    pub max_in_flight_writes: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            credentials: Mutex::new(HashMap::new()),
            details: Mutex::new(HashMap::new()),
            detail_delays: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
            gate: Semaphore::new(0),
            gated: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_listing: AtomicBool::new(false),
            fail_details: AtomicBool::new(false),
            in_flight_writes: AtomicUsize::new(0),
            max_in_flight_writes: AtomicUsize::new(0),
        }
    }

    /// Makes every write park until [`Self::release_writes`] grants it a
    /// permit.
    pub fn hold_writes(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    /// Lets exactly `n` parked (or future) writes proceed.
    pub fn release_writes(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_details(&self, fail: bool) {
        self.fail_details.store(fail, Ordering::SeqCst);
    }

    /// Seeds one credential record and appends its id to the owner's
    /// listing, returning the id.
    pub fn seed_credential(
        &self,
        owner: Address,
        issued_by: Address,
        details_uri: &str,
        verified: bool,
        transferable: bool,
    ) -> CredentialId {
        let id = U256::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.seed_credential_with_id(id, owner, issued_by, details_uri, verified, transferable);
        id
    }

    /// Seeds one credential record under a caller-chosen id.
    pub fn seed_credential_with_id(
        &self,
        id: CredentialId,
        owner: Address,
        issued_by: Address,
        details_uri: &str,
        verified: bool,
        transferable: bool,
    ) {
        self.credentials
            .lock()
            .unwrap()
            .entry(owner)
            .or_default()
            .push(id);
        self.details.lock().unwrap().insert(
            id,
            Credential {
                id,
                issued_to: owner,
                issued_by,
                details_uri: details_uri.to_owned(),
                verified,
                transferable,
            },
        );
    }

    /// Delays the detail read for `id`, to script arrival order.
    pub fn delay_detail(&self, id: CredentialId, delay: Duration) {
        self.detail_delays.lock().unwrap().insert(id, delay);
    }

    pub fn write_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| {
                !matches!(
                    call,
                    LedgerCall::CredentialsOf { .. } | LedgerCall::DetailsOf { .. }
                )
            })
            .count()
    }

    async fn write(&self, call: LedgerCall) -> Result<(), CredKitError> {
        self.calls.lock().unwrap().push(call);

        let in_flight = self.in_flight_writes.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight_writes
            .fetch_max(in_flight, Ordering::SeqCst);

        if self.gated.load(Ordering::SeqCst) {
            let permit = self.gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        self.in_flight_writes.fetch_sub(1, Ordering::SeqCst);

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CredKitError::reverted("scripted revert"));
        }
        Ok(())
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn register_institution(
        &self,
        from: Address,
        name: &str,
        metadata_uri: &str,
    ) -> Result<(), CredKitError> {
        self.write(LedgerCall::Register {
            from,
            name: name.to_owned(),
            metadata_uri: metadata_uri.to_owned(),
        })
        .await
    }

    async fn issue_credential(
        &self,
        from: Address,
        student: Address,
        details_uri: &str,
        transferable: bool,
    ) -> Result<(), CredKitError> {
        self.write(LedgerCall::Issue {
            from,
            student,
            details_uri: details_uri.to_owned(),
            transferable,
        })
        .await?;
        // A confirmed issuance lands in the registry's state.
        self.seed_credential(student, from, details_uri, false, transferable);
        Ok(())
    }

    async fn verify_credential(
        &self,
        from: Address,
        credential_id: CredentialId,
    ) -> Result<(), CredKitError> {
        self.write(LedgerCall::Verify {
            from,
            credential_id,
        })
        .await?;
        if let Some(credential) = self.details.lock().unwrap().get_mut(&credential_id) {
            credential.verified = true;
        }
        Ok(())
    }

    async fn transfer_credential(
        &self,
        from: Address,
        credential_id: CredentialId,
        new_owner: Address,
    ) -> Result<(), CredKitError> {
        self.write(LedgerCall::Transfer {
            from,
            credential_id,
            new_owner,
        })
        .await
    }

    async fn credentials_of(
        &self,
        student: Address,
    ) -> Result<Vec<CredentialId>, CredKitError> {
        self.calls
            .lock()
            .unwrap()
            .push(LedgerCall::CredentialsOf { student });
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(CredKitError::network("scripted listing outage"));
        }
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .get(&student)
            .cloned()
            .unwrap_or_default())
    }

    async fn credential_details(
        &self,
        credential_id: CredentialId,
    ) -> Result<Credential, CredKitError> {
        self.calls
            .lock()
            .unwrap()
            .push(LedgerCall::DetailsOf { credential_id });
        let delay = self
            .detail_delays
            .lock()
            .unwrap()
            .get(&credential_id)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_details.load(Ordering::SeqCst) {
            return Err(CredKitError::network("scripted detail outage"));
        }
        self.details
            .lock()
            .unwrap()
            .get(&credential_id)
            .cloned()
            .ok_or_else(|| CredKitError::network("unknown credential"))
    }

    async fn credential_counter(&self) -> Result<U256, CredKitError> {
        Ok(U256::from(self.details.lock().unwrap().len()))
    }
}

/// A host whose wallet cannot supply a signing identity at all.
pub struct AbsentWallet;

#[async_trait]
impl Wallet for AbsentWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, CredKitError> {
        Err(CredKitError::NoWallet)
    }

    fn subscribe(&self) -> broadcast::Receiver<Vec<Address>> {
        let (tx, rx) = broadcast::channel(1);
        drop(tx);
        rx
    }
}
