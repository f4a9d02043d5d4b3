//! The ledger boundary: the fixed set of operations the external registry
//! contract exposes, behind an object-safe trait so actions and listings
//! can run against the real contract or a test double.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CredKitError;

/// Identifier assigned to a credential by the external ledger. Never
/// reused; treated as opaque by this crate.
pub type CredentialId = U256;

/// Read-only projection of one credential, as returned by the ledger.
///
/// This crate never constructs or mutates credential state; it only
/// requests reads and displays what comes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The ledger-assigned identifier.
    pub id: CredentialId,
    /// The student the credential was issued to.
    pub issued_to: Address,
    /// The institution that issued the credential.
    pub issued_by: Address,
    /// Opaque URI pointing at the credential details. Not parsed.
    pub details_uri: String,
    /// Whether the issuing institution has verified the credential.
    pub verified: bool,
    /// Whether the credential may be transferred to a new owner.
    pub transferable: bool,
}

/// The fixed write and read operations of the external credential
/// registry.
///
/// Writes submit exactly one state-changing request and perform a scoped
/// wait for its confirmation before returning: callers observe either
/// full confirmation or a failure, never an unconfirmed success. There is
/// no batching, no deduplication, no idempotency check and no retry, for
/// writes or reads alike.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Registers the calling account as an institution.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted, is
    /// rejected, or reverts on-chain.
    async fn register_institution(
        &self,
        from: Address,
        name: &str,
        metadata_uri: &str,
    ) -> Result<(), CredKitError>;

    /// Issues a credential to `student`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted, is
    /// rejected, or reverts on-chain.
    async fn issue_credential(
        &self,
        from: Address,
        student: Address,
        details_uri: &str,
        transferable: bool,
    ) -> Result<(), CredKitError>;

    /// Marks `credential_id` as verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted, is
    /// rejected, or reverts on-chain.
    async fn verify_credential(
        &self,
        from: Address,
        credential_id: CredentialId,
    ) -> Result<(), CredKitError>;

    /// Transfers `credential_id` to `new_owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted, is
    /// rejected, or reverts on-chain.
    async fn transfer_credential(
        &self,
        from: Address,
        credential_id: CredentialId,
        new_owner: Address,
    ) -> Result<(), CredKitError>;

    /// Returns the ordered identifiers of all credentials owned by
    /// `student`. An empty collection is a valid, non-error outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the read cannot be answered by the ledger.
    async fn credentials_of(
        &self,
        student: Address,
    ) -> Result<Vec<CredentialId>, CredKitError>;

    /// Resolves one identifier to its full detail projection.
    ///
    /// # Errors
    ///
    /// Returns an error if the read cannot be answered by the ledger.
    async fn credential_details(
        &self,
        credential_id: CredentialId,
    ) -> Result<Credential, CredKitError>;

    /// Returns the total number of credentials the registry has ever
    /// issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the read cannot be answered by the ledger.
    async fn credential_counter(&self) -> Result<U256, CredKitError>;
}
