//! The alloy-backed gateway to the external `CredentialRegistry`
//! contract.
//!
//! The interface description below is fixed at build time and mirrors the
//! deployed contract's ABI, including the four events it emits (which this
//! crate declares but does not subscribe to).

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::sol;
use async_trait::async_trait;
use tracing::info;

use crate::error::CredKitError;
use crate::ledger::{Credential, CredentialId, Ledger};

sol!(
    /// The external credential registry. Its internal bookkeeping, access
    /// control and storage layout are outside this repository; only the
    /// function and event signatures matter here.
    #[sol(rpc)]
    interface ICredentialRegistry {
        struct Credential {
            address issuedTo;
            address issuedBy;
            string detailsURI;
            bool verified;
            bool transferable;
        }

        event InstitutionRegistered(address indexed institution, string name);
        event CredentialIssued(address indexed student, address indexed institution, uint256 credentialId);
        event CredentialVerified(uint256 credentialId, bool verified);
        event CredentialTransferred(uint256 credentialId, address from, address to);

        function registerInstitution(string calldata _name, string calldata _metadataURI) external;
        function issueCredential(address _student, string calldata _detailsURI, bool _transferable) external;
        function verifyCredential(uint256 _credentialId) external;
        function transferCredential(uint256 _credentialId, address _newOwner) external;

        function getStudentCredentials(address _student) external view returns (uint256[] memory);
        function getCredentialDetails(uint256 _credentialId) external view returns (Credential memory);
        function credentialCounter() external view returns (uint256);
    }
);

/// A single bound handle for issuing operations against the registry:
/// target address, interface description and the connected provider.
///
/// One state-changing request goes out per write invocation; the gateway
/// performs no batching and no deduplication, so two triggers produce two
/// independent transactions.
pub struct RegistryContract<P: Provider> {
    address: Address,
    instance: ICredentialRegistry::ICredentialRegistryInstance<P>,
}

impl<P: Provider> RegistryContract<P> {
    /// Binds the registry at `address` through `provider`.
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            address,
            instance: ICredentialRegistry::new(address, provider),
        }
    }

    /// The bound registry address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }
}

/// Converts the ABI-level record into the domain projection, attaching
/// the identifier it was resolved from.
fn project(id: CredentialId, raw: ICredentialRegistry::Credential) -> Credential {
    Credential {
        id,
        issued_to: raw.issuedTo,
        issued_by: raw.issuedBy,
        details_uri: raw.detailsURI,
        verified: raw.verified,
        transferable: raw.transferable,
    }
}

#[async_trait]
impl<P: Provider + 'static> Ledger for RegistryContract<P> {
    async fn register_institution(
        &self,
        from: Address,
        name: &str,
        metadata_uri: &str,
    ) -> Result<(), CredKitError> {
        let receipt = self
            .instance
            .registerInstitution(name.to_owned(), metadata_uri.to_owned())
            .from(from)
            .send()
            .await?
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(CredKitError::reverted(format!(
                "registerInstitution reverted in {}",
                receipt.transaction_hash
            )));
        }
        info!(tx = %receipt.transaction_hash, %from, "institution registration confirmed");
        Ok(())
    }

    async fn issue_credential(
        &self,
        from: Address,
        student: Address,
        details_uri: &str,
        transferable: bool,
    ) -> Result<(), CredKitError> {
        let receipt = self
            .instance
            .issueCredential(student, details_uri.to_owned(), transferable)
            .from(from)
            .send()
            .await?
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(CredKitError::reverted(format!(
                "issueCredential reverted in {}",
                receipt.transaction_hash
            )));
        }
        info!(tx = %receipt.transaction_hash, %student, "credential issuance confirmed");
        Ok(())
    }

    async fn verify_credential(
        &self,
        from: Address,
        credential_id: CredentialId,
    ) -> Result<(), CredKitError> {
        let receipt = self
            .instance
            .verifyCredential(credential_id)
            .from(from)
            .send()
            .await?
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(CredKitError::reverted(format!(
                "verifyCredential reverted in {}",
                receipt.transaction_hash
            )));
        }
        info!(tx = %receipt.transaction_hash, id = %credential_id, "credential verification confirmed");
        Ok(())
    }

    async fn transfer_credential(
        &self,
        from: Address,
        credential_id: CredentialId,
        new_owner: Address,
    ) -> Result<(), CredKitError> {
        let receipt = self
            .instance
            .transferCredential(credential_id, new_owner)
            .from(from)
            .send()
            .await?
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(CredKitError::reverted(format!(
                "transferCredential reverted in {}",
                receipt.transaction_hash
            )));
        }
        info!(tx = %receipt.transaction_hash, id = %credential_id, %new_owner, "credential transfer confirmed");
        Ok(())
    }

    async fn credentials_of(
        &self,
        student: Address,
    ) -> Result<Vec<CredentialId>, CredKitError> {
        let ids = self
            .instance
            .getStudentCredentials(student)
            .call()
            .await?;
        Ok(ids)
    }

    async fn credential_details(
        &self,
        credential_id: CredentialId,
    ) -> Result<Credential, CredKitError> {
        let raw = self
            .instance
            .getCredentialDetails(credential_id)
            .call()
            .await?;
        Ok(project(credential_id, raw))
    }

    async fn credential_counter(&self) -> Result<U256, CredKitError> {
        let counter = self.instance.credentialCounter().call().await?;
        Ok(counter)
    }
}
