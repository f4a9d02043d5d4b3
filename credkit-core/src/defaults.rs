//! Fixed, build-time configuration: the registry deployment per
//! environment and the default RPC endpoint. There is no runtime
//! configuration surface beyond the optional RPC override.

use alloy::primitives::{address, Address};

use crate::Environment;

/// The production `CredentialRegistry` deployment.
pub static CREDENTIAL_REGISTRY: Address =
    address!("0xc90AFEC15fc690E81fAb9692C0b3d50d8D5783Fa");

/// The staging `CredentialRegistry` deployment.
pub static CREDENTIAL_REGISTRY_STAGING: Address =
    address!("0x5b38da6a701c568545dcfcb03fcb875f56beddc4");

/// Resolved connection parameters for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// The registry contract address.
    pub address: Address,
    /// The RPC endpoint to reach it through.
    pub rpc_url: String,
}

impl RegistryConfig {
    /// Resolves the fixed configuration for `environment`, with an
    /// optional RPC endpoint override.
    #[must_use]
    pub fn from_environment(environment: Environment, rpc_url: Option<String>) -> Self {
        match environment {
            Environment::Staging => Self {
                address: CREDENTIAL_REGISTRY_STAGING,
                rpc_url: rpc_url
                    .unwrap_or_else(|| "https://sepolia.base.org".to_owned()),
            },
            Environment::Production => Self {
                address: CREDENTIAL_REGISTRY,
                rpc_url: rpc_url.unwrap_or_else(|| "https://mainnet.base.org".to_owned()),
            },
        }
    }
}
