//! The closed error taxonomy for registry client operations.
//!
//! Two user-visible kinds exist: connectivity failures (terminal for the
//! session) and operation failures (surfaced generically, logged with the
//! original cause). The variants below keep diagnostics structured without
//! classifying anything further in user-facing text.

use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError;
use thiserror::Error;

/// Error outputs from `CredKit`.
#[derive(Debug, Error)]
pub enum CredKitError {
    /// No compatible wallet is present in the host environment. Terminal
    /// for the session; the user must enable a wallet and reconnect.
    #[error("no_wallet")]
    NoWallet,
    /// The account list or signer could not be obtained. Terminal for the
    /// session; there is no automatic retry.
    #[error("connectivity: {reason}")]
    Connectivity {
        /// What failed while establishing the session.
        reason: String,
    },
    /// The presented input is not valid for the requested operation.
    #[error("invalid_input: {attribute}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        attribute: String,
        /// Description of the issue.
        reason: String,
    },
    /// The wallet or user declined to sign or submit the operation.
    #[error("operation_rejected: {reason}")]
    Rejected {
        /// Rejection detail reported by the wallet.
        reason: String,
    },
    /// The ledger accepted the request but the contract reverted it.
    #[error("operation_reverted: {reason}")]
    Reverted {
        /// Revert detail reported by the ledger.
        reason: String,
    },
    /// The request could not be delivered to or answered by the ledger.
    #[error("network_fault: {reason}")]
    Network {
        /// Transport-level detail.
        reason: String,
    },
}

/// EIP-1193 error code emitted when the user rejects a wallet request.
const USER_REJECTED_REQUEST: i64 = 4001;

/// EIP-1474 error code for an execution revert.
const EXECUTION_REVERTED: i64 = 3;

impl CredKitError {
    /// Creates a connectivity error.
    pub fn connectivity<S: Into<String>>(reason: S) -> Self {
        Self::Connectivity {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input<A: Into<String>, R: Into<String>>(
        attribute: A,
        reason: R,
    ) -> Self {
        Self::InvalidInput {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Creates a network fault.
    pub fn network<S: Into<String>>(reason: S) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    /// Creates a reverted-operation error.
    pub fn reverted<S: Into<String>>(reason: S) -> Self {
        Self::Reverted {
            reason: reason.into(),
        }
    }

    /// Whether this error ends the session. Connectivity failures have no
    /// recovery path short of reconnecting with a working wallet.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::NoWallet | Self::Connectivity { .. })
    }

    /// Classifies a JSON-RPC error response into the taxonomy.
    ///
    /// Wallets report user rejection with EIP-1193 code 4001; nodes report
    /// contract-level reverts with EIP-1474 code 3 or a message carrying
    /// the revert marker. Everything else is a transport fault.
    #[must_use]
    pub fn classify_rpc(code: i64, message: &str) -> Self {
        if code == USER_REJECTED_REQUEST {
            return Self::Rejected {
                reason: message.to_string(),
            };
        }
        if code == EXECUTION_REVERTED || message.contains("revert") {
            return Self::Reverted {
                reason: message.to_string(),
            };
        }
        Self::Network {
            reason: format!("rpc error {code}: {message}"),
        }
    }
}

impl From<TransportError> for CredKitError {
    fn from(err: TransportError) -> Self {
        err.as_error_resp().map_or_else(
            || Self::network(err.to_string()),
            |payload| Self::classify_rpc(payload.code, &payload.message),
        )
    }
}

impl From<alloy::contract::Error> for CredKitError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(transport) => transport.into(),
            other => Self::network(other.to_string()),
        }
    }
}

impl From<PendingTransactionError> for CredKitError {
    fn from(err: PendingTransactionError) -> Self {
        match err {
            PendingTransactionError::TransportError(transport) => transport.into(),
            other => Self::network(format!("confirmation wait failed: {other}")),
        }
    }
}
