//! The four write actions, generalized as one form state machine.
//!
//! A form moves `idle -> submitting -> (succeeded | failed) -> idle`. The
//! trigger is disabled for the whole submission (a second trigger is a
//! reported no-op), input and account are captured at the moment of
//! transition, and exactly one ledger write goes out per accepted
//! trigger. Failures are logged with full detail and surfaced as one
//! generic notification.

use std::sync::Arc;

use alloy::primitives::Address;
use strum::{Display, EnumString};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::CredKitError;
use crate::ledger::CredentialId;
use crate::listing::RefreshSignal;
use crate::notify::Notifier;
use crate::session::Session;

/// The four user-initiated write actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    /// Register the active account as an institution.
    Register,
    /// Issue a credential to a student.
    Issue,
    /// Mark a credential as verified.
    Verify,
    /// Transfer a credential to a new owner.
    Transfer,
}

/// Typed input parameters for one action, read once at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionInput {
    /// Parameters for [`ActionKind::Register`].
    Register {
        /// Institution display name.
        name: String,
        /// Opaque URI pointing at institution metadata.
        metadata_uri: String,
    },
    /// Parameters for [`ActionKind::Issue`].
    Issue {
        /// The student receiving the credential.
        student: Address,
        /// Opaque URI pointing at the credential details.
        details_uri: String,
        /// Whether the credential may later be transferred.
        transferable: bool,
    },
    /// Parameters for [`ActionKind::Verify`].
    Verify {
        /// The credential to verify.
        credential_id: CredentialId,
    },
    /// Parameters for [`ActionKind::Transfer`].
    Transfer {
        /// The credential to transfer.
        credential_id: CredentialId,
        /// The receiving owner.
        new_owner: Address,
    },
}

impl ActionInput {
    /// The action kind these parameters belong to.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Register { .. } => ActionKind::Register,
            Self::Issue { .. } => ActionKind::Issue,
            Self::Verify { .. } => ActionKind::Verify,
            Self::Transfer { .. } => ActionKind::Transfer,
        }
    }
}

/// Lifecycle of one user-initiated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// Nothing in flight.
    Idle,
    /// The write has been sent; the confirmation wait is running.
    Submitted,
    /// The write fully confirmed.
    Confirmed,
    /// The write failed; no partial state is retained.
    Failed,
}

/// Transient record of one in-flight operation. Created when a trigger is
/// accepted, destroyed once its outcome has been reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    /// Which action is in flight.
    pub kind: ActionKind,
    /// The parameters captured at submission.
    pub input: ActionInput,
    /// Where the operation currently stands.
    pub status: ActionStatus,
}

/// How an accepted or ignored trigger resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The write fully confirmed; a success notification was emitted.
    Confirmed,
    /// The write failed; a failure notification was emitted and the
    /// cause was logged.
    Failed,
    /// A previous trigger from this form is still submitted; this one
    /// was a no-op.
    AlreadySubmitted,
}

/// One action form, bound to a single [`ActionKind`].
pub struct ActionForm {
    kind: ActionKind,
    session: Arc<Session>,
    notifier: Notifier,
    refresh: Option<RefreshSignal>,
    gate: Mutex<()>,
}

impl ActionForm {
    /// Creates a form for `kind`, reporting through `notifier`.
    #[must_use]
    pub fn new(kind: ActionKind, session: Arc<Session>, notifier: Notifier) -> Self {
        Self {
            kind,
            session,
            notifier,
            refresh: None,
            gate: Mutex::new(()),
        }
    }

    /// Attaches a refresh signal, bumped after each confirmed submission.
    /// The issuance form uses this to request a credential-list refresh.
    #[must_use]
    pub fn with_refresh(mut self, refresh: RefreshSignal) -> Self {
        self.refresh = Some(refresh);
        self
    }

    /// The action kind this form is bound to.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Whether a submission is currently in flight. While true, the
    /// trigger control is disabled and further triggers are no-ops.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Triggers the action with `input`.
    ///
    /// The account and input are captured here, at the idle-to-submitting
    /// transition; later edits or account switches do not affect the
    /// in-flight request. The form returns to idle unconditionally once
    /// the outcome has been reported.
    ///
    /// # Errors
    ///
    /// Returns [`CredKitError::InvalidInput`] if `input` belongs to a
    /// different action kind. Operation failures are not returned: they
    /// resolve to [`ActionOutcome::Failed`] after being logged and
    /// notified.
    pub async fn submit(&self, input: ActionInput) -> Result<ActionOutcome, CredKitError> {
        if input.kind() != self.kind {
            return Err(CredKitError::invalid_input(
                "input",
                format!("form handles '{}', got '{}'", self.kind, input.kind()),
            ));
        }

        let Ok(_submitting) = self.gate.try_lock() else {
            debug!(kind = %self.kind, "trigger ignored: previous submission still in flight");
            return Ok(ActionOutcome::AlreadySubmitted);
        };

        let from = self.session.account();
        let mut pending = PendingAction {
            kind: self.kind,
            input,
            status: ActionStatus::Submitted,
        };
        debug!(kind = %self.kind, %from, "action submitted");

        let outcome = match self.dispatch(from, &pending.input).await {
            Ok(()) => {
                pending.status = ActionStatus::Confirmed;
                self.notifier.success(success_message(self.kind));
                if let Some(refresh) = &self.refresh {
                    refresh.bump();
                }
                ActionOutcome::Confirmed
            }
            Err(err) => {
                pending.status = ActionStatus::Failed;
                error!(kind = %self.kind, %from, cause = %err, "action failed");
                self.notifier.failure(failure_message(self.kind));
                ActionOutcome::Failed
            }
        };
        debug!(kind = %self.kind, status = ?pending.status, "action resolved");
        Ok(outcome)
    }

    async fn dispatch(
        &self,
        from: Address,
        input: &ActionInput,
    ) -> Result<(), CredKitError> {
        let ledger = self.session.ledger();
        match input {
            ActionInput::Register { name, metadata_uri } => {
                ledger.register_institution(from, name, metadata_uri).await
            }
            ActionInput::Issue {
                student,
                details_uri,
                transferable,
            } => {
                ledger
                    .issue_credential(from, *student, details_uri, *transferable)
                    .await
            }
            ActionInput::Verify { credential_id } => {
                ledger.verify_credential(from, *credential_id).await
            }
            ActionInput::Transfer {
                credential_id,
                new_owner,
            } => {
                ledger
                    .transfer_credential(from, *credential_id, *new_owner)
                    .await
            }
        }
    }
}

/// The user-facing success text for `kind`.
#[must_use]
pub const fn success_message(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Register => "Institution registered successfully!",
        ActionKind::Issue => "Credential issued successfully!",
        ActionKind::Verify => "Credential verified successfully!",
        ActionKind::Transfer => "Credential transferred successfully!",
    }
}

/// The user-facing failure text for `kind`. Deliberately generic; the
/// specific cause goes to the log only.
#[must_use]
pub const fn failure_message(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Register => "Error registering institution. See logs for details.",
        ActionKind::Issue => "Error issuing credential. See logs for details.",
        ActionKind::Verify => "Error verifying credential. See logs for details.",
        ActionKind::Transfer => "Error transferring credential. See logs for details.",
    }
}
