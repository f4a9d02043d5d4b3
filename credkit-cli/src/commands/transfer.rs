//! `credkit transfer` — transfer a credential to a new owner.

use alloy::primitives::Address;
use clap::Args;
use credkit_core::{ActionInput, ActionKind, CredentialId};

use super::Context;

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Identifier of the credential to transfer.
    #[arg(long)]
    pub credential_id: CredentialId,

    /// The receiving owner.
    #[arg(long)]
    pub new_owner: Address,
}

pub async fn run(ctx: &Context, args: TransferArgs) -> eyre::Result<()> {
    super::submit(
        ctx,
        ActionKind::Transfer,
        ActionInput::Transfer {
            credential_id: args.credential_id,
            new_owner: args.new_owner,
        },
    )
    .await
}
