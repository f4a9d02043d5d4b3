//! `credkit verify` — mark an issued credential as verified.

use clap::Args;
use credkit_core::{ActionInput, ActionKind, CredentialId};

use super::Context;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Identifier of the credential to verify.
    #[arg(long)]
    pub credential_id: CredentialId,
}

pub async fn run(ctx: &Context, args: VerifyArgs) -> eyre::Result<()> {
    super::submit(
        ctx,
        ActionKind::Verify,
        ActionInput::Verify {
            credential_id: args.credential_id,
        },
    )
    .await
}
