//! `credkit issue` — issue a credential to a student.

use alloy::primitives::Address;
use clap::Args;
use credkit_core::{ActionInput, ActionKind};

use super::Context;

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Recipient account.
    #[arg(long)]
    pub student: Address,

    /// URI pointing at the credential details document.
    #[arg(long)]
    pub details_uri: String,

    /// Allow the credential to be transferred later.
    #[arg(long)]
    pub transferable: bool,
}

pub async fn run(ctx: &Context, args: IssueArgs) -> eyre::Result<()> {
    super::submit(
        ctx,
        ActionKind::Issue,
        ActionInput::Issue {
            student: args.student,
            details_uri: args.details_uri,
            transferable: args.transferable,
        },
    )
    .await
}
