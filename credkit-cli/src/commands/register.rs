//! `credkit register` — register the acting account as an institution.

use clap::Args;
use credkit_core::{ActionInput, ActionKind};

use super::Context;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Institution display name.
    #[arg(long)]
    pub name: String,

    /// URI pointing at the institution's metadata document.
    #[arg(long)]
    pub metadata_uri: String,
}

pub async fn run(ctx: &Context, args: RegisterArgs) -> eyre::Result<()> {
    super::submit(
        ctx,
        ActionKind::Register,
        ActionInput::Register {
            name: args.name,
            metadata_uri: args.metadata_uri,
        },
    )
    .await
}
