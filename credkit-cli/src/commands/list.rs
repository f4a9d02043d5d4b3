//! `credkit list` — list the credentials owned by the acting account.

use std::sync::Arc;

use credkit_core::CredentialListing;

use super::Context;

pub async fn run(ctx: &Context) -> eyre::Result<()> {
    let mut listing = CredentialListing::new(Arc::clone(&ctx.session));
    if !listing.refresh().await {
        eyre::bail!("could not read the credential listing; re-run with RUST_LOG=debug for details");
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(listing.entries())?);
        return Ok(());
    }

    if listing.entries().is_empty() {
        println!("No credentials found for {}", ctx.session.account());
        return Ok(());
    }
    for credential in listing.entries() {
        println!(
            "#{} issued_by={} uri={} verified={} transferable={}",
            credential.id,
            credential.issued_by,
            credential.details_uri,
            credential.verified,
            credential.transferable,
        );
    }
    Ok(())
}
