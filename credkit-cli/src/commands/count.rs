//! `credkit count` — show the total number of credentials ever issued.

use super::Context;

pub async fn run(ctx: &Context) -> eyre::Result<()> {
    let total = ctx.session.ledger().credential_counter().await?;
    if ctx.json {
        println!("{}", serde_json::json!({ "credential_counter": total }));
    } else {
        println!("{total}");
    }
    Ok(())
}
