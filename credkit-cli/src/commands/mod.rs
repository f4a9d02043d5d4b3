//! Subcommand implementations and the shared connected context.

pub mod count;
pub mod issue;
pub mod list;
pub mod register;
pub mod transfer;
pub mod verify;

use std::sync::Arc;

use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use credkit_core::{
    ActionForm, ActionInput, ActionKind, ActionOutcome, Environment, Notifier,
    RegistryConfig, RegistryContract, Session, SignerWallet,
};
use eyre::WrapErr;
use tracing::debug;

/// A connected session plus the output preferences every subcommand
/// shares.
pub struct Context {
    pub session: Arc<Session>,
    pub notifier: Notifier,
    pub json: bool,
}

impl Context {
    /// Connects to the registry deployment for `environment`, signing
    /// with `private_key`.
    pub async fn connect(
        environment: Environment,
        rpc_url: Option<String>,
        private_key: &str,
        json: bool,
    ) -> eyre::Result<Self> {
        let config = RegistryConfig::from_environment(environment, rpc_url);
        let signer: PrivateKeySigner =
            private_key.parse().wrap_err("invalid private key")?;
        let wallet = Arc::new(SignerWallet::new(&signer));

        let url: reqwest::Url = config
            .rpc_url
            .parse()
            .wrap_err_with(|| format!("invalid RPC URL '{}'", config.rpc_url))?;
        let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
        let registry = Arc::new(RegistryContract::new(config.address, provider));

        debug!(registry = %config.address, rpc = %config.rpc_url, %environment, "connecting");
        let session = Session::connect(wallet, registry).await?;
        Ok(Self {
            session: Arc::new(session),
            notifier: Notifier::new(),
            json,
        })
    }
}

/// Submits one action through a fresh form and reports its notification.
/// An unsuccessful outcome maps to a non-zero exit.
pub async fn submit(
    ctx: &Context,
    kind: ActionKind,
    input: ActionInput,
) -> eyre::Result<()> {
    let mut notifications = ctx.notifier.subscribe();
    let form = ActionForm::new(kind, Arc::clone(&ctx.session), ctx.notifier.clone());

    let outcome = form.submit(input).await?;
    let notification = notifications.recv().await?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&notification)?);
    } else {
        println!("{}", notification.message);
    }

    if outcome == ActionOutcome::Failed {
        eyre::bail!("{kind} failed; re-run with RUST_LOG=debug for details");
    }
    Ok(())
}
