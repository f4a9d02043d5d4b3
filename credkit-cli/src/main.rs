//! CredKit CLI — command-line client for the on-chain credential
//! registry.
//!
//! Subcommands: register, issue, verify, transfer, list, count.

mod commands;

use clap::{Parser, Subcommand};
use credkit_core::Environment;
use tracing_subscriber::EnvFilter;

/// CredKit — on-chain credential registry client.
#[derive(Parser, Debug)]
#[command(name = "credkit", version, about, long_about = None)]
struct Cli {
    /// Deployment environment to target.
    #[arg(long, global = true, default_value = "production")]
    environment: Environment,

    /// RPC endpoint override (defaults to the environment's endpoint).
    #[arg(long, global = true, env = "CREDKIT_RPC_URL")]
    rpc_url: Option<String>,

    /// Hex-encoded private key of the acting account.
    #[arg(long, global = true, env = "CREDKIT_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Emit machine-readable JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register the acting account as an institution.
    Register(commands::register::RegisterArgs),
    /// Issue a credential to a student.
    Issue(commands::issue::IssueArgs),
    /// Mark an issued credential as verified.
    Verify(commands::verify::VerifyArgs),
    /// Transfer a credential to a new owner.
    Transfer(commands::transfer::TransferArgs),
    /// List the credentials owned by the acting account.
    List,
    /// Show the total number of credentials ever issued.
    Count,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let private_key = cli.private_key.as_deref().ok_or_else(|| {
        eyre::eyre!("a signing key is required: pass --private-key or set CREDKIT_PRIVATE_KEY")
    })?;
    let ctx = commands::Context::connect(
        cli.environment,
        cli.rpc_url.clone(),
        private_key,
        cli.json,
    )
    .await?;

    match cli.command {
        Commands::Register(args) => commands::register::run(&ctx, args).await,
        Commands::Issue(args) => commands::issue::run(&ctx, args).await,
        Commands::Verify(args) => commands::verify::run(&ctx, args).await,
        Commands::Transfer(args) => commands::transfer::run(&ctx, args).await,
        Commands::List => commands::list::run(&ctx).await,
        Commands::Count => commands::count::run(&ctx).await,
    }
}
