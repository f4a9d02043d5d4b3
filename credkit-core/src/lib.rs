//! Core client library for an on-chain credential registry.
//!
//! Everything here sits between user input and the external ledger: a
//! wallet-backed [`Session`], the bound registry gateway, the four write
//! actions, and the credential listing. The registry contract itself is an
//! opaque external dependency; this crate only maps typed parameters onto
//! its fixed interface and waits for confirmations.
#![deny(clippy::all)]
#![warn(clippy::pedantic, clippy::nursery, missing_docs)]

use strum::{Display, EnumString};

/// The deployment environment a client is bound to. Selects the registry
/// address and default RPC endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Pre-production registry deployment.
    Staging,
    /// The production registry deployment.
    Production,
}

mod actions;
pub use actions::*;

mod defaults;
pub use defaults::*;

mod error;
pub use error::*;

mod ledger;
pub use ledger::*;

mod listing;
pub use listing::*;

mod notify;
pub use notify::*;

mod registry;
pub use registry::*;

mod session;
pub use session::*;

mod wallet;
pub use wallet::*;
