//! Launchpad integration for mintlist.
//!
//! Connects the Merkle whitelist engine to a launchpad contract: message
//! shapes for root publication, whitelist queries, and mint requests; the
//! [`LaunchpadClient`] seam a signing transport plugs into; an in-memory
//! launchpad that replays verification the way the deployed contract does;
//! and a proof manifest for handing every member their proof.

pub mod client;
pub mod error;
pub mod manifest;
pub mod memory;
pub mod message;
pub mod whitelist;

pub use client::{LaunchpadClient, TxReceipt};
pub use error::{LaunchpadError, LaunchpadResult};
pub use manifest::ProofManifest;
pub use memory::InMemoryLaunchpad;
pub use message::{ExecuteMsg, LaunchInfo, QueryMsg, WhitelistStatus};
pub use whitelist::Whitelist;
