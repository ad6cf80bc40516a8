//! Foundation types for mintlist.
//!
//! This crate provides the value types shared by the Merkle whitelist engine
//! and the launchpad integration. Every other mintlist crate depends on
//! `mintlist-types`.
//!
//! # Key Types
//!
//! - [`Digest`]: Fixed-width 32-byte hash, rendered as lowercase hex
//! - [`Identity`]: A validated, non-empty address eligible for the whitelist
//! - [`IdentityRecord`]: One entry of a persisted whitelist file

pub mod digest;
pub mod error;
pub mod identity;
pub mod record;

pub use digest::{Digest, DIGEST_LEN};
pub use error::TypeError;
pub use identity::Identity;
pub use record::{parse_identity_records, IdentityRecord};
