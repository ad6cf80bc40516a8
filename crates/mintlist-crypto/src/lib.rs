//! Merkle whitelist engine for mintlist.
//!
//! Builds a binary Merkle tree over a set of eligible addresses, produces
//! per-address membership proofs, and verifies them against a published
//! root. Parents are computed with canonical pairing: the two children are
//! sorted by byte order before hashing, so neither side has to track
//! left/right orientation. An unpaired node at the end of a level is
//! promoted unchanged.
//!
//! All hashing wraps established libraries (SHA-256 via `sha2`, BLAKE3);
//! no custom cryptography.

pub mod error;
pub mod hasher;
pub mod merkle;
pub mod proof;

pub use error::{MerkleError, MerkleResult};
pub use hasher::{HashAlgorithm, HasherError, MerkleHasher};
pub use merkle::MerkleTree;
pub use proof::{verify_membership, MerkleProof, MAX_PROOF_DEPTH};
