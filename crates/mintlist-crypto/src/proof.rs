use mintlist_types::{Digest, Identity};
use serde::{Deserialize, Serialize};

use crate::error::{MerkleError, MerkleResult};
use crate::hasher::MerkleHasher;

/// Longest proof accepted. A tree deeper than this would need more than
/// 2^64 leaves.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Membership proof: sibling digests from the leaf level up to the root.
///
/// Levels where the proven node was promoted unpaired contribute no entry,
/// so a proof can be shorter than the tree depth. A proof only means
/// something against the root of the tree it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    siblings: Vec<Digest>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self { siblings }
    }

    /// Sibling digests, bottom to top.
    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Wire form: lowercase hex, no prefix.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.siblings.iter().map(Digest::to_hex).collect()
    }

    /// Decode a proof from its wire form.
    pub fn from_hex_strings<S: AsRef<str>>(entries: &[S]) -> MerkleResult<Self> {
        if entries.len() > MAX_PROOF_DEPTH {
            return Err(MerkleError::MalformedProof(format!(
                "{} entries exceeds maximum depth {MAX_PROOF_DEPTH}",
                entries.len()
            )));
        }
        let siblings = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Digest::from_hex(entry.as_ref())
                    .map_err(|e| MerkleError::MalformedProof(format!("entry {i}: {e}")))
            })
            .collect::<MerkleResult<Vec<_>>>()?;
        Ok(Self { siblings })
    }

    /// Replay canonical pairing from `leaf` through every sibling.
    pub fn compute_root(&self, hasher: &MerkleHasher, leaf: Digest) -> Digest {
        self.siblings
            .iter()
            .fold(leaf, |current, sibling| hasher.hash_pair(&current, sibling))
    }

    /// Check that `address` is committed to by `root`.
    ///
    /// Total: an invalid address or an over-long proof is simply not a member.
    pub fn verify(&self, hasher: &MerkleHasher, address: &str, root: &Digest) -> bool {
        if Identity::check(address).is_err() || self.len() > MAX_PROOF_DEPTH {
            return false;
        }
        self.compute_root(hasher, hasher.hash(address.as_bytes())) == *root
    }
}

impl From<Vec<Digest>> for MerkleProof {
    fn from(siblings: Vec<Digest>) -> Self {
        Self::new(siblings)
    }
}

/// Verify a proof in wire form against a hex root.
///
/// This is the check the launchpad contract runs before authorizing a
/// whitelist mint. Malformed roots or sibling entries answer `false`.
pub fn verify_membership<S: AsRef<str>>(
    hasher: &MerkleHasher,
    address: &str,
    proof: &[S],
    root: &str,
) -> bool {
    let Ok(root) = Digest::from_hex(root) else {
        return false;
    };
    let Ok(proof) = MerkleProof::from_hex_strings(proof) else {
        return false;
    };
    proof.verify(hasher, address, &root)
}
