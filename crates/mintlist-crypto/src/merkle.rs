use mintlist_types::{Digest, Identity};
use tracing::debug;

use crate::error::{MerkleError, MerkleResult};
use crate::hasher::{HashAlgorithm, MerkleHasher};
use crate::proof::MerkleProof;

/// Binary Merkle tree over a whitelist snapshot.
///
/// Leaves are sorted by byte order before the levels are built, so the root
/// depends only on the set of addresses, not on the order they were listed
/// in. Each level is stored as a flat vector; parents are found by index
/// arithmetic. The tree is never mutated after construction: a changed list
/// means building a new tree and publishing a new root.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    hasher: MerkleHasher,
    /// The root hash of the tree.
    root: Digest,
    /// Level 0 = sorted leaves, last level = `[root]`. Empty for an empty tree.
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree from raw address strings.
    ///
    /// Fails on the first empty or malformed address, reporting its position
    /// in the input.
    pub fn build<I, S>(hasher: MerkleHasher, addresses: I) -> MerkleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let leaves = addresses
            .into_iter()
            .enumerate()
            .map(|(index, address)| {
                let address = address.as_ref();
                Identity::check(address).map_err(|e| MerkleError::InvalidInput {
                    index,
                    reason: e.to_string(),
                })?;
                Ok(hasher.hash(address.as_bytes()))
            })
            .collect::<MerkleResult<Vec<_>>>()?;
        Ok(Self::from_leaves(hasher, leaves))
    }

    /// Build a tree from already validated identities.
    pub fn from_identities(hasher: MerkleHasher, identities: &[Identity]) -> Self {
        let leaves = identities.iter().map(|id| hasher.hash_leaf(id)).collect();
        Self::from_leaves(hasher, leaves)
    }

    /// Build a tree from precomputed leaf digests.
    ///
    /// An empty list produces the empty-input sentinel root. A single leaf is
    /// its own root.
    pub fn from_leaves(hasher: MerkleHasher, mut leaves: Vec<Digest>) -> Self {
        if leaves.is_empty() {
            return Self {
                hasher,
                root: hasher.empty_root(),
                levels: vec![],
            };
        }

        leaves.sort_unstable();
        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => hasher.hash_pair(a, b),
                    // Unpaired tail is promoted as-is, never paired with itself.
                    [odd] => *odd,
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            levels.push(next);
        }

        let root = levels[levels.len() - 1][0];
        debug!(
            leaves = levels[0].len(),
            depth = levels.len() - 1,
            root = %root.short_hex(),
            algorithm = %hasher.algorithm(),
            "built whitelist tree"
        );
        Self {
            hasher,
            root,
            levels,
        }
    }

    /// The root hash of the tree.
    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn hasher(&self) -> MerkleHasher {
        self.hasher
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.hasher.algorithm()
    }

    /// Number of leaves, duplicates included.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of pairing rounds between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Sorted leaf digests.
    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every level, leaves first.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Position of a leaf in the sorted leaf level (first occurrence).
    pub fn position(&self, leaf: &Digest) -> Option<usize> {
        let leaves = self.leaves();
        let idx = leaves.partition_point(|l| l < leaf);
        (leaves.get(idx) == Some(leaf)).then_some(idx)
    }

    /// Whether the address is one of the leaves.
    pub fn contains(&self, address: &str) -> bool {
        self.position(&self.hasher.hash(address.as_bytes())).is_some()
    }

    /// Generate the membership proof for the leaf at `index` in the sorted
    /// leaf level.
    pub fn proof_at(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            // An even index at the end of an odd level was promoted: no sibling.
            if let Some(sibling) = level.get(idx ^ 1) {
                siblings.push(*sibling);
            }
            idx /= 2;
        }

        Some(MerkleProof::new(siblings))
    }

    /// Generate the membership proof for an address.
    pub fn prove(&self, address: &str) -> MerkleResult<MerkleProof> {
        let leaf = self.hasher.hash(address.as_bytes());
        let proof = self
            .position(&leaf)
            .and_then(|idx| self.proof_at(idx))
            .ok_or_else(|| MerkleError::NotFound(address.to_string()))?;
        debug!(address, siblings = proof.len(), "generated membership proof");
        Ok(proof)
    }
}
