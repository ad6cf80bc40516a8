//! Proof manifest: every member's proof in one JSON document.
//!
//! Built once next to the root so proofs can be served from static storage
//! instead of rebuilding the tree per request.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use mintlist_crypto::{HashAlgorithm, MerkleHasher, MerkleProof, MerkleTree};
use mintlist_types::{Digest, Identity};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::LaunchpadResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofManifest {
    pub algorithm: HashAlgorithm,
    pub root: Digest,
    /// Address to proof. Serialized as lists of hex strings.
    pub proofs: BTreeMap<String, MerkleProof>,
}

impl ProofManifest {
    /// Collect a proof for each identity. Every identity must be in `tree`.
    pub fn build(tree: &MerkleTree, identities: &[Identity]) -> LaunchpadResult<Self> {
        let proofs = identities
            .iter()
            .map(|id| -> LaunchpadResult<(String, MerkleProof)> {
                Ok((id.to_string(), tree.prove(id.as_str())?))
            })
            .collect::<LaunchpadResult<BTreeMap<_, _>>>()?;
        debug!(entries = proofs.len(), root = %tree.root().short_hex(), "built proof manifest");
        Ok(Self {
            algorithm: tree.algorithm(),
            root: tree.root(),
            proofs,
        })
    }

    pub fn lookup(&self, address: &str) -> Option<&MerkleProof> {
        self.proofs.get(address)
    }

    /// Whether `address` has an entry whose proof verifies against the root.
    pub fn verify(&self, address: &str) -> bool {
        let hasher = MerkleHasher::new(self.algorithm);
        self.lookup(address)
            .is_some_and(|proof| proof.verify(&hasher, address, &self.root))
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    pub fn to_json(&self) -> LaunchpadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> LaunchpadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write to `path` through a uniquely named temp file in the same
    /// directory, so readers never see a partial manifest. The temp file is
    /// removed if anything fails before the final rename.
    pub fn write(&self, path: &Path) -> LaunchpadResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(self.to_json()?.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn read(path: &Path) -> LaunchpadResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities() -> Vec<Identity> {
        ["addrA", "addrB", "addrC"]
            .into_iter()
            .map(|a| Identity::new(a).unwrap())
            .collect()
    }

    fn manifest() -> ProofManifest {
        let ids = identities();
        let tree = MerkleTree::from_identities(MerkleHasher::SHA256, &ids);
        ProofManifest::build(&tree, &ids).unwrap()
    }

    #[test]
    fn every_member_verifies() {
        let manifest = manifest();
        assert_eq!(manifest.len(), 3);
        for id in identities() {
            assert!(manifest.verify(id.as_str()));
        }
        assert!(!manifest.verify("addrE"));
        assert!(manifest.lookup("addrE").is_none());
    }

    #[test]
    fn json_shape_uses_hex() {
        let manifest = manifest();
        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(value["algorithm"], "sha256");
        assert_eq!(value["root"], manifest.root.to_hex());
        assert!(value["proofs"]["addrA"].as_array().is_some());
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proofs.json");
        let manifest = manifest();
        manifest.write(&path).unwrap();
        assert_eq!(ProofManifest::read(&path).unwrap(), manifest);
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn write_leaves_sibling_tmp_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proofs.json");
        let sibling = dir.path().join("proofs.tmp");
        fs::write(&sibling, "keep me").unwrap();

        manifest().write(&path).unwrap();
        assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        let path = dir.path().join("proofs.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupant"), "x").unwrap();

        assert!(manifest().write(&path).is_err());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn identity_outside_tree_fails_build() {
        let ids = identities();
        let tree = MerkleTree::from_identities(MerkleHasher::SHA256, &ids[..2]);
        assert!(ProofManifest::build(&tree, &ids).is_err());
    }
}
