use std::fmt;
use std::str::FromStr;

use mintlist_types::{Digest, Identity};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// One-way hash used for every leaf and node of a whitelist tree.
///
/// The builder and every verifier must agree on this bit for bit. SHA-256 is
/// what the deployed launchpad contract replays, so it is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(HasherError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Leaf and node hasher for whitelist trees.
///
/// Leaves are `hash(address bytes)`. Parents are `hash(min || max)` of their
/// two children, which makes the parent independent of child orientation.
/// No domain tag is mixed in: the verifying contract hashes raw bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MerkleHasher {
    algorithm: HashAlgorithm,
}

impl MerkleHasher {
    /// Hasher matching the deployed launchpad contract.
    pub const SHA256: Self = Self {
        algorithm: HashAlgorithm::Sha256,
    };
    pub const BLAKE3: Self = Self {
        algorithm: HashAlgorithm::Blake3,
    };

    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash raw bytes.
    pub fn hash(&self, data: &[u8]) -> Digest {
        match self.algorithm {
            HashAlgorithm::Sha256 => {
                let out: [u8; 32] = Sha256::digest(data).into();
                Digest::from_hash(out)
            }
            HashAlgorithm::Blake3 => Digest::from_hash(*blake3::hash(data).as_bytes()),
        }
    }

    /// Leaf digest for an identity.
    pub fn hash_leaf(&self, identity: &Identity) -> Digest {
        self.hash(identity.as_bytes())
    }

    /// Parent digest of two children under canonical pairing.
    pub fn hash_pair(&self, a: &Digest, b: &Digest) -> Digest {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        match self.algorithm {
            HashAlgorithm::Sha256 => {
                let out: [u8; 32] = Sha256::new()
                    .chain_update(lo.as_bytes())
                    .chain_update(hi.as_bytes())
                    .finalize()
                    .into();
                Digest::from_hash(out)
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(lo.as_bytes());
                hasher.update(hi.as_bytes());
                Digest::from_hash(*hasher.finalize().as_bytes())
            }
        }
    }

    /// Root of a tree with no leaves: the digest of empty input.
    pub fn empty_root(&self) -> Digest {
        self.hash(&[])
    }
}

impl From<HashAlgorithm> for MerkleHasher {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self::new(algorithm)
    }
}

/// Errors from hasher configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(d: Digest) -> String {
        d.to_hex()
    }

    #[test]
    fn sha256_matches_known_vectors() {
        assert_eq!(
            hex(MerkleHasher::SHA256.empty_root()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        let leaf = MerkleHasher::SHA256.hash_leaf(&Identity::new("addrA").unwrap());
        assert_eq!(
            hex(leaf),
            "19e418c37ebd469158e4fe80d65eafa79d4305cfe6c464a63351fc4b3e9e8dae"
        );
    }

    #[test]
    fn pair_is_orientation_independent() {
        for hasher in [MerkleHasher::SHA256, MerkleHasher::BLAKE3] {
            let a = hasher.hash(b"left");
            let b = hasher.hash(b"right");
            assert_eq!(hasher.hash_pair(&a, &b), hasher.hash_pair(&b, &a));
        }
    }

    #[test]
    fn pair_hashes_sorted_concatenation() {
        let hasher = MerkleHasher::SHA256;
        let a = hasher.hash(b"addrA");
        let b = hasher.hash(b"addrB");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let mut concat = lo.as_bytes().to_vec();
        concat.extend_from_slice(hi.as_bytes());
        assert_eq!(hasher.hash_pair(&a, &b), hasher.hash(&concat));
    }

    #[test]
    fn algorithms_disagree() {
        assert_ne!(
            MerkleHasher::SHA256.hash(b"addrA"),
            MerkleHasher::BLAKE3.hash(b"addrA")
        );
    }

    #[test]
    fn blake3_matches_library() {
        assert_eq!(
            *MerkleHasher::BLAKE3.hash(b"addrA").as_bytes(),
            *blake3::hash(b"addrA").as_bytes()
        );
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("blake3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake3);
        assert_eq!(
            "md5".parse::<HashAlgorithm>(),
            Err(HasherError::UnknownAlgorithm("md5".into()))
        );
    }

    #[test]
    fn algorithm_serde_is_lowercase() {
        let json = serde_json::to_string(&HashAlgorithm::Blake3).unwrap();
        assert_eq!(json, "\"blake3\"");
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha256);
    }
}
