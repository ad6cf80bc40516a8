use std::path::{Path, PathBuf};

use anyhow::Context;
use mintlist_crypto::HashAlgorithm;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mintlist.toml";

/// Settings shared by every command. Flags override file values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON array of `{"address": ...}` records.
    pub whitelist_path: PathBuf,
    /// Must match the algorithm the launchpad verifies with.
    pub algorithm: HashAlgorithm,
    pub launchpad_address: String,
    pub nft_contract_address: String,
    /// Account that signs configuration updates.
    pub sender_address: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            whitelist_path: PathBuf::from("testdata/wl_list.json"),
            algorithm: HashAlgorithm::Sha256,
            launchpad_address: String::new(),
            nft_contract_address: String::new(),
            sender_address: String::new(),
        }
    }
}

impl CliConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load `path` if given, else `mintlist.toml` if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
