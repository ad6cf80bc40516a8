//! Launchpad contract messages.
//!
//! Shapes follow the deployed contract's JSON: externally tagged enums with
//! snake_case variant names, e.g. `{"modify_launch": {...}}`. Roots and proof
//! entries travel as lowercase hex without a prefix.

use serde::{Deserialize, Serialize};

/// State-changing calls sent to the launchpad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Register a launch for an NFT contract. `owner_address` may later
    /// replace the root.
    AddLaunch {
        owner_address: String,
        contract_address: String,
        whitelist_merkle_root: Option<String>,
    },
    /// Configuration update. Only the fields carried here are changed.
    ModifyLaunch {
        contract_address: String,
        whitelist_merkle_root: Option<String>,
    },
    /// Mint request. `proof` is required while the launch has a root.
    Mint {
        contract_address: String,
        receiver_address: Option<String>,
        proof: Option<Vec<String>>,
    },
}

impl ExecuteMsg {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AddLaunch { .. } => "add_launch",
            Self::ModifyLaunch { .. } => "modify_launch",
            Self::Mint { .. } => "mint",
        }
    }

    pub fn contract_address(&self) -> &str {
        match self {
            Self::AddLaunch {
                contract_address, ..
            }
            | Self::ModifyLaunch {
                contract_address, ..
            }
            | Self::Mint {
                contract_address, ..
            } => contract_address,
        }
    }
}

/// Read-only queries against the launchpad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetLaunch {
        contract_address: String,
    },
    GetWhitelistStatus {
        contract_address: String,
        account_address: String,
        proof: Vec<String>,
    },
}

/// Response to [`QueryMsg::GetLaunch`], reduced to the whitelist fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchInfo {
    pub contract_address: String,
    pub owner_address: String,
    pub whitelist_merkle_root: Option<String>,
}

/// Response to [`QueryMsg::GetWhitelistStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistStatus {
    pub is_whitelist: bool,
}
