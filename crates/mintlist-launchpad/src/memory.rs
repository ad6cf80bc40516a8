//! In-memory launchpad for tests and dry runs.
//!
//! [`InMemoryLaunchpad`] stands in for the deployed contract. It keeps one
//! optional whitelist root per launch and, like the contract, never sees the
//! full address list: it only replays canonical pairing along a submitted
//! proof. Sale windows, prices, and supply are out of its scope.
//!
//! Roots and proof entries are decoded in strict wire form (64 hex digits,
//! no prefix) as the contract decodes them, so a dry run never accepts what
//! the chain would reject.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use mintlist_crypto::{MerkleHasher, MerkleProof};
use mintlist_types::Digest;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::client::{LaunchpadClient, TxReceipt};
use crate::error::{LaunchpadError, LaunchpadResult};
use crate::message::{ExecuteMsg, LaunchInfo, QueryMsg, WhitelistStatus};

/// A mint the launchpad accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintRecord {
    pub contract_address: String,
    pub receiver_address: String,
}

/// An in-memory implementation of [`LaunchpadClient`].
#[derive(Debug)]
pub struct InMemoryLaunchpad {
    address: String,
    admin: String,
    hasher: MerkleHasher,
    launches: RwLock<HashMap<String, LaunchInfo>>,
    mints: RwLock<Vec<MintRecord>>,
    tx_seq: AtomicU64,
}

impl InMemoryLaunchpad {
    /// Create an empty launchpad reachable at `address`, administered by
    /// `admin`. Only the admin registers launches.
    pub fn new(
        address: impl Into<String>,
        admin: impl Into<String>,
        hasher: MerkleHasher,
    ) -> Self {
        Self {
            address: address.into(),
            admin: admin.into(),
            hasher,
            launches: RwLock::new(HashMap::new()),
            mints: RwLock::new(Vec::new()),
            tx_seq: AtomicU64::new(0),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// Accepted mints, in submission order.
    pub async fn mints(&self) -> Vec<MintRecord> {
        self.mints.read().await.clone()
    }

    /// Root currently held for a launch.
    pub async fn whitelist_root(&self, contract_address: &str) -> Option<String> {
        self.launches
            .read()
            .await
            .get(contract_address)
            .and_then(|launch| launch.whitelist_merkle_root.clone())
    }

    fn ensure_address(&self, launchpad: &str) -> LaunchpadResult<()> {
        if launchpad != self.address {
            return Err(LaunchpadError::Transport(format!(
                "no launchpad contract at {launchpad}"
            )));
        }
        Ok(())
    }

    fn receipt(&self, msg: &ExecuteMsg) -> LaunchpadResult<TxReceipt> {
        let seq = self.tx_seq.fetch_add(1, Ordering::Relaxed);
        let mut payload = serde_json::to_vec(msg)?;
        payload.extend_from_slice(&seq.to_be_bytes());
        Ok(TxReceipt {
            transaction_hash: self.hasher.hash(&payload).to_hex().to_uppercase(),
        })
    }

    async fn add_launch(
        &self,
        sender: &str,
        owner_address: &str,
        contract_address: &str,
        root: Option<&str>,
    ) -> LaunchpadResult<()> {
        if sender != self.admin {
            return Err(LaunchpadError::Unauthorized(format!(
                "{sender} is not the launchpad admin"
            )));
        }
        let root = root.map(normalize_root).transpose()?;
        let mut launches = self.launches.write().await;
        if launches.contains_key(contract_address) {
            return Err(LaunchpadError::LaunchAlreadyExists(
                contract_address.to_string(),
            ));
        }
        launches.insert(
            contract_address.to_string(),
            LaunchInfo {
                contract_address: contract_address.to_string(),
                owner_address: owner_address.to_string(),
                whitelist_merkle_root: root,
            },
        );
        info!(contract = contract_address, "launch added");
        Ok(())
    }

    async fn modify_launch(
        &self,
        sender: &str,
        contract_address: &str,
        root: Option<&str>,
    ) -> LaunchpadResult<()> {
        let root = root.map(normalize_root).transpose()?;
        let mut launches = self.launches.write().await;
        let launch = launches
            .get_mut(contract_address)
            .ok_or_else(|| LaunchpadError::LaunchNotFound(contract_address.to_string()))?;
        if sender != launch.owner_address && sender != self.admin {
            return Err(LaunchpadError::Unauthorized(format!(
                "{sender} does not own launch {contract_address}"
            )));
        }
        if let Some(root) = root {
            info!(contract = contract_address, root = %root, "whitelist root replaced");
            launch.whitelist_merkle_root = Some(root);
        }
        Ok(())
    }

    async fn mint(
        &self,
        sender: &str,
        contract_address: &str,
        receiver_address: Option<&str>,
        proof: Option<&[String]>,
    ) -> LaunchpadResult<()> {
        let root = {
            let launches = self.launches.read().await;
            let launch = launches
                .get(contract_address)
                .ok_or_else(|| LaunchpadError::LaunchNotFound(contract_address.to_string()))?;
            launch.whitelist_merkle_root.clone()
        };

        // The sender is what gets proven, not the receiver.
        if let Some(root) = root {
            let admitted = proof.is_some_and(|proof| self.verify_wire(sender, proof, &root));
            if !admitted {
                warn!(contract = contract_address, sender, "mint rejected: not whitelisted");
                return Err(LaunchpadError::NotWhitelisted(sender.to_string()));
            }
        }

        let receiver = receiver_address.unwrap_or(sender).to_string();
        debug!(contract = contract_address, receiver = %receiver, "mint accepted");
        self.mints.write().await.push(MintRecord {
            contract_address: contract_address.to_string(),
            receiver_address: receiver,
        });
        Ok(())
    }

    /// Contract-side membership check over wire-form strings.
    fn verify_wire(&self, account: &str, proof: &[String], root: &str) -> bool {
        let Ok(root) = Digest::from_wire_hex(root) else {
            return false;
        };
        let siblings = proof
            .iter()
            .map(|entry| Digest::from_wire_hex(entry))
            .collect::<Result<Vec<_>, _>>();
        match siblings {
            Ok(siblings) => MerkleProof::new(siblings).verify(&self.hasher, account, &root),
            Err(_) => false,
        }
    }
}

fn normalize_root(root: &str) -> LaunchpadResult<String> {
    Ok(Digest::from_wire_hex(root)?.to_hex())
}

#[async_trait]
impl LaunchpadClient for InMemoryLaunchpad {
    async fn execute(
        &self,
        sender: &str,
        launchpad: &str,
        msg: &ExecuteMsg,
    ) -> LaunchpadResult<TxReceipt> {
        self.ensure_address(launchpad)?;
        match msg {
            ExecuteMsg::AddLaunch {
                owner_address,
                contract_address,
                whitelist_merkle_root,
            } => {
                self.add_launch(
                    sender,
                    owner_address,
                    contract_address,
                    whitelist_merkle_root.as_deref(),
                )
                .await?
            }
            ExecuteMsg::ModifyLaunch {
                contract_address,
                whitelist_merkle_root,
            } => {
                self.modify_launch(sender, contract_address, whitelist_merkle_root.as_deref())
                    .await?
            }
            ExecuteMsg::Mint {
                contract_address,
                receiver_address,
                proof,
            } => {
                self.mint(
                    sender,
                    contract_address,
                    receiver_address.as_deref(),
                    proof.as_deref(),
                )
                .await?
            }
        }
        self.receipt(msg)
    }

    async fn query(&self, launchpad: &str, msg: &QueryMsg) -> LaunchpadResult<serde_json::Value> {
        self.ensure_address(launchpad)?;
        let launches = self.launches.read().await;
        match msg {
            QueryMsg::GetLaunch { contract_address } => {
                let launch = launches
                    .get(contract_address)
                    .ok_or_else(|| LaunchpadError::LaunchNotFound(contract_address.clone()))?;
                Ok(serde_json::to_value(launch)?)
            }
            QueryMsg::GetWhitelistStatus {
                contract_address,
                account_address,
                proof,
            } => {
                let launch = launches
                    .get(contract_address)
                    .ok_or_else(|| LaunchpadError::LaunchNotFound(contract_address.clone()))?;
                let root = launch
                    .whitelist_merkle_root
                    .as_deref()
                    .ok_or_else(|| LaunchpadError::NoWhitelistRoot(contract_address.clone()))?;
                let status = WhitelistStatus {
                    is_whitelist: self.verify_wire(account_address, proof, root),
                };
                Ok(serde_json::to_value(status)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintlist_crypto::MerkleTree;

    const PAD: &str = "launchpad1";
    const NFT: &str = "nft1";
    const ADMIN: &str = "admin1";
    const OWNER: &str = "owner1";

    fn tree() -> MerkleTree {
        MerkleTree::build(MerkleHasher::SHA256, ["addrA", "addrB", "addrC", "addrD"]).unwrap()
    }

    async fn launchpad_with_root(root: Option<String>) -> InMemoryLaunchpad {
        let pad = InMemoryLaunchpad::new(PAD, ADMIN, MerkleHasher::SHA256);
        pad.execute(
            ADMIN,
            PAD,
            &ExecuteMsg::AddLaunch {
                owner_address: OWNER.into(),
                contract_address: NFT.into(),
                whitelist_merkle_root: root,
            },
        )
        .await
        .unwrap();
        pad
    }

    fn status_query(account: &str, proof: Vec<String>) -> QueryMsg {
        QueryMsg::GetWhitelistStatus {
            contract_address: NFT.into(),
            account_address: account.into(),
            proof,
        }
    }

    #[tokio::test]
    async fn whitelist_status_replays_proof() {
        let tree = tree();
        let pad = launchpad_with_root(Some(tree.root().to_hex())).await;
        let proof = tree.prove("addrB").unwrap().to_hex_strings();

        let member = pad.query(PAD, &status_query("addrB", proof.clone())).await.unwrap();
        assert_eq!(member, serde_json::json!({"is_whitelist": true}));

        let outsider = pad.query(PAD, &status_query("addrE", proof)).await.unwrap();
        assert_eq!(outsider, serde_json::json!({"is_whitelist": false}));
    }

    #[tokio::test]
    async fn malformed_proof_is_not_an_error() {
        let pad = launchpad_with_root(Some(tree().root().to_hex())).await;
        let value = pad
            .query(PAD, &status_query("addrB", vec!["garbage".into()]))
            .await
            .unwrap();
        assert_eq!(value["is_whitelist"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn status_without_root_is_error() {
        let pad = launchpad_with_root(None).await;
        let err = pad.query(PAD, &status_query("addrB", vec![])).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::NoWhitelistRoot(_)));
    }

    #[tokio::test]
    async fn only_owner_replaces_root() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::ModifyLaunch {
            contract_address: NFT.into(),
            whitelist_merkle_root: Some(tree().root().to_hex()),
        };
        let err = pad.execute("intruder", PAD, &msg).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::Unauthorized(_)));
        assert!(pad.whitelist_root(NFT).await.is_none());

        pad.execute(OWNER, PAD, &msg).await.unwrap();
        assert_eq!(pad.whitelist_root(NFT).await, Some(tree().root().to_hex()));
    }

    #[tokio::test]
    async fn invalid_root_is_rejected() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::ModifyLaunch {
            contract_address: NFT.into(),
            whitelist_merkle_root: Some("beef".into()),
        };
        assert!(matches!(
            pad.execute(OWNER, PAD, &msg).await,
            Err(LaunchpadError::Type(_))
        ));
    }

    #[tokio::test]
    async fn mint_checks_sender_membership() {
        let tree = tree();
        let pad = launchpad_with_root(Some(tree.root().to_hex())).await;
        let proof = tree.prove("addrA").unwrap().to_hex_strings();

        let mint = |proof: Option<Vec<String>>| ExecuteMsg::Mint {
            contract_address: NFT.into(),
            receiver_address: Some("friend1".into()),
            proof,
        };

        let receipt = pad.execute("addrA", PAD, &mint(Some(proof.clone()))).await.unwrap();
        assert_eq!(receipt.transaction_hash.len(), 64);

        let err = pad.execute("addrE", PAD, &mint(Some(proof))).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::NotWhitelisted(_)));
        let err = pad.execute("addrA", PAD, &mint(None)).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::NotWhitelisted(_)));

        assert_eq!(
            pad.mints().await,
            vec![MintRecord {
                contract_address: NFT.into(),
                receiver_address: "friend1".into(),
            }]
        );
    }

    #[tokio::test]
    async fn open_launch_needs_no_proof() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::Mint {
            contract_address: NFT.into(),
            receiver_address: None,
            proof: None,
        };
        pad.execute("anyone", PAD, &msg).await.unwrap();
        assert_eq!(pad.mints().await[0].receiver_address, "anyone");
    }

    #[tokio::test]
    async fn wrong_launchpad_address_is_transport_error() {
        let pad = InMemoryLaunchpad::new(PAD, ADMIN, MerkleHasher::SHA256);
        let err = pad
            .query("elsewhere", &QueryMsg::GetLaunch { contract_address: NFT.into() })
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchpadError::Transport(_)));
    }

    #[tokio::test]
    async fn duplicate_launch_is_rejected() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::AddLaunch {
            owner_address: OWNER.into(),
            contract_address: NFT.into(),
            whitelist_merkle_root: None,
        };
        assert!(matches!(
            pad.execute(ADMIN, PAD, &msg).await,
            Err(LaunchpadError::LaunchAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn only_admin_adds_launches() {
        let pad = InMemoryLaunchpad::new(PAD, ADMIN, MerkleHasher::SHA256);
        let msg = ExecuteMsg::AddLaunch {
            owner_address: "intruder".into(),
            contract_address: NFT.into(),
            whitelist_merkle_root: None,
        };
        let err = pad.execute("intruder", PAD, &msg).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::Unauthorized(_)));
        let err = pad
            .query(PAD, &QueryMsg::GetLaunch { contract_address: NFT.into() })
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchpadError::LaunchNotFound(_)));

        pad.execute(ADMIN, PAD, &msg).await.unwrap();
    }

    #[tokio::test]
    async fn admin_may_replace_root() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::ModifyLaunch {
            contract_address: NFT.into(),
            whitelist_merkle_root: Some(tree().root().to_hex()),
        };
        pad.execute(ADMIN, PAD, &msg).await.unwrap();
        assert_eq!(pad.whitelist_root(NFT).await, Some(tree().root().to_hex()));
    }

    #[tokio::test]
    async fn prefixed_root_is_rejected() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::ModifyLaunch {
            contract_address: NFT.into(),
            whitelist_merkle_root: Some(format!("0x{}", tree().root().to_hex())),
        };
        assert!(matches!(
            pad.execute(OWNER, PAD, &msg).await,
            Err(LaunchpadError::Type(_))
        ));
        assert!(pad.whitelist_root(NFT).await.is_none());
    }

    #[tokio::test]
    async fn prefixed_proof_is_not_whitelisted() {
        let tree = tree();
        let pad = launchpad_with_root(Some(tree.root().to_hex())).await;
        let prefixed: Vec<String> = tree
            .prove("addrB")
            .unwrap()
            .to_hex_strings()
            .into_iter()
            .map(|entry| format!("0x{entry}"))
            .collect();

        let value = pad.query(PAD, &status_query("addrB", prefixed.clone())).await.unwrap();
        assert_eq!(value, serde_json::json!({"is_whitelist": false}));

        let mint = ExecuteMsg::Mint {
            contract_address: NFT.into(),
            receiver_address: None,
            proof: Some(prefixed),
        };
        let err = pad.execute("addrB", PAD, &mint).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::NotWhitelisted(_)));
    }

    #[tokio::test]
    async fn receipts_are_unique() {
        let pad = launchpad_with_root(None).await;
        let msg = ExecuteMsg::Mint {
            contract_address: NFT.into(),
            receiver_address: None,
            proof: None,
        };
        let a = pad.execute("x", PAD, &msg).await.unwrap();
        let b = pad.execute("x", PAD, &msg).await.unwrap();
        assert_ne!(a, b);
    }
}
