use std::path::Path;

use mintlist_crypto::{MerkleError, MerkleHasher, MerkleTree};
use mintlist_types::{parse_identity_records, Digest, Identity, TypeError};
use tracing::{debug, info};

use crate::client::{LaunchpadClient, TxReceipt};
use crate::error::{LaunchpadError, LaunchpadResult};
use crate::manifest::ProofManifest;
use crate::message::{ExecuteMsg, LaunchInfo, QueryMsg, WhitelistStatus};

/// A committed whitelist snapshot and the operations built on it.
///
/// Holds the source identities alongside the tree so proofs and manifests
/// can be produced by address. Immutable once built; share it freely across
/// tasks.
#[derive(Clone, Debug)]
pub struct Whitelist {
    identities: Vec<Identity>,
    tree: MerkleTree,
}

impl Whitelist {
    pub fn new(hasher: MerkleHasher, identities: Vec<Identity>) -> Self {
        let tree = MerkleTree::from_identities(hasher, &identities);
        Self { identities, tree }
    }

    /// Build from a JSON array of `{"address": ...}` records.
    ///
    /// A record without a usable address fails with `InvalidInput` at its
    /// index; a document that is not a JSON array is a type error.
    pub fn from_records_json(hasher: MerkleHasher, json: &str) -> LaunchpadResult<Self> {
        let identities = parse_identity_records(json).map_err(|e| match e {
            TypeError::InvalidRecord { index, reason } => {
                LaunchpadError::Merkle(MerkleError::InvalidInput { index, reason })
            }
            other => other.into(),
        })?;
        Ok(Self::new(hasher, identities))
    }

    /// Load a whitelist file.
    pub fn load(hasher: MerkleHasher, path: &Path) -> LaunchpadResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let whitelist = Self::from_records_json(hasher, &json)?;
        info!(
            path = %path.display(),
            addresses = whitelist.identities.len(),
            root = %whitelist.root(),
            "whitelist loaded"
        );
        Ok(whitelist)
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn root(&self) -> Digest {
        self.tree.root()
    }

    /// Proof for a member, in wire form.
    pub fn proof_for(&self, address: &str) -> LaunchpadResult<Vec<String>> {
        Ok(self.tree.prove(address)?.to_hex_strings())
    }

    pub fn manifest(&self) -> LaunchpadResult<ProofManifest> {
        ProofManifest::build(&self.tree, &self.identities)
    }

    /// Configuration update carrying this whitelist's root.
    pub fn publish_message(&self, nft_contract: &str) -> ExecuteMsg {
        ExecuteMsg::ModifyLaunch {
            contract_address: nft_contract.to_string(),
            whitelist_merkle_root: Some(self.root().to_hex()),
        }
    }

    /// Status query for `account`. Non-members get an empty proof, which the
    /// launchpad answers with `is_whitelist: false`.
    pub fn status_query(&self, nft_contract: &str, account: &str) -> QueryMsg {
        let proof = match self.tree.prove(account) {
            Ok(proof) => proof.to_hex_strings(),
            Err(e) => {
                debug!(account, error = %e, "querying status without proof");
                Vec::new()
            }
        };
        QueryMsg::GetWhitelistStatus {
            contract_address: nft_contract.to_string(),
            account_address: account.to_string(),
            proof,
        }
    }

    /// Mint request for `sender`. Fails with `NotFound` rather than building
    /// a request the launchpad would reject.
    pub fn mint_message(
        &self,
        nft_contract: &str,
        sender: &str,
        receiver: Option<&str>,
    ) -> LaunchpadResult<ExecuteMsg> {
        Ok(ExecuteMsg::Mint {
            contract_address: nft_contract.to_string(),
            receiver_address: receiver.map(str::to_string),
            proof: Some(self.proof_for(sender)?),
        })
    }

    /// Send this whitelist's root to the launchpad.
    pub async fn publish_root<C: LaunchpadClient + ?Sized>(
        &self,
        client: &C,
        sender: &str,
        launchpad: &str,
        nft_contract: &str,
    ) -> LaunchpadResult<TxReceipt> {
        let receipt = client
            .execute(sender, launchpad, &self.publish_message(nft_contract))
            .await?;
        info!(
            nft_contract,
            root = %self.root(),
            tx = %receipt.transaction_hash,
            "whitelist root published"
        );
        Ok(receipt)
    }

    /// Root the launchpad currently holds for `nft_contract`.
    pub async fn published_root<C: LaunchpadClient + ?Sized>(
        client: &C,
        launchpad: &str,
        nft_contract: &str,
    ) -> LaunchpadResult<Option<String>> {
        let query = QueryMsg::GetLaunch {
            contract_address: nft_contract.to_string(),
        };
        let launch: LaunchInfo = serde_json::from_value(client.query(launchpad, &query).await?)?;
        Ok(launch.whitelist_merkle_root)
    }

    /// Check the launchpad holds exactly this whitelist's root before
    /// handing out proofs for it.
    pub async fn ensure_published<C: LaunchpadClient + ?Sized>(
        &self,
        client: &C,
        launchpad: &str,
        nft_contract: &str,
    ) -> LaunchpadResult<()> {
        let published = Self::published_root(client, launchpad, nft_contract)
            .await?
            .ok_or_else(|| LaunchpadError::NoWhitelistRoot(nft_contract.to_string()))?;
        let expected = self.root();
        let matches = Digest::from_hex(&published).is_ok_and(|root| root == expected);
        if !matches {
            return Err(LaunchpadError::RootMismatch {
                expected: expected.to_hex(),
                published,
            });
        }
        Ok(())
    }

    /// Ask the launchpad whether `account` is whitelisted.
    pub async fn whitelist_status<C: LaunchpadClient + ?Sized>(
        &self,
        client: &C,
        launchpad: &str,
        nft_contract: &str,
        account: &str,
    ) -> LaunchpadResult<bool> {
        let query = self.status_query(nft_contract, account);
        let status: WhitelistStatus =
            serde_json::from_value(client.query(launchpad, &query).await?)?;
        Ok(status.is_whitelist)
    }

    /// Submit a whitelist mint for `sender`.
    pub async fn mint<C: LaunchpadClient + ?Sized>(
        &self,
        client: &C,
        sender: &str,
        launchpad: &str,
        nft_contract: &str,
        receiver: Option<&str>,
    ) -> LaunchpadResult<TxReceipt> {
        let msg = self.mint_message(nft_contract, sender, receiver)?;
        let receipt = client.execute(sender, launchpad, &msg).await?;
        info!(nft_contract, sender, tx = %receipt.transaction_hash, "whitelist mint submitted");
        Ok(receipt)
    }
}
