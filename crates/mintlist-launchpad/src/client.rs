use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LaunchpadResult;
use crate::message::{ExecuteMsg, QueryMsg};

/// Outcome of an executed call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: String,
}

/// Signing transport to a launchpad contract.
///
/// Wallet loading, fees, and retries belong to the implementation. Calls are
/// fire-and-await.
#[async_trait]
pub trait LaunchpadClient: Send + Sync {
    /// Sign and submit `msg` from `sender` to the launchpad at `launchpad`.
    async fn execute(
        &self,
        sender: &str,
        launchpad: &str,
        msg: &ExecuteMsg,
    ) -> LaunchpadResult<TxReceipt>;

    /// Read launchpad state.
    async fn query(&self, launchpad: &str, msg: &QueryMsg) -> LaunchpadResult<serde_json::Value>;
}
