use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mintlist_crypto::HashAlgorithm;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "mintlist",
    about = "Merkle whitelist tooling for launchpad mints",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file (defaults to ./mintlist.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Whitelist JSON file
    #[arg(short, long, global = true)]
    pub list: Option<PathBuf>,

    /// Hash algorithm: sha256 or blake3
    #[arg(long, global = true)]
    pub algorithm: Option<HashAlgorithm>,

    /// NFT contract the launch belongs to
    #[arg(long, global = true)]
    pub nft: Option<String>,

    /// Launchpad contract address
    #[arg(long, global = true)]
    pub launchpad: Option<String>,

    /// Sender of configuration updates
    #[arg(long, global = true)]
    pub sender: Option<String>,
}

impl Cli {
    /// Overlay flag values on a loaded config.
    pub fn apply(&self, mut config: CliConfig) -> CliConfig {
        if let Some(list) = &self.list {
            config.whitelist_path = list.clone();
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(nft) = &self.nft {
            config.nft_contract_address = nft.clone();
        }
        if let Some(launchpad) = &self.launchpad {
            config.launchpad_address = launchpad.clone();
        }
        if let Some(sender) = &self.sender {
            config.sender_address = sender.clone();
        }
        config
    }
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the tree and print its root
    Root(RootArgs),
    /// Print the membership proof for an address
    Prove(ProveArgs),
    /// Check a proof against a root
    Verify(VerifyArgs),
    /// Write every member's proof to one JSON file
    Manifest(ManifestArgs),
    /// Print the configuration update that publishes the root
    PublishMsg(PublishMsgArgs),
    /// Print a whitelist status query for an address
    StatusMsg(StatusMsgArgs),
    /// Print a whitelist mint request for an address
    MintMsg(MintMsgArgs),
    /// Publish to an in-memory launchpad and query an address
    Simulate(SimulateArgs),
}

#[derive(Args)]
pub struct RootArgs {}

#[derive(Args)]
pub struct ProveArgs {
    pub address: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub address: String,
    #[arg(long)]
    pub root: String,
    /// Sibling digests, bottom to top
    #[arg(long, value_delimiter = ',')]
    pub proof: Vec<String>,
}

#[derive(Args)]
pub struct ManifestArgs {
    #[arg(short, long, default_value = "proofs.json")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct PublishMsgArgs {}

#[derive(Args)]
pub struct StatusMsgArgs {
    pub address: String,
}

#[derive(Args)]
pub struct MintMsgArgs {
    pub address: String,
    #[arg(long)]
    pub receiver: Option<String>,
}

#[derive(Args)]
pub struct SimulateArgs {
    pub address: String,
}
