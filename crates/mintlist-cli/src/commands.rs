use anyhow::Context;
use colored::Colorize;
use mintlist_crypto::{verify_membership, MerkleHasher};
use mintlist_launchpad::{ExecuteMsg, InMemoryLaunchpad, LaunchpadClient, Whitelist};
use serde::Serialize;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = cli.apply(CliConfig::resolve(cli.config.as_deref())?);
    let format = cli.format.clone();
    match cli.command {
        Command::Root(_) => cmd_root(&config, &format),
        Command::Prove(args) => cmd_prove(&config, &format, args),
        Command::Verify(args) => cmd_verify(&config, &format, args),
        Command::Manifest(args) => cmd_manifest(&config, args),
        Command::PublishMsg(_) => cmd_publish_msg(&config),
        Command::StatusMsg(args) => cmd_status_msg(&config, args),
        Command::MintMsg(args) => cmd_mint_msg(&config, args),
        Command::Simulate(args) => cmd_simulate(&config, &format, args),
    }
}

fn load_whitelist(config: &CliConfig) -> anyhow::Result<Whitelist> {
    Whitelist::load(MerkleHasher::new(config.algorithm), &config.whitelist_path)
        .with_context(|| format!("failed to load whitelist {}", config.whitelist_path.display()))
}

fn require<'a>(value: &'a str, flag: &str) -> anyhow::Result<&'a str> {
    if value.is_empty() {
        anyhow::bail!("missing {flag} (set it in mintlist.toml or pass --{flag})");
    }
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_root(config: &CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let tree = whitelist.tree();
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "root": tree.root(),
            "algorithm": tree.algorithm(),
            "leaves": tree.leaf_count(),
            "depth": tree.depth(),
        })),
        OutputFormat::Text => {
            println!(
                "{} Whitelist root {}",
                "✓".green().bold(),
                tree.root().to_string().yellow()
            );
            println!("  Addresses: {}", tree.leaf_count().to_string().bold());
            println!("  Depth: {}", tree.depth());
            println!("  Algorithm: {}", tree.algorithm().to_string().cyan());
            Ok(())
        }
    }
}

fn cmd_prove(config: &CliConfig, format: &OutputFormat, args: ProveArgs) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let proof = whitelist.proof_for(&args.address)?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "address": args.address,
            "root": whitelist.root(),
            "proof": proof,
        })),
        OutputFormat::Text => {
            println!("Proof for {} ({} entries)", args.address.bold(), proof.len());
            for entry in &proof {
                println!("  {}", entry.dimmed());
            }
            Ok(())
        }
    }
}

fn cmd_verify(config: &CliConfig, format: &OutputFormat, args: VerifyArgs) -> anyhow::Result<()> {
    let hasher = MerkleHasher::new(config.algorithm);
    let member = verify_membership(&hasher, &args.address, &args.proof, &args.root);
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "address": args.address,
            "is_whitelist": member,
        }))?,
        OutputFormat::Text if member => {
            println!("{} {} is whitelisted", "✓".green().bold(), args.address.bold())
        }
        OutputFormat::Text => {
            println!("{} {} is not whitelisted", "✗".red().bold(), args.address.bold())
        }
    }
    if !member {
        anyhow::bail!("proof does not verify against root {}", args.root);
    }
    Ok(())
}

fn cmd_manifest(config: &CliConfig, args: ManifestArgs) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let manifest = whitelist.manifest()?;
    manifest
        .write(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "{} Wrote {} proofs to {}",
        "✓".green().bold(),
        manifest.len(),
        args.output.display().to_string().bold()
    );
    Ok(())
}

fn cmd_publish_msg(config: &CliConfig) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let nft = require(&config.nft_contract_address, "nft")?;
    print_json(&whitelist.publish_message(nft))
}

fn cmd_status_msg(config: &CliConfig, args: StatusMsgArgs) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let nft = require(&config.nft_contract_address, "nft")?;
    print_json(&whitelist.status_query(nft, &args.address))
}

fn cmd_mint_msg(config: &CliConfig, args: MintMsgArgs) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let nft = require(&config.nft_contract_address, "nft")?;
    let msg = whitelist.mint_message(nft, &args.address, args.receiver.as_deref())?;
    print_json(&msg)
}

fn cmd_simulate(
    config: &CliConfig,
    format: &OutputFormat,
    args: SimulateArgs,
) -> anyhow::Result<()> {
    let whitelist = load_whitelist(config)?;
    let launchpad = non_empty_or(&config.launchpad_address, "launchpad-sim");
    let nft = non_empty_or(&config.nft_contract_address, "nft-sim");
    let owner = non_empty_or(&config.sender_address, "owner-sim");

    let runtime = tokio::runtime::Runtime::new()?;
    let member = runtime.block_on(async {
        let pad = InMemoryLaunchpad::new(launchpad, owner, whitelist.tree().hasher());
        let add = ExecuteMsg::AddLaunch {
            owner_address: owner.to_string(),
            contract_address: nft.to_string(),
            whitelist_merkle_root: None,
        };
        pad.execute(owner, launchpad, &add).await?;
        whitelist.publish_root(&pad, owner, launchpad, nft).await?;
        whitelist.ensure_published(&pad, launchpad, nft).await?;
        whitelist
            .whitelist_status(&pad, launchpad, nft, &args.address)
            .await
    })?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "address": args.address,
            "root": whitelist.root(),
            "is_whitelist": member,
        })),
        OutputFormat::Text => {
            let verdict = if member { "whitelisted".green() } else { "not whitelisted".red() };
            println!(
                "Simulated launchpad {} holding root {}",
                launchpad.bold(),
                whitelist.root().short_hex().yellow()
            );
            println!("  {} is {}", args.address.bold(), verdict);
            Ok(())
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
