//! canopy CLI - build a Merkle tree from an entries file and inspect it
//!
//! Each invocation builds the tree in memory from a JSON file of
//! `{"label": ..., "value": ...}` records; the entry key is SHA-256 of the
//! label and the value is the UTF-8 bytes of `value`.

use anyhow::Context;
use canopy::{Digest, DuplicatePolicy, Entry, MerkleTree, TreeConfig};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "An append-biased Merkle tree with deletion and inclusion proofs")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Path to a JSON tree config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject entries equal to one already in the tree
    #[arg(long)]
    reject_duplicates: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the root digest
    Root {
        /// Entries file
        entries: PathBuf,
        /// Delete an entry after building, as LABEL=VALUE (repeatable)
        #[arg(short, long)]
        delete: Vec<String>,
    },

    /// Print the tree structure
    Show {
        /// Entries file
        entries: PathBuf,
    },

    /// Generate the Merkle path of an entry
    Prove {
        /// Entries file
        entries: PathBuf,
        /// Entry label
        label: String,
        /// Entry value
        value: String,
    },

    /// Verify a Merkle path against the tree's root
    Verify {
        /// Entries file
        entries: PathBuf,
        /// Entry label
        label: String,
        /// Entry value
        value: String,
        /// Leaf position of the entry
        #[arg(short, long)]
        position: usize,
        /// Sibling digest in hex, nearest the leaf first (repeatable)
        #[arg(short, long)]
        sibling: Vec<String>,
    },
}

#[derive(Deserialize)]
struct EntryRecord {
    label: String,
    value: String,
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        Entry::labeled(record.label, record.value)
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        output(
            &cli.format,
            &serde_json::json!({
                "status": "error",
                "message": format!("{:#}", err)
            }),
        );
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Root { entries, delete } => {
            let mut tree = build_tree(entries, config)?;
            for arg in delete {
                let entry = parse_entry_arg(arg)?;
                tree.delete(&entry)
                    .with_context(|| format!("deleting {}", arg))?;
            }
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "root": tree.root_hash(),
                    "depth": tree.depth(),
                    "leaves": tree.len()
                }),
            );
        }

        Commands::Show { entries } => {
            let tree = build_tree(entries, config)?;
            match cli.format {
                OutputFormat::Text => print!("{}", tree),
                OutputFormat::Json => output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "root": tree.root_hash(),
                        "tree": tree.to_string()
                    }),
                ),
            }
        }

        Commands::Prove {
            entries,
            label,
            value,
        } => {
            let tree = build_tree(entries, config)?;
            let entry = Entry::labeled(label, value.as_str());
            let path = tree.generate_merkle_path(&entry)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "root": tree.root_hash(),
                    "position": path.position,
                    "siblings": path.siblings
                }),
            );
        }

        Commands::Verify {
            entries,
            label,
            value,
            position,
            sibling,
        } => {
            let tree = build_tree(entries, config)?;
            let entry = Entry::labeled(label, value.as_str());
            let siblings = sibling
                .iter()
                .map(|s| {
                    Digest::from_hex(s).map_err(|_| anyhow::anyhow!("Invalid digest: {}", s))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let valid = tree.verify_merkle_path(&entry, *position, &siblings);
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "valid": valid,
                    "root": tree.root_hash()
                }),
            );
            if !valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => TreeConfig::load(path)?,
        None => TreeConfig::default(),
    };
    if cli.reject_duplicates {
        config = config.with_duplicates(DuplicatePolicy::Reject);
    }
    log::debug!("using config {:?}", config);
    Ok(config)
}

fn build_tree(path: &Path, config: TreeConfig) -> anyhow::Result<MerkleTree> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading entries file {}", path.display()))?;
    let records: Vec<EntryRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing entries file {}", path.display()))?;

    log::debug!("building tree from {} entries", records.len());
    let tree = MerkleTree::from_entries(config, records.into_iter().map(Entry::from))?;
    Ok(tree)
}

fn parse_entry_arg(arg: &str) -> anyhow::Result<Entry> {
    let (label, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected LABEL=VALUE, got: {}", arg))?;
    Ok(Entry::labeled(label, value))
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(s) => println!("{}", s),
        Err(err) => log::error!("failed to render output: {}", err),
    }
}
