mod utils_main;

use anyhow::{bail, Context, Result};
use block_builder::{
    build_block, check_block, find_unreachable, load_candidates_from_file, Config,
    DuplicatePolicy, ParentEncoding, RootFilter, ValidationResult,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utils_main::{output_block, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "block-builder", about = "Greedy dependency-aware block builder", version)]
struct Cli {
    /// Mempool file with one `txid,fee,weight[,parents...]` record per line
    #[arg(default_value = "./mempool.csv")]
    mempool: PathBuf,

    /// TOML config file, `BLOCK_BUILDER_*` environment variables override it
    #[arg(long, short, env = "BLOCK_BUILDER_CONFIG")]
    config: Option<PathBuf>,

    /// Keep transactions without parents in the block
    #[arg(long)]
    keep_roots: bool,

    /// How parent txids are encoded after the weight field
    #[arg(long, value_enum)]
    parent_encoding: Option<ParentEncodingArg>,

    /// What to do with repeated txids
    #[arg(long, value_enum)]
    duplicates: Option<DuplicatePolicyArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,

    /// Write the block to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log why each unselected transaction could never be included
    #[arg(long)]
    report_unreachable: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParentEncodingArg {
    Trailing,
    Semicolon,
    FirstOnly,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DuplicatePolicyArg {
    Reject,
    KeepFirst,
}

impl From<ParentEncodingArg> for ParentEncoding {
    fn from(arg: ParentEncodingArg) -> Self {
        match arg {
            ParentEncodingArg::Trailing => ParentEncoding::TrailingFields,
            ParentEncodingArg::Semicolon => ParentEncoding::SubDelimited,
            ParentEncodingArg::FirstOnly => ParentEncoding::FirstFieldOnly,
        }
    }
}

impl From<DuplicatePolicyArg> for DuplicatePolicy {
    fn from(arg: DuplicatePolicyArg) -> Self {
        match arg {
            DuplicatePolicyArg::Reject => DuplicatePolicy::Reject,
            DuplicatePolicyArg::KeepFirst => DuplicatePolicy::KeepFirst,
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// config file (or environment only) first, command line flags override it
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::from_env().context("failed to read config from environment")?,
    };

    if cli.keep_roots {
        config.builder.root_filter = RootFilter::KeepAll;
    }
    if let Some(encoding) = cli.parent_encoding {
        config.loader.parent_encoding = encoding.into();
    }
    if let Some(policy) = cli.duplicates {
        config.loader.duplicate_policy = policy.into();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;

    // parses all mempool records into an insertion ordered candidate set
    let candidates = load_candidates_from_file(&cli.mempool, &config.loader)
        .with_context(|| format!("failed to load mempool {}", cli.mempool.display()))?;

    let block = build_block(&candidates, &config.builder);

    // the selection loop must never emit a child before its parent or a txid twice
    if let ValidationResult::Invalid(reason) = check_block(&candidates, &block.selected) {
        bail!("built block is invalid: {reason}");
    }

    if cli.report_unreachable {
        for entry in find_unreachable(&candidates, &block.selected) {
            warn!("unreachable {}", entry);
        }
    }

    output_block(&block, cli.format, cli.output.as_deref())?;

    info!(
        candidates = candidates.len(),
        transactions = block.len(),
        total_fee = block.total_fee,
        total_weight = block.total_weight,
        "done"
    );
    Ok(())
}
