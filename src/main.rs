//! `gen-tiling-data`: generate the kernel tiling header.
//!
//! Usage:
//!   gen-tiling-data <source-root> <destination-header> [--config gen.toml] [--lenient]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use tiling_data_gen::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(name = "gen-tiling-data")]
#[command(about = "Generate packed tiling-data structs from *tilingdata.h description files")]
struct Args {
    /// Directory searched recursively for description files.
    source_root: PathBuf,

    /// Generated header path (parent directories are created).
    destination: PathBuf,

    /// Optional TOML file overriding the generator defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit malformed struct nesting as-is instead of failing.
    #[arg(long)]
    lenient: bool,

    /// Anything after the two paths is accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    extra: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.extra.is_empty() {
        warn!("ignoring extra arguments: {}", args.extra.join(" "));
    }

    let mut config = GeneratorConfig::load(args.config.as_deref())?;
    if args.lenient {
        config.strict = false;
    }

    info!(
        "source root: {}, destination: {}",
        args.source_root.display(),
        args.destination.display()
    );

    let header = tiling_data_gen::generate(&args.source_root, &args.destination, &config)
        .with_context(|| format!("generating {}", args.destination.display()))?;

    info!(
        "wrote {} ({} description files)",
        args.destination.display(),
        header.sources.len()
    );
    Ok(())
}
