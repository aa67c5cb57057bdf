//! Ism Inspect Binary
//!
//! Prints the footer and shard index of an Ism file.

use std::path::PathBuf;

use clap::Parser;
use ismfile::shard::is_metadata_shard;
use ismfile::read_trailer;
use tracing_subscriber::{fmt, EnvFilter};

/// Ism file inspector
#[derive(Parser, Debug)]
#[command(name = "ism-inspect")]
#[command(about = "Print the footer and shard index of an Ism file")]
#[command(version)]
struct Args {
    /// Path to the Ism file
    path: PathBuf,

    /// List every shard descriptor
    #[arg(short, long)]
    shards: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ismfile=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("ism-inspect v{}", ismfile::VERSION);
    tracing::info!("File: {}", args.path.display());

    let trailer = match read_trailer(&args.path) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to read trailer: {}", e);
            std::process::exit(1);
        }
    };

    println!("file size:        {}", trailer.file_size);
    println!("{}", trailer.footer);
    println!(
        "shards:           {} ({} record, {} metadata)",
        trailer.shards.len(),
        trailer.record_shards().count(),
        trailer.metadata_shards().count()
    );

    if args.shards {
        for shard in &trailer.shards {
            let kind = if is_metadata_shard(shard.id()) {
                "metadata"
            } else {
                "record"
            };
            println!("  {} [{}]", shard, kind);
        }
    }
}
