//! `reef` — consistent-hash ring demonstration CLI.
//!
//! # Usage
//!
//! ```text
//! reef resolve -n 192.168.0.1 -n 192.168.0.2 helloworld   # resolve keys
//! reef resolve -c reef.toml helloworld other-key          # nodes from config
//! reef spread -n a -n b -n c -k 10000                     # distribution check
//! ```

mod config;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use reef_ring::Ring;
use tracing::info;

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "reef",
    version,
    about = "Resolve keys to nodes on a consistent-hash ring"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve keys to nodes.
    Resolve {
        /// Node to register (repeatable; merged with config nodes).
        #[arg(short, long = "node")]
        node: Vec<String>,

        /// Keys to resolve.
        #[arg(required = true)]
        key: Vec<String>,
    },

    /// Show how synthetic keys distribute across nodes.
    Spread {
        /// Node to register (repeatable; merged with config nodes).
        #[arg(short, long = "node")]
        node: Vec<String>,

        /// Number of synthetic keys to resolve.
        #[arg(short = 'k', long, default_value = "10000")]
        count: usize,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    match cli.command {
        Commands::Resolve { node, key } => cmd_resolve(&config, &node, &key),
        Commands::Spread { node, count } => cmd_spread(&config, &node, count),
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// -----------------------------------------------------------------------
// Ring construction
// -----------------------------------------------------------------------

/// Build a ring from the config's nodes plus CLI-supplied ones.
fn build_ring(config: &CliConfig, extra: &[String]) -> Result<Ring> {
    let mut ring = Ring::new(config.ring.replicas)?;
    for node in config.ring.nodes.iter().chain(extra) {
        ring.add_node(node)?;
    }
    if ring.is_empty() {
        bail!("no nodes: pass --node or list them under [ring] nodes in the config");
    }
    Ok(ring)
}

// -----------------------------------------------------------------------
// reef resolve
// -----------------------------------------------------------------------

fn cmd_resolve(config: &CliConfig, nodes: &[String], keys: &[String]) -> Result<()> {
    let ring = build_ring(config, nodes)?;
    info!(
        nodes = ring.node_count(),
        points = ring.point_count(),
        "ring ready"
    );

    for key in keys {
        let node = ring.get_node(key)?;
        println!("{key} -> {node}");
    }

    Ok(())
}

// -----------------------------------------------------------------------
// reef spread
// -----------------------------------------------------------------------

fn cmd_spread(config: &CliConfig, nodes: &[String], count: usize) -> Result<()> {
    let ring = build_ring(config, nodes)?;
    let counts = spread_counts(&ring, count)?;

    println!("Keys:     {count}");
    println!(
        "Nodes:    {} ({} points, {} per node)",
        ring.node_count(),
        ring.point_count(),
        ring.replicas()
    );
    println!();
    for (node, n) in &counts {
        let pct = 100.0 * *n as f64 / count as f64;
        println!("  {node:<24} {n:>8}  {pct:>5.1}%");
    }

    Ok(())
}

/// Resolve `count` sequence-numbered keys and tally them per node.
fn spread_counts(ring: &Ring, count: usize) -> Result<BTreeMap<String, usize>> {
    let mut counts: BTreeMap<String, usize> = ring
        .node_names()
        .into_iter()
        .map(|n| (n.to_string(), 0))
        .collect();

    for i in 0..count {
        let node = ring.get_node(&format!("key-{i}"))?;
        if let Some(tally) = counts.get_mut(node) {
            *tally += 1;
        }
    }

    Ok(counts)
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use reef_ring::RingError;

    #[test]
    fn test_cli_parses_resolve() {
        let cli = Cli::try_parse_from(["reef", "resolve", "-n", "a", "-n", "b", "helloworld"])
            .expect("CLI should parse resolve with nodes and a key");

        match cli.command {
            Commands::Resolve { node, key } => {
                assert_eq!(node, vec!["a", "b"]);
                assert_eq!(key, vec!["helloworld"]);
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_resolve_requires_key() {
        assert!(Cli::try_parse_from(["reef", "resolve", "-n", "a"]).is_err());
    }

    #[test]
    fn test_cli_spread_default_count() {
        let cli = Cli::try_parse_from(["reef", "spread", "-n", "a"])
            .expect("CLI should parse spread without a count");

        match cli.command {
            Commands::Spread { node, count } => {
                assert_eq!(node, vec!["a"]);
                assert_eq!(count, 10_000);
            }
            _ => panic!("expected Spread command"),
        }
    }

    #[test]
    fn test_build_ring_merges_config_and_flags() {
        let mut config = CliConfig::default();
        config.ring.nodes = vec!["10.0.0.1".to_string()];

        let ring = build_ring(&config, &["10.0.0.2".to_string()]).unwrap();
        assert_eq!(ring.node_count(), 2);
        assert!(ring.contains_node("10.0.0.1"));
        assert!(ring.contains_node("10.0.0.2"));
    }

    #[test]
    fn test_build_ring_without_nodes_fails() {
        let config = CliConfig::default();
        assert!(build_ring(&config, &[]).is_err());
    }

    #[test]
    fn test_build_ring_duplicate_across_sources() {
        let mut config = CliConfig::default();
        config.ring.nodes = vec!["10.0.0.1".to_string()];

        let err = build_ring(&config, &["10.0.0.1".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RingError>(),
            Some(RingError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_spread_counts_sum_to_count() {
        let config = CliConfig::default();
        let nodes: Vec<String> = ["node-a", "node-b", "node-c"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ring = build_ring(&config, &nodes).unwrap();

        let counts = spread_counts(&ring, 1_000).unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.values().sum::<usize>(), 1_000);
    }
}
