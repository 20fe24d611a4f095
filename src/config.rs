//! Command line and environment configuration.

use clap::{Args, Parser, Subcommand};

/// Embedding width of the upstream model the service was built for.
pub const DEFAULT_DIM: usize = 768;
pub const DEFAULT_BIND: &str = "0.0.0.0:7878";
/// Number of results when a search request omits `top_k`.
pub const DEFAULT_TOP_K: i64 = 5;
/// 64 MiB; actix's 2 MiB default rejects modest batches of 768-d vectors.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Dimensions must be positive.
fn parse_dim(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("dimension must be at least 1".to_string()),
        Ok(dim) => Ok(dim),
        Err(e) => Err(format!("invalid dimension '{}': {}", raw, e)),
    }
}

#[derive(Debug, Parser)]
#[command(name = "simdb", version, about = "In-memory exact cosine similarity index")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// REPL settings when no subcommand is given
    #[command(flatten)]
    pub repl: ReplConfig,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the index over HTTP
    Serve(ServeConfig),
    /// Interactive session against an in-memory index
    Repl(ReplConfig),
}

#[derive(Debug, Clone, Args)]
pub struct ServeConfig {
    /// Vector dimension accepted by the index
    #[arg(long, env = "SIMDB_DIM", default_value_t = DEFAULT_DIM, value_parser = parse_dim)]
    pub dim: usize,

    /// Address to listen on
    #[arg(long, env = "SIMDB_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Largest accepted JSON request body
    #[arg(long, env = "SIMDB_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ReplConfig {
    /// Vector dimension accepted by the index
    #[arg(long, env = "SIMDB_DIM", default_value_t = DEFAULT_DIM, value_parser = parse_dim)]
    pub dim: usize,
}
