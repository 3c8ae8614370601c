use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use symnmf_pipeline::{
    compare_clusterings, finish, init_logging, parse_cluster_count, read_vectors,
};

#[derive(Parser, Debug)]
#[command(
    about = "Silhouette scores of SymNMF and k-means clusterings",
    allow_negative_numbers = true
)]
struct Args {
    /// Number of clusters.
    k: String,
    input: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<String> {
    let k = parse_cluster_count(&args.k)?;
    let vectors = read_vectors(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    Ok(compare_clusterings(&vectors, k)?.to_string())
}

fn main() -> ExitCode {
    init_logging();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return finish(Err(err.into())),
    };
    finish(run(&args))
}
