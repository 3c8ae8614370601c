use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use symnmf_core::format_matrix;
use symnmf_pipeline::{
    FactorizeStage, Goal, finish, init_logging, parse_cluster_count, read_vectors,
};

#[derive(Parser, Debug)]
#[command(
    about = "Similarity, degree, normalised similarity or SymNMF factor of a vector file",
    allow_negative_numbers = true
)]
struct Args {
    /// Number of clusters (rank of H).
    k: String,
    /// One of sym, ddg, norm, symnmf.
    goal: Goal,
    /// Comma-separated input vectors, one per line.
    input: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<String> {
    let k = parse_cluster_count(&args.k)?;
    let vectors = read_vectors(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let out = FactorizeStage::new(args.goal, k).execute(&vectors)?;
    Ok(format_matrix(&out))
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
