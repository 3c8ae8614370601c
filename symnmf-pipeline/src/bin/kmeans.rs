use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use symnmf_core::kmeans::DEFAULT_MAX_ITER;
use symnmf_core::{KMeansConfig, KMeansInit, format_matrix};
use symnmf_pipeline::{
    ClusteringStage, finish, init_logging, parse_cluster_count, parse_epsilon, parse_max_iter,
    read_vectors,
};

#[derive(Parser, Debug)]
#[command(about = "k-means centroids of a vector file", allow_negative_numbers = true)]
struct Args {
    /// Number of clusters, 1 < K < N.
    k: String,
    /// `[max_iter] <input>`; the iteration cap defaults to 200.
    #[arg(num_args = 1..=2, required = true)]
    rest: Vec<String>,
    /// Largest centroid shift counted as converged (default 0.001).
    #[arg(long)]
    epsilon: Option<String>,
    /// Seed centroids with k-means++ instead of the first K vectors.
    #[arg(long)]
    plus_plus_seed: Option<u64>,
}

fn run(args: &Args) -> anyhow::Result<String> {
    let k = parse_cluster_count(&args.k)?;
    let (max_iter, input) = match args.rest.as_slice() {
        [input] => (DEFAULT_MAX_ITER, input),
        [max_iter, input] => (parse_max_iter(max_iter)?, input),
        _ => anyhow::bail!("expected [max_iter] <input>"),
    };
    let epsilon = parse_epsilon(args.epsilon.as_deref())?;
    let input = PathBuf::from(input);

    let init = args
        .plus_plus_seed
        .map_or(KMeansInit::FirstK, |seed| KMeansInit::PlusPlus { seed });
    let config = KMeansConfig::new(k)
        .with_max_iter(max_iter)
        .with_epsilon(epsilon)
        .with_init(init);

    let vectors =
        read_vectors(&input).with_context(|| format!("reading {}", input.display()))?;
    let out = ClusteringStage::new(config).execute(&vectors)?;
    Ok(format_matrix(&out.centroids))
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
