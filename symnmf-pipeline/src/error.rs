use std::io::Write;
use std::process::ExitCode;

use symnmf_core::SymNmfError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Line printed for any failure without a dedicated message.
pub const GENERIC_MESSAGE: &str = "An Error Has Occurred";
pub const CLUSTER_COUNT_MESSAGE: &str = "Invalid number of clusters!";
pub const MAX_ITER_MESSAGE: &str = "Invalid maximum iteration!";
pub const EPSILON_MESSAGE: &str = "Invalid epsilon!";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: cannot parse '{token}' as a number")]
    Parse { line: usize, token: String },

    #[error("line {line}: expected {expected} values, found {actual}")]
    RaggedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("'{0}' is not a valid number of clusters")]
    ClusterCountArg(String),

    #[error("'{0}' is not a valid maximum iteration")]
    MaxIterArg(String),

    #[error("'{0}' is not a valid epsilon")]
    EpsilonArg(String),

    #[error("Unknown goal '{0}' (expected sym, ddg, norm or symnmf)")]
    UnknownGoal(String),

    #[error(transparent)]
    Core(#[from] SymNmfError),
}

impl PipelineError {
    /// The single line shown to command line users.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::Core(core) => core_message(core),
            PipelineError::ClusterCountArg(_) => CLUSTER_COUNT_MESSAGE,
            PipelineError::MaxIterArg(_) => MAX_ITER_MESSAGE,
            PipelineError::EpsilonArg(_) => EPSILON_MESSAGE,
            _ => GENERIC_MESSAGE,
        }
    }
}

/// Cluster-count, iteration-cap and epsilon problems get their own line so
/// scripts can tell them apart from everything else.
fn core_message(err: &SymNmfError) -> &'static str {
    match err {
        SymNmfError::InvalidClusterCount { .. } => CLUSTER_COUNT_MESSAGE,
        SymNmfError::InvalidMaxIter(_) => MAX_ITER_MESSAGE,
        SymNmfError::InvalidEpsilon(_) => EPSILON_MESSAGE,
        _ => GENERIC_MESSAGE,
    }
}

/// [`PipelineError::user_message`] for an error that went through `anyhow`.
pub fn user_message(err: &anyhow::Error) -> &'static str {
    if let Some(pipeline) = err.downcast_ref::<PipelineError>() {
        return pipeline.user_message();
    }
    err.downcast_ref::<SymNmfError>()
        .map_or(GENERIC_MESSAGE, core_message)
}

/// Write the outcome of a command line run to `out` and return the exit status.
///
/// Output is written unchanged; a failure writes its user line and logs the
/// full error chain. A failed write counts as a failure.
pub fn write_outcome<W: Write>(outcome: anyhow::Result<String>, out: &mut W) -> u8 {
    let (text, status) = match outcome {
        Ok(output) => (output, 0),
        Err(err) => {
            log::error!("{:#}", err);
            (format!("{}\n", user_message(&err)), 1)
        }
    };

    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => status,
        Err(err) => {
            log::error!("cannot write output: {}", err);
            1
        }
    }
}

/// [`write_outcome`] on stdout, as the binaries' exit code.
pub fn finish(outcome: anyhow::Result<String>) -> ExitCode {
    ExitCode::from(write_outcome(outcome, &mut std::io::stdout().lock()))
}

/// Install `env_logger` on stderr, `warn` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
}
