//! Goal dispatch, text input and clustering analysis on top of `symnmf-core`.
//!
//! ```text
//! file ──► reader ──► VectorSet ──┬─► FactorizeStage (sym | ddg | norm | symnmf) ──► Matrix
//!                                 ├─► ClusteringStage (k-means) ──► centroids
//!                                 └─► analysis (silhouette of both labelings)
//! ```

pub mod analysis;
pub mod args;
pub mod error;
pub mod reader;
pub mod stages;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use symnmf_core::SymNmfError;

pub use analysis::{AnalysisReport, compare_clusterings, labels_from_factor, silhouette_score};
pub use args::{parse_cluster_count, parse_epsilon, parse_max_iter};
pub use error::{PipelineError, Result, finish, init_logging, user_message, write_outcome};
pub use reader::{parse_vectors, read_vectors};
pub use stages::clustering::ClusteringStage;
pub use stages::factorize::FactorizeStage;

/// What the `symnmf` tool computes for its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Similarity matrix A.
    Sym,
    /// Diagonal degree matrix D.
    Ddg,
    /// Normalised similarity W = D^-1/2 A D^-1/2.
    Norm,
    /// Factor H of W ≈ H Hᵗ.
    SymNmf,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Sym, Goal::Ddg, Goal::Norm, Goal::SymNmf];

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Sym => "sym",
            Goal::Ddg => "ddg",
            Goal::Norm => "norm",
            Goal::SymNmf => "symnmf",
        }
    }

    /// Every goal needs K < N; factorisation also needs K > 1.
    pub fn validate_rank(self, k: usize, n: usize) -> std::result::Result<(), SymNmfError> {
        let too_small = self == Goal::SymNmf && k <= 1;
        if too_small || k >= n {
            return Err(SymNmfError::invalid_cluster_count(k, n));
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| PipelineError::UnknownGoal(s.to_string()))
    }
}

#[cfg(test)]
mod tests;
