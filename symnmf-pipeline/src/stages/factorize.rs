use log::info;
use symnmf_core::{
    InitConfig, Matrix, SymNmfSolver, VectorSet, degree_matrix, initialize_h,
    normalized_similarity, similarity_matrix,
};

use crate::Goal;
use crate::error::Result;

/// Runs one [`Goal`] over a vector set.
pub struct FactorizeStage {
    pub goal: Goal,
    /// Rank of H; only checked against N for the matrix goals.
    pub k: usize,
    pub init: InitConfig,
}

impl FactorizeStage {
    pub fn new(goal: Goal, k: usize) -> Self {
        Self {
            goal,
            k,
            init: InitConfig::default(),
        }
    }

    pub fn execute(&self, vectors: &VectorSet) -> Result<Matrix> {
        let n = vectors.len();
        self.goal.validate_rank(self.k, n)?;
        info!("Goal '{}' on {} vectors (k={})", self.goal, n, self.k);

        let a = similarity_matrix(vectors)?;
        let out = match self.goal {
            Goal::Sym => a,
            Goal::Ddg => degree_matrix(&a)?,
            Goal::Norm => normalized_similarity(&a)?,
            Goal::SymNmf => {
                let w = normalized_similarity(&a)?;
                drop(a);
                let h0 = initialize_h(&w, self.k, &self.init)?;
                let solved = SymNmfSolver::new().solve(&w, h0)?;
                info!("✓ Factorised: {}", solved.summary());
                solved.h
            }
        };

        info!("✓ Goal '{}' produced a {}x{} matrix", self.goal, out.nrows(), out.ncols());
        Ok(out)
    }
}
