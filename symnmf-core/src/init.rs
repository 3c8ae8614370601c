//! Random initialisation of the SymNMF factor.
//!
//! H₀[i, j] ~ U[0, 2·sqrt(m / K)) where m is the mean of all entries of W.
//! The scale puts E[H₀ H₀ᵗ] in the same range as W.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymNmfError};
use crate::matrix::Matrix;

pub const DEFAULT_SEED: u64 = 1234;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfig {
    pub seed: u64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

/// Upper bound of the uniform draw: 2·sqrt(mean(W) / K).
pub fn init_upper_bound(w: &Matrix, k: usize) -> f64 {
    2.0 * (w.mean() / k as f64).sqrt()
}

/// Draw H₀ [N, K] for the normalised matrix `w` [N, N].
///
/// A zero-mean W (e.g. only isolated nodes) yields an all-zero H₀, which the
/// solver then rejects as degenerate.
pub fn initialize_h(w: &Matrix, k: usize, config: &InitConfig) -> Result<Matrix> {
    let n = w.nrows();
    if k == 0 {
        return Err(SymNmfError::invalid_cluster_count(k, n));
    }

    let mut h = Matrix::zeros(n, k)?;
    let upper = init_upper_bound(w, k);
    debug!(
        "Initialising H [{}x{}] ~ U[0, {:.6}) with seed {}",
        n, k, upper, config.seed
    );

    if !(upper.is_finite() && upper > 0.0) {
        return Ok(h);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    for i in 0..n {
        for cell in h.row_mut(i) {
            *cell = rng.random_range(0.0..upper);
        }
    }
    Ok(h)
}
