//! Gaussian affinity graph over a vector set.
//!
//! Pipeline position: [N, D] vectors → A[N, N] affinity matrix.
//!
//!   A[i, j] = exp(−‖vᵢ − vⱼ‖² / 2)   for i ≠ j
//!   A[i, i] = 0
//!
//! Every cell is computed on its own (no mirroring of the upper triangle); the
//! kernel is symmetric in its arguments so the result is symmetric anyway.

use log::{debug, info};

use crate::data::VectorSet;
use crate::distance::{gaussian_affinity, squared_euclidean};
use crate::error::Result;
use crate::matrix::Matrix;

/// Build the N×N affinity matrix.
///
/// Only fails if storage for the matrix cannot be obtained.
pub fn similarity_matrix(vectors: &VectorSet) -> Result<Matrix> {
    let n = vectors.len();
    info!(
        "Building Gaussian affinity for {} vectors of dim {}",
        n,
        vectors.dim()
    );

    let mut affinity = Matrix::zeros(n, n)?;
    affinity.fill_rows_par(|i, row| {
        let vi = vectors.vector(i);
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = if i == j {
                0.0
            } else {
                gaussian_affinity(squared_euclidean(vi, vectors.vector(j)))
            };
        }
    });

    debug!("Affinity matrix complete: {}x{}", n, n);
    Ok(affinity)
}
