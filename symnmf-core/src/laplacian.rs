//! Degree normalisation of the affinity graph.
//!
//! Pipeline position: A[N, N] affinity → W[N, N] normalised affinity.
//!
//!   d_i  = Σ_j A[i, j]
//!   W    = D^{-½} A D^{-½}
//!   W_ij = A_ij / sqrt(d_i · d_j)      when d_i > 0 and d_j > 0
//!   W_ij = 0                           otherwise
//!
//! This is the weight part of the symmetric normalised Laplacian
//! L_sym = I − D^{-½} A D^{-½}; SymNMF factorises W directly so the identity
//! term is never materialised. Isolated nodes (d_i = 0, e.g. a single vector or
//! a point whose kernel weights all underflow) produce zero rows and columns
//! instead of NaN/∞.

use log::{debug, info, warn};

use crate::error::{Result, SymNmfError};
use crate::matrix::Matrix;

/// Row sums of the affinity matrix: d_i = Σ_j A[i, j].
pub fn degree_vector(affinity: &Matrix) -> Result<Vec<f64>> {
    let n = affinity.nrows();
    let mut degrees: Vec<f64> = Vec::new();
    degrees
        .try_reserve_exact(n)
        .map_err(|_| SymNmfError::allocation(n, 1))?;

    degrees.extend(affinity.rows().map(|row| row.iter().sum::<f64>()));
    Ok(degrees)
}

/// Degree vector expanded to the N×N diagonal matrix D.
pub fn degree_matrix(affinity: &Matrix) -> Result<Matrix> {
    let degrees = degree_vector(affinity)?;
    Matrix::from_diagonal(&degrees)
}

/// W = D^{-½} A D^{-½} with the zero-degree guard.
///
/// The degree vector is an intermediate owned by this call and dropped before
/// the normalised matrix is returned.
pub fn normalized_similarity(affinity: &Matrix) -> Result<Matrix> {
    let n = affinity.nrows();
    if affinity.ncols() != n {
        return Err(SymNmfError::dimension_mismatch(n, affinity.ncols()));
    }

    info!("Normalising {}x{} affinity: W = D^-1/2 A D^-1/2", n, n);

    let degrees = degree_vector(affinity)?;
    let isolated = degrees.iter().filter(|&&d| d <= 0.0).count();
    if isolated > 0 {
        warn!("{} of {} nodes have zero degree; their rows stay 0", isolated, n);
    }

    let mut normalized = Matrix::zeros(n, n)?;
    normalized.fill_rows_par(|i, row| {
        let di = degrees[i];
        for (j, cell) in row.iter_mut().enumerate() {
            let dj = degrees[j];
            *cell = if di > 0.0 && dj > 0.0 {
                affinity.get(i, j) / (di * dj).sqrt()
            } else {
                0.0
            };
        }
    });

    debug!("Normalised affinity complete ({} isolated nodes)", isolated);
    Ok(normalized)
}
