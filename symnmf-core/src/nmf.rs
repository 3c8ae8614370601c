//! Symmetric non-negative matrix factorisation.
//!
//! Finds H [N, K] ≥ 0 minimising ‖W − H Hᵗ‖²_F with the damped multiplicative
//! update
//!
//!   H'[i, j] = H[i, j] · (1 − β + β · (W H)[i, j] / (H Hᵗ H)[i, j])
//!
//! with β = 0.5. Each step multiplies by a non-negative ratio so H stays
//! non-negative whenever W and the initial H are. The iteration stops when
//! ‖H' − H‖²_F < ε or after `max_iter` steps.
//!
//! ### Buffers
//! | Buffer | Shape | Lifetime |
//! | :-- | :-- | :-- |
//! | `H`, `H'` | [N, K] | double buffer, swapped every step |
//! | `H Hᵗ` | [N, N] | reused every step |
//! | `W H`, `H Hᵗ H` | [N, K] | reused every step |
//!
//! All of them are allocated once before the loop; the active factor buffer is
//! moved out as the result and the others are dropped on return.

use log::{debug, info, trace, warn};

use crate::error::{Result, SymNmfError};
use crate::matrix::Matrix;

/// Iteration cap of the multiplicative update.
pub const MAX_ITER: usize = 300;
/// Damping factor β.
pub const BETA: f64 = 0.5;
/// Convergence threshold on the squared Frobenius step size.
pub const EPSILON: f64 = 1e-4;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Solver constants. Public entry points always use the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SymNmfConfig {
    pub(crate) max_iter: usize,
    pub(crate) beta: f64,
    pub(crate) epsilon: f64,
}

impl Default for SymNmfConfig {
    fn default() -> Self {
        Self {
            max_iter: MAX_ITER,
            beta: BETA,
            epsilon: EPSILON,
        }
    }
}

impl SymNmfConfig {
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SymNmfOutput {
    /// Final factor H [N, K].
    pub h: Matrix,
    /// Number of update steps performed.
    pub iterations: usize,
    /// True if the step size fell below ε before the cap.
    pub converged: bool,
    /// ‖H' − H‖²_F for every step, in order.
    pub history: Vec<f64>,
}

impl SymNmfOutput {
    pub fn summary(&self) -> String {
        format!(
            "SymNmfOutput: H={}x{}, iterations={}, converged={}, last_diff={:.3e}",
            self.h.nrows(),
            self.h.ncols(),
            self.iterations,
            self.converged,
            self.history.last().copied().unwrap_or(0.0),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Double buffer
// ─────────────────────────────────────────────────────────────────────────────

/// Current / next factor pair with an explicit active index.
struct FactorBuffers {
    buffers: [Matrix; 2],
    active: usize,
}

impl FactorBuffers {
    fn new(initial: Matrix) -> Result<Self> {
        let next = Matrix::zeros(initial.nrows(), initial.ncols())?;
        Ok(Self {
            buffers: [initial, next],
            active: 0,
        })
    }

    /// (current, next)
    fn split(&mut self) -> (&Matrix, &mut Matrix) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.active == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    fn swap(&mut self) {
        self.active = 1 - self.active;
    }

    fn into_current(self) -> Matrix {
        let [a, b] = self.buffers;
        if self.active == 0 {
            a
        } else {
            b
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Solver
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SymNmfSolver {
    config: SymNmfConfig,
}

impl SymNmfSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_config(config: SymNmfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SymNmfConfig {
        &self.config
    }

    /// Factorise `w` [N, N] starting from `h` [N, K].
    ///
    /// `h` is consumed; the returned factor is an owned buffer. N = 0 returns
    /// the input unchanged. A zero or non-finite denominator aborts with
    /// [`SymNmfError::DegenerateUpdate`].
    pub fn solve(&self, w: &Matrix, h: Matrix) -> Result<SymNmfOutput> {
        let n = w.nrows();
        if w.ncols() != n {
            return Err(SymNmfError::dimension_mismatch(n, w.ncols()));
        }
        if h.nrows() != n {
            return Err(SymNmfError::dimension_mismatch(n, h.nrows()));
        }
        if let Some((row, col, value)) = first_invalid_entry(&h) {
            return Err(SymNmfError::InvalidFactor { row, col, value });
        }

        if n == 0 {
            debug!("Empty problem: returning H unchanged");
            return Ok(SymNmfOutput {
                h,
                iterations: 0,
                converged: true,
                history: Vec::new(),
            });
        }

        let k = h.ncols();
        let max_iter = self.config.max_iter;
        let beta = self.config.beta;
        let epsilon = self.config.epsilon;

        info!(
            "SymNMF: N={}, K={}, max_iter={}, beta={}, eps={:.0e}",
            n, k, max_iter, beta, epsilon
        );

        let mut factors = FactorBuffers::new(h)?;
        let mut hht = Matrix::zeros(n, n)?;
        let mut wh = Matrix::zeros(n, k)?;
        let mut hhth = Matrix::zeros(n, k)?;
        let mut history = Vec::with_capacity(max_iter.min(64));
        let mut converged = false;

        for iteration in 0..max_iter {
            let (current, next) = factors.split();

            // ── H Hᵗ, W H, (H Hᵗ) H ─────────────────────────────────────────
            current.mul_transpose_self_into(&mut hht)?;
            w.matmul_into(current, &mut wh)?;
            hht.matmul_into(current, &mut hhth)?;

            if let Some((row, col, denominator)) = first_degenerate(&hhth) {
                warn!(
                    "Degenerate denominator {} at ({}, {}) in iteration {}",
                    denominator, row, col, iteration
                );
                return Err(SymNmfError::DegenerateUpdate {
                    row,
                    col,
                    iteration,
                    denominator,
                });
            }

            // ── Damped multiplicative update ────────────────────────────────
            next.fill_rows_par(|i, row| {
                let cells = current.row(i).iter().zip(wh.row(i)).zip(hhth.row(i));
                for (out, ((&h_ij, &num), &den)) in row.iter_mut().zip(cells) {
                    *out = h_ij * (1.0 - beta + beta * num / den);
                }
            });

            if let Some((row, col, value)) = next.find_non_finite() {
                return Err(SymNmfError::NonFinite { row, col, value });
            }

            let diff = next.frobenius_sq_diff(current)?;
            factors.swap();
            history.push(diff);

            trace!("iter {:>3}: ||H' - H||^2 = {:.6e}", iteration + 1, diff);
            if (iteration + 1) % 50 == 0 {
                debug!("iter {}: diff={:.6e}", iteration + 1, diff);
            }

            if diff < epsilon {
                converged = true;
                break;
            }
        }

        let output = SymNmfOutput {
            h: factors.into_current(),
            iterations: history.len(),
            converged,
            history,
        };

        if output.converged {
            info!("  ✓ {}", output.summary());
        } else {
            warn!("SymNMF hit the iteration cap: {}", output.summary());
        }
        Ok(output)
    }
}

/// Factorise with the reference constants and return only H.
pub fn symnmf(w: &Matrix, h: Matrix) -> Result<Matrix> {
    SymNmfSolver::new().solve(w, h).map(|out| out.h)
}

fn first_invalid_entry(h: &Matrix) -> Option<(usize, usize, f64)> {
    h.rows().enumerate().find_map(|(i, row)| {
        row.iter()
            .position(|v| !v.is_finite() || *v < 0.0)
            .map(|j| (i, j, row[j]))
    })
}

fn first_degenerate(denominators: &Matrix) -> Option<(usize, usize, f64)> {
    denominators.rows().enumerate().find_map(|(i, row)| {
        row.iter()
            .position(|v| !(v.is_finite() && *v > 0.0))
            .map(|j| (i, j, row[j]))
    })
}
