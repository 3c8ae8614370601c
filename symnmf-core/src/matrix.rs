//! Dense row-major matrix store.
//!
//! `Matrix` owns one contiguous `Vec<f64>` of `nrows * ncols` values. Storage is
//! obtained with `try_reserve_exact`, so an impossible request surfaces as
//! [`SymNmfError::Allocation`] instead of aborting the process, and dropping the
//! matrix releases the whole buffer at once on every exit path.
//!
//! Row-parallel kernels (`matmul`, `mul_transpose_self`, `fill_rows_par`) use
//! rayon over disjoint output rows. Reductions that feed convergence decisions
//! are folded sequentially in row order so results do not depend on scheduling.

use log::trace;
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{Result, SymNmfError};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

impl Matrix {
    /// Allocate a `nrows × ncols` matrix filled with zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        let len = nrows
            .checked_mul(ncols)
            .ok_or_else(|| SymNmfError::allocation(nrows, ncols))?;

        let mut data: Vec<f64> = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| SymNmfError::allocation(nrows, ncols))?;
        data.resize(len, 0.0);

        trace!("Allocated {}x{} matrix ({} bytes)", nrows, ncols, len * 8);
        Ok(Self { data, nrows, ncols })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(data: Vec<f64>, nrows: usize, ncols: usize) -> Result<Self> {
        let expected = nrows
            .checked_mul(ncols)
            .ok_or_else(|| SymNmfError::allocation(nrows, ncols))?;
        if data.len() != expected {
            return Err(SymNmfError::dimension_mismatch(expected, data.len()));
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Build from rows; every row must have the length of the first one.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut out = Self::zeros(nrows, ncols)?;

        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(SymNmfError::dimension_mismatch(ncols, row.len()));
            }
            out.row_mut(i).copy_from_slice(row);
        }
        Ok(out)
    }

    /// Square matrix with `diag` on the diagonal and zeros elsewhere.
    pub fn from_diagonal(diag: &[f64]) -> Result<Self> {
        let n = diag.len();
        let mut out = Self::zeros(n, n)?;
        for (i, &v) in diag.iter().enumerate() {
            out.set(i, i, v);
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Element access
// ─────────────────────────────────────────────────────────────────────────────

impl Matrix {
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nrows && j < self.ncols);
        self.data[i * self.ncols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.nrows && j < self.ncols);
        self.data[i * self.ncols + j] = value;
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Mean over all entries; 0 for an empty matrix.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        if self.nrows != self.ncols {
            return false;
        }
        (0..self.nrows).all(|i| (0..i).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    /// First entry that is NaN or infinite, as `(row, col, value)`.
    pub fn find_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.ncols, idx % self.ncols, self.data[idx]))
    }

    /// Run `f(row_index, row)` over every row in parallel.
    ///
    /// No-op for matrices without cells (rayon rejects zero-sized chunks).
    pub fn fill_rows_par<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync + Send,
    {
        if self.nrows == 0 || self.ncols == 0 {
            return;
        }
        self.data
            .par_chunks_mut(self.ncols)
            .enumerate()
            .for_each(|(i, row)| f(i, row));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Products and reductions
// ─────────────────────────────────────────────────────────────────────────────

impl Matrix {
    /// `self · rhs` for `(n × m) · (m × k)`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.ncols != rhs.nrows {
            return Err(SymNmfError::dimension_mismatch(self.ncols, rhs.nrows));
        }
        let mut out = Matrix::zeros(self.nrows, rhs.ncols)?;
        self.matmul_into(rhs, &mut out)?;
        Ok(out)
    }

    /// `self · rhs` written into a preallocated `out`.
    pub fn matmul_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        if self.ncols != rhs.nrows {
            return Err(SymNmfError::dimension_mismatch(self.ncols, rhs.nrows));
        }
        if out.shape() != (self.nrows, rhs.ncols) {
            return Err(SymNmfError::dimension_mismatch(
                self.nrows * rhs.ncols,
                out.nrows * out.ncols,
            ));
        }

        out.fill_rows_par(|i, out_row| {
            out_row.iter_mut().for_each(|v| *v = 0.0);
            for (l, &a) in self.row(i).iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out_row.iter_mut().zip(rhs.row(l)) {
                    *o += a * b;
                }
            }
        });
        Ok(())
    }

    /// `self · selfᵗ` for an `n × k` matrix, written into an `n × n` `out`.
    pub fn mul_transpose_self_into(&self, out: &mut Matrix) -> Result<()> {
        if out.shape() != (self.nrows, self.nrows) {
            return Err(SymNmfError::dimension_mismatch(
                self.nrows * self.nrows,
                out.nrows * out.ncols,
            ));
        }

        out.fill_rows_par(|i, out_row| {
            let hi = self.row(i);
            for (j, o) in out_row.iter_mut().enumerate() {
                *o = hi.iter().zip(self.row(j)).map(|(a, b)| a * b).sum();
            }
        });
        Ok(())
    }

    pub fn mul_transpose_self(&self) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.nrows, self.nrows)?;
        self.mul_transpose_self_into(&mut out)?;
        Ok(out)
    }

    /// Squared Frobenius norm of `self − other`, summed sequentially in row-major order.
    pub fn frobenius_sq_diff(&self, other: &Matrix) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(SymNmfError::dimension_mismatch(
                self.nrows * self.ncols,
                other.nrows * other.ncols,
            ));
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b) * (a - b))
            .sum())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// smartcore adapter
// ─────────────────────────────────────────────────────────────────────────────

impl Matrix {
    /// Copy a smartcore `DenseMatrix` (any internal layout) into a row-major matrix.
    pub fn from_dense(dense: &DenseMatrix<f64>) -> Result<Self> {
        let (nrows, ncols) = dense.shape();
        let mut out = Self::zeros(nrows, ncols)?;
        for i in 0..nrows {
            for j in 0..ncols {
                out.set(i, j, *dense.get((i, j)));
            }
        }
        Ok(out)
    }

    pub fn to_dense(&self) -> Result<DenseMatrix<f64>> {
        DenseMatrix::new(self.nrows, self.ncols, self.data.clone(), false)
            .map_err(|_| SymNmfError::dimension_mismatch(self.nrows * self.ncols, self.data.len()))
    }
}
