use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{Result, SymNmfError};
use crate::matrix::Matrix;

/// Immutable set of `n` vectors of dimension `d`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSet {
    matrix: Matrix, // [N, D]
}

impl VectorSet {
    /// Build from rows. Rejects an empty set, zero dimension and ragged rows.
    pub fn new(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(SymNmfError::empty_input("no vectors"));
        }
        Self::from_matrix(Matrix::from_rows(rows)?)
    }

    pub fn from_matrix(matrix: Matrix) -> Result<Self> {
        if matrix.ncols() == 0 {
            return Err(SymNmfError::empty_input("vectors have dimension 0"));
        }
        Ok(Self { matrix })
    }

    /// Factory for data marshalled from an external dense array.
    pub fn from_dense(dense: &DenseMatrix<f64>) -> Result<Self> {
        Self::from_matrix(Matrix::from_dense(dense)?)
    }

    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    pub fn dim(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn vector(&self, i: usize) -> &[f64] {
        self.matrix.row(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.matrix.rows()
    }
}
