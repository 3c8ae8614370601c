//! Error taxonomy for the numeric core.
//!
//! Every failure surfaces as one [`SymNmfError`] variant. Callers that only need
//! to react to the broad class (fatal allocation, bad configuration, degenerate
//! numerics) use [`SymNmfError::kind`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymNmfError>;

/// Broad failure class, used by front-ends to pick the user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Allocation,
    Config,
    Numerical,
}

#[derive(Debug, Error, PartialEq)]
pub enum SymNmfError {
    /// Storage for a `rows × cols` buffer could not be obtained.
    #[error("Allocation failed for {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    /// Cluster count / rank outside the accepted range for `n` vectors.
    #[error("Invalid number of clusters: k={k}, n={n}")]
    InvalidClusterCount { k: usize, n: usize },

    /// k-means iteration cap outside (1, 1000).
    #[error("Invalid maximum iteration: {0}")]
    InvalidMaxIter(usize),

    #[error("Invalid epsilon: {0}")]
    InvalidEpsilon(f64),

    #[error("Dimension mismatch: expected {expected}, actual {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Initial factor entry that is negative or not finite.
    #[error("Invalid initial factor entry {value} at ({row}, {col})")]
    InvalidFactor { row: usize, col: usize, value: f64 },

    /// No vectors, or vectors of dimension zero.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A multiplicative update hit a zero or non-finite denominator.
    #[error("Degenerate update at ({row}, {col}) in iteration {iteration}: denominator={denominator}")]
    DegenerateUpdate {
        row: usize,
        col: usize,
        iteration: usize,
        denominator: f64,
    },

    #[error("Non-finite value {value} at ({row}, {col})")]
    NonFinite { row: usize, col: usize, value: f64 },
}

impl SymNmfError {
    pub fn allocation(rows: usize, cols: usize) -> Self {
        Self::Allocation { rows, cols }
    }

    pub fn invalid_cluster_count(k: usize, n: usize) -> Self {
        Self::InvalidClusterCount { k, n }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::InvalidClusterCount { .. }
            | Self::InvalidMaxIter(_)
            | Self::InvalidEpsilon(_)
            | Self::DimensionMismatch { .. }
            | Self::InvalidFactor { .. }
            | Self::EmptyInput(_) => ErrorKind::Config,
            Self::DegenerateUpdate { .. } | Self::NonFinite { .. } => ErrorKind::Numerical,
        }
    }

    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}
