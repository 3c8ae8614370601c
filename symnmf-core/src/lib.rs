//! Symmetric non-negative matrix factorisation of Gaussian similarity graphs,
//! with k-means as an independent clustering baseline.
//!
//! Pipeline:
//!
//! ```text
//! VectorSet [N, D] ─► similarity_matrix ─► A [N, N]
//!                                           │
//!                          normalized_similarity (D^-1/2 A D^-1/2)
//!                                           ▼
//!                     initialize_h ─► H₀ [N, K] ─► SymNmfSolver ─► H [N, K]
//!
//! VectorSet [N, D] ─► KMeans ─► centroids [K, D], labels [N]
//! ```
//!
//! Everything runs on dense, row-major `f64` buffers owned by [`Matrix`].

pub mod data;
pub mod distance;
pub mod error;
pub mod format;
pub mod init;
pub mod kmeans;
pub mod laplacian;
pub mod matrix;
pub mod nmf;
pub mod similarity;

pub use data::VectorSet;
pub use error::{ErrorKind, Result, SymNmfError};
pub use format::format_matrix;
pub use init::{InitConfig, initialize_h};
pub use kmeans::{KMeans, KMeansConfig, KMeansInit, KMeansOutput, kmeans};
pub use laplacian::{degree_matrix, degree_vector, normalized_similarity};
pub use matrix::Matrix;
pub use nmf::{SymNmfOutput, SymNmfSolver, symnmf};
pub use similarity::similarity_matrix;

#[cfg(test)]
mod tests;
