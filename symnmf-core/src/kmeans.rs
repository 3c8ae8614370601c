//! Lloyd-style k-means over a [`VectorSet`].
//!
//! Initialize (first K vectors, or k-means++ seeding)
//!   → repeat { Assign → Recompute → CheckConvergence }
//!   until every centroid moved ≤ ε or `max_iter` is reached.
//!
//! Assignment uses the Euclidean (not squared) distance and breaks ties towards
//! the lowest centroid index. A centroid whose cluster is empty keeps its
//! previous position.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::VectorSet;
use crate::distance::{euclidean, nearest_centroid};
use crate::error::{Result, SymNmfError};
use crate::matrix::Matrix;

pub const DEFAULT_MAX_ITER: usize = 200;
/// Exclusive upper bound on `max_iter`.
pub const MAX_ITER_LIMIT: usize = 1000;
pub const DEFAULT_EPSILON: f64 = 1e-3;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How the initial centroids are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KMeansInit {
    /// The first K input vectors.
    #[default]
    FirstK,
    /// k-means++ seeding, sampling proportionally to the distance to the
    /// nearest already-chosen centroid.
    PlusPlus { seed: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters K.
    pub k: usize,
    /// Iteration cap, must lie in (1, 1000).
    pub max_iter: usize,
    /// Largest centroid shift still counted as converged.
    pub epsilon: f64,
    pub init: KMeansInit,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            epsilon: DEFAULT_EPSILON,
            init: KMeansInit::FirstK,
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_init(mut self, init: KMeansInit) -> Self {
        self.init = init;
        self
    }

    /// Full validation for a run over `n` vectors: 1 < K < n, 1 < max_iter < 1000,
    /// ε ≥ 0.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.k <= 1 || n <= self.k {
            return Err(SymNmfError::invalid_cluster_count(self.k, n));
        }
        self.validate_iteration()
    }

    fn validate_iteration(&self) -> Result<()> {
        if self.max_iter <= 1 || self.max_iter >= MAX_ITER_LIMIT {
            return Err(SymNmfError::InvalidMaxIter(self.max_iter));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(SymNmfError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct KMeansOutput {
    /// Final centroids [K, D].
    pub centroids: Matrix,
    /// Cluster of every vector from the last assignment step.
    pub labels: Vec<usize>,
    /// Vectors per cluster from the last assignment step.
    pub counts: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

pub struct KMeans {
    pub config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Validate, seed the centroids and iterate.
    pub fn fit(&self, vectors: &VectorSet) -> Result<KMeansOutput> {
        self.config.validate(vectors.len())?;
        let initial = self.initial_centroids(vectors)?;
        self.fit_from(vectors, initial)
    }

    /// Iterate from explicit initial centroids [K, D].
    ///
    /// Only structural checks apply here (K ≥ 1, matching dimension, iteration
    /// bounds), so externally seeded runs may use a single centroid.
    pub fn fit_from(&self, vectors: &VectorSet, mut centroids: Matrix) -> Result<KMeansOutput> {
        let n = vectors.len();
        let d = vectors.dim();
        let k = centroids.nrows();

        if k == 0 {
            return Err(SymNmfError::invalid_cluster_count(k, n));
        }
        if centroids.ncols() != d {
            return Err(SymNmfError::dimension_mismatch(d, centroids.ncols()));
        }
        self.config.validate_iteration()?;

        info!(
            "k-means: {} vectors of dim {} into {} clusters (max_iter={}, eps={})",
            n, d, k, self.config.max_iter, self.config.epsilon
        );

        let mut labels = vec![0usize; n];
        let mut counts = vec![0usize; k];
        let mut sums = Matrix::zeros(k, d)?;
        let mut iterations = 0;
        let mut converged = false;

        for iter in 0..self.config.max_iter {
            // ── Assign ──────────────────────────────────────────────────────
            labels.par_iter_mut().enumerate().for_each(|(i, label)| {
                *label = nearest_centroid(vectors.vector(i), centroids.rows()).0;
            });

            // ── Recompute ───────────────────────────────────────────────────
            counts.iter_mut().for_each(|c| *c = 0);
            sums.fill(0.0);
            for (i, &label) in labels.iter().enumerate() {
                counts[label] += 1;
                for (s, &v) in sums.row_mut(label).iter_mut().zip(vectors.vector(i)) {
                    *s += v;
                }
            }

            let mut max_shift: f64 = 0.0;
            for c in 0..k {
                if counts[c] == 0 {
                    continue;
                }
                let count = counts[c] as f64;
                let updated: Vec<f64> = sums.row(c).iter().map(|s| s / count).collect();
                max_shift = max_shift.max(euclidean(&updated, centroids.row(c)));
                centroids.row_mut(c).copy_from_slice(&updated);
            }

            iterations = iter + 1;
            trace!("iter {:>3}: max centroid shift = {:.6e}", iterations, max_shift);

            // ── CheckConvergence ────────────────────────────────────────────
            if max_shift <= self.config.epsilon {
                converged = true;
                break;
            }
        }

        debug!(
            "k-means finished after {} iterations (converged={}, counts={:?})",
            iterations, converged, counts
        );

        Ok(KMeansOutput {
            centroids,
            labels,
            counts,
            iterations,
            converged,
        })
    }

    fn initial_centroids(&self, vectors: &VectorSet) -> Result<Matrix> {
        let k = self.config.k;
        let indices: Vec<usize> = match self.config.init {
            KMeansInit::FirstK => (0..k).collect(),
            KMeansInit::PlusPlus { seed } => kmeans_plus_plus(vectors, k, seed)?,
        };

        let mut centroids = Matrix::zeros(k, vectors.dim())?;
        for (c, &idx) in indices.iter().enumerate() {
            centroids.row_mut(c).copy_from_slice(vectors.vector(idx));
        }
        Ok(centroids)
    }
}

/// Centroids of a first-K k-means run with the given iteration cap and ε.
pub fn kmeans(vectors: &VectorSet, k: usize, max_iter: usize, epsilon: f64) -> Result<Matrix> {
    let config = KMeansConfig::new(k)
        .with_max_iter(max_iter)
        .with_epsilon(epsilon);
    KMeans::new(config).fit(vectors).map(|out| out.centroids)
}

/// k-means++ seeding. Returns the indices of the K chosen vectors.
///
/// The first index is uniform; every following index is drawn with probability
/// proportional to the Euclidean distance to its nearest chosen centroid.
/// Chosen vectors get weight 0 and are never drawn twice.
pub fn kmeans_plus_plus(vectors: &VectorSet, k: usize, seed: u64) -> Result<Vec<usize>> {
    let n = vectors.len();
    if k == 0 || k > n {
        return Err(SymNmfError::invalid_cluster_count(k, n));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut chosen = Vec::with_capacity(k);
    let mut weights = vec![f64::INFINITY; n];

    let first = rng.random_range(0..n);
    chosen.push(first);
    weights[first] = 0.0;

    while chosen.len() < k {
        let last = vectors.vector(chosen[chosen.len() - 1]);
        for (i, w) in weights.iter_mut().enumerate() {
            if *w > 0.0 {
                *w = w.min(euclidean(vectors.vector(i), last));
            }
        }

        let total: f64 = weights.iter().sum();
        let next = if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut acc = 0.0;
            weights
                .iter()
                .position(|&w| {
                    acc += w;
                    w > 0.0 && acc > target
                })
                .or_else(|| weights.iter().rposition(|&w| w > 0.0))
        } else {
            None
        };

        // All remaining candidates coincide with a chosen centroid.
        let next = match next {
            Some(idx) => idx,
            None => (0..n)
                .find(|i| !chosen.contains(i))
                .ok_or_else(|| SymNmfError::invalid_cluster_count(k, n))?,
        };

        trace!("k-means++ picked index {} ({} of {})", next, chosen.len() + 1, k);
        weights[next] = 0.0;
        chosen.push(next);
    }

    Ok(chosen)
}
