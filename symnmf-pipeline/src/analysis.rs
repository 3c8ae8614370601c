//! Cluster quality: SymNMF labels against k-means labels, scored with the mean
//! silhouette coefficient.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use symnmf_core::distance::euclidean;
use symnmf_core::{KMeansConfig, KMeansInit, Matrix, SymNmfError, VectorSet};

use crate::Goal;
use crate::error::Result;
use crate::stages::clustering::ClusteringStage;
use crate::stages::factorize::FactorizeStage;

/// Seed for the k-means++ run of the comparison.
pub const KMEANS_SEED: u64 = 1234;

/// Hard labels from a soft factor: the column holding each row's maximum.
/// Ties go to the lowest column.
pub fn labels_from_factor(h: &Matrix) -> Vec<usize> {
    h.rows()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (j, &v)| {
                    if v > best.1 { (j, v) } else { best }
                })
                .0
        })
        .collect()
}

/// Mean silhouette coefficient over all vectors, Euclidean distance.
///
/// s(i) = (b − a) / max(a, b) where a is the mean distance to the rest of the
/// own cluster and b the smallest mean distance to another cluster. Members
/// of singleton clusters score 0.
pub fn silhouette_score(vectors: &VectorSet, labels: &[usize]) -> std::result::Result<f64, SymNmfError> {
    let n = vectors.len();
    if labels.len() != n {
        return Err(SymNmfError::dimension_mismatch(n, labels.len()));
    }

    let n_labels = labels.iter().max().map_or(0, |&m| m + 1);
    let mut sizes = vec![0usize; n_labels];
    for &l in labels {
        sizes[l] += 1;
    }
    let distinct = sizes.iter().filter(|&&s| s > 0).count();
    if distinct < 2 {
        return Err(SymNmfError::invalid_cluster_count(distinct, n));
    }

    let mut sums = vec![0.0f64; n_labels];
    let mut total = 0.0;
    for i in 0..n {
        let own = labels[i];
        if sizes[own] == 1 {
            continue;
        }

        sums.iter_mut().for_each(|s| *s = 0.0);
        let vi = vectors.vector(i);
        for (j, (vj, &label)) in vectors.iter().zip(labels).enumerate() {
            if i != j {
                sums[label] += euclidean(vi, vj);
            }
        }

        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..n_labels)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    let score = total / n as f64;
    debug!("Silhouette over {} vectors, {} clusters: {:.6}", n, distinct, score);
    Ok(score)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub nmf: f64,
    pub kmeans: f64,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nmf: {:.4}", self.nmf)?;
        writeln!(f, "kmeans: {:.4}", self.kmeans)
    }
}

/// Cluster `vectors` into `k` groups with SymNMF and with k-means++ and score
/// both labelings.
pub fn compare_clusterings(vectors: &VectorSet, k: usize) -> Result<AnalysisReport> {
    let h = FactorizeStage::new(Goal::SymNmf, k).execute(vectors)?;
    let nmf_labels = labels_from_factor(&h);
    let nmf = silhouette_score(vectors, &nmf_labels)?;

    let config = KMeansConfig::new(k).with_init(KMeansInit::PlusPlus { seed: KMEANS_SEED });
    let clustered = ClusteringStage::new(config).execute(vectors)?;
    let kmeans = silhouette_score(vectors, &clustered.labels)?;

    info!("Silhouette: nmf={:.4}, kmeans={:.4}", nmf, kmeans);
    Ok(AnalysisReport { nmf, kmeans })
}
