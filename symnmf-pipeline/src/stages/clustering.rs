use log::{info, warn};
use symnmf_core::{KMeans, KMeansConfig, KMeansOutput, VectorSet};

use crate::error::Result;

pub struct ClusteringStage {
    pub config: KMeansConfig,
}

impl ClusteringStage {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, vectors: &VectorSet) -> Result<KMeansOutput> {
        info!(
            "🎯 Clustering {} vectors into {} clusters ({:?})",
            vectors.len(),
            self.config.k,
            self.config.init
        );

        let out = KMeans::new(self.config.clone()).fit(vectors)?;

        if !out.converged {
            warn!(
                "k-means stopped at the iteration cap ({}) before converging",
                out.iterations
            );
        }
        let empty = out.counts.iter().filter(|&&c| c == 0).count();
        if empty > 0 {
            warn!("{} cluster(s) ended up empty", empty);
        }
        info!(
            "✓ Clustering complete after {} iterations, counts={:?}",
            out.iterations, out.counts
        );
        Ok(out)
    }
}
