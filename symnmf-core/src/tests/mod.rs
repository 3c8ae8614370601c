mod test_kmeans;
mod test_nmf;
mod test_similarity;

use crate::data::VectorSet;
use rand::{Rng, SeedableRng};

/// Initialize logging for tests
pub(crate) fn init() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// `blobs` Gaussian-ish blobs of `per_blob` points in `d` dimensions, centred
/// `spread` apart along the diagonal.
pub(crate) fn blob_vectors(blobs: usize, per_blob: usize, d: usize, spread: f64, seed: u64) -> VectorSet {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let rows: Vec<Vec<f64>> = (0..blobs * per_blob)
        .map(|i| {
            let centre = (i / per_blob) as f64 * spread;
            (0..d)
                .map(|_| centre + rng.random_range(-0.5..0.5))
                .collect()
        })
        .collect();
    VectorSet::new(&rows).unwrap()
}
