// symnmf-core/src/distance.rs

/// Σ_k (a_k − b_k)²
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Gaussian kernel on a squared distance: w = exp(−‖a − b‖² / 2) ∈ (0, 1].
///
/// Underflows to exactly 0.0 once the squared distance exceeds ~1490.
#[inline]
pub fn gaussian_affinity(squared_distance: f64) -> f64 {
    (-squared_distance / 2.0).exp()
}

/// Index of the nearest centroid by Euclidean distance; ties go to the lowest index.
///
/// Returns `(index, distance)`. `centroids` must be non-empty.
pub fn nearest_centroid<'a, I>(vector: &[f64], centroids: I) -> (usize, f64)
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut best = (0usize, f64::INFINITY);
    for (idx, centroid) in centroids.into_iter().enumerate() {
        let dist = euclidean(vector, centroid);
        if dist < best.1 {
            best = (idx, dist);
        }
    }
    best
}
