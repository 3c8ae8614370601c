use crate::data::VectorSet;
use crate::error::SymNmfError;
use crate::kmeans::{
    DEFAULT_EPSILON, DEFAULT_MAX_ITER, KMeans, KMeansConfig, KMeansInit, kmeans, kmeans_plus_plus,
};
use crate::matrix::Matrix;
use crate::tests::{blob_vectors, init};
use approx::assert_relative_eq;

#[test]
fn test_duplicate_points_and_outlier() {
    init();
    let vectors = VectorSet::new(&[vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap();
    let out = KMeans::new(KMeansConfig::new(2)).fit(&vectors).unwrap();

    // Both first-K centroids start at the origin, so every tie goes to
    // centroid 0 first and centroid 1 collects the duplicates afterwards.
    assert!(out.converged);
    assert_eq!(out.iterations, 3);
    assert_eq!(out.labels, vec![1, 1, 0]);
    assert_eq!(out.counts, vec![1, 2]);
    assert_eq!(
        out.centroids.to_rows(),
        vec![vec![10.0, 10.0], vec![0.0, 0.0]]
    );

    let centroids = kmeans(&vectors, 2, DEFAULT_MAX_ITER, DEFAULT_EPSILON).unwrap();
    assert_eq!(centroids, out.centroids);
}

#[test]
fn test_single_centroid_converges_to_mean() {
    let vectors = VectorSet::new(&[
        vec![1.0, 2.0],
        vec![3.0, 4.0],
        vec![-2.0, 0.5],
        vec![6.0, -1.5],
    ])
    .unwrap();
    let start = Matrix::from_rows(&[vec![0.0, 0.0]]).unwrap();
    let out = KMeans::new(KMeansConfig::new(1))
        .fit_from(&vectors, start)
        .unwrap();

    assert!(out.converged);
    assert_eq!(out.iterations, 2);
    assert_eq!(out.counts, vec![4]);
    assert_relative_eq!(out.centroids.get(0, 0), 2.0);
    assert_relative_eq!(out.centroids.get(0, 1), 1.25);
}

#[test]
fn test_labels_form_total_partition() {
    let vectors = blob_vectors(3, 7, 3, 4.0, 5);
    let config = KMeansConfig::new(3).with_init(KMeansInit::PlusPlus { seed: 1234 });
    let out = KMeans::new(config).fit(&vectors).unwrap();

    assert_eq!(out.labels.len(), vectors.len());
    assert!(out.labels.iter().all(|&l| l < 3));
    assert_eq!(out.counts.iter().sum::<usize>(), vectors.len());
    for (c, &count) in out.counts.iter().enumerate() {
        assert_eq!(count, out.labels.iter().filter(|&&l| l == c).count());
    }
    assert_eq!(out.centroids.shape(), (3, 3));
}

#[test]
fn test_empty_cluster_keeps_centroid() {
    let vectors = VectorSet::new(&[vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    let start = Matrix::from_rows(&[vec![0.0, 0.0], vec![100.0, 100.0]]).unwrap();
    let out = KMeans::new(KMeansConfig::new(2).with_max_iter(5))
        .fit_from(&vectors, start)
        .unwrap();

    assert_eq!(out.counts, vec![3, 0]);
    assert_eq!(out.centroids.row(1), &[100.0, 100.0]);
    assert!(out.converged);
}

#[test]
fn test_config_defaults() {
    let config = KMeansConfig::new(4);
    assert_eq!(config.max_iter, DEFAULT_MAX_ITER);
    assert_eq!(config.epsilon, DEFAULT_EPSILON);
    assert_eq!(config.init, KMeansInit::FirstK);
    assert!(config.validate(10).is_ok());
}

#[test]
fn test_config_rejects_bad_cluster_count() {
    let vectors = blob_vectors(1, 4, 2, 0.0, 1);

    for k in [0, 1, 4, 5] {
        let err = KMeans::new(KMeansConfig::new(k)).fit(&vectors).unwrap_err();
        assert_eq!(err, SymNmfError::invalid_cluster_count(k, 4));
        assert!(err.is_config());
    }
}

#[test]
fn test_config_rejects_bad_iteration_bounds() {
    for max_iter in [0, 1, 1000, 5000] {
        let err = KMeansConfig::new(2).with_max_iter(max_iter).validate(5).unwrap_err();
        assert_eq!(err, SymNmfError::InvalidMaxIter(max_iter));
    }
    for max_iter in [2, 999] {
        assert!(KMeansConfig::new(2).with_max_iter(max_iter).validate(5).is_ok());
    }

    let err = KMeansConfig::new(2).with_epsilon(-1e-3).validate(5).unwrap_err();
    assert!(matches!(err, SymNmfError::InvalidEpsilon(_)));
    assert!(KMeansConfig::new(2).with_epsilon(f64::NAN).validate(5).is_err());
    assert!(KMeansConfig::new(2).with_epsilon(0.0).validate(5).is_ok());
}

#[test]
fn test_fit_from_checks_centroid_shape() {
    let vectors = blob_vectors(1, 4, 2, 0.0, 2);
    let kmeans = KMeans::new(KMeansConfig::new(2));

    let err = kmeans
        .fit_from(&vectors, Matrix::zeros(2, 3).unwrap())
        .unwrap_err();
    assert_eq!(err, SymNmfError::dimension_mismatch(2, 3));
    assert!(kmeans.fit_from(&vectors, Matrix::zeros(0, 2).unwrap()).is_err());
}

#[test]
fn test_kmeans_plus_plus_picks_distinct_indices() {
    let vectors = blob_vectors(4, 5, 2, 5.0, 8);
    let a = kmeans_plus_plus(&vectors, 4, 42).unwrap();
    let b = kmeans_plus_plus(&vectors, 4, 42).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.len(), 4);
    for (i, x) in a.iter().enumerate() {
        assert!(*x < vectors.len());
        assert!(!a[i + 1..].contains(x), "index {} drawn twice", x);
    }

    assert!(kmeans_plus_plus(&vectors, 21, 42).is_err());
    assert!(kmeans_plus_plus(&vectors, 0, 42).is_err());
}

#[test]
fn test_kmeans_plus_plus_with_coincident_points() {
    let vectors = VectorSet::new(&vec![vec![1.0, 1.0]; 4]).unwrap();
    let mut picked = kmeans_plus_plus(&vectors, 3, 9).unwrap();
    picked.sort_unstable();
    picked.dedup();
    assert_eq!(picked.len(), 3);
}
