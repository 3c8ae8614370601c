use crate::data::VectorSet;
use crate::distance::{euclidean, gaussian_affinity, nearest_centroid, squared_euclidean};
use crate::similarity::similarity_matrix;
use crate::tests::{blob_vectors, init};
use approx::{abs_diff_eq, assert_relative_eq};

#[test]
fn test_distance_kernels() {
    let a = [0.0, 0.0];
    let b = [3.0, 4.0];
    assert_eq!(squared_euclidean(&a, &b), 25.0);
    assert_eq!(euclidean(&a, &b), 5.0);
    assert_eq!(gaussian_affinity(0.0), 1.0);
    assert_relative_eq!(gaussian_affinity(2.0), (-1.0f64).exp());
}

#[test]
fn test_nearest_centroid_breaks_ties_to_lowest_index() {
    let centroids = [vec![1.0, 0.0], vec![-1.0, 0.0], vec![0.0, 5.0]];
    let (idx, dist) = nearest_centroid(&[0.0, 0.0], centroids.iter().map(Vec::as_slice));
    assert_eq!(idx, 0);
    assert_eq!(dist, 1.0);

    let (idx, _) = nearest_centroid(&[0.0, 4.0], centroids.iter().map(Vec::as_slice));
    assert_eq!(idx, 2);
}

#[test]
fn test_similarity_diagonal_and_range() {
    init();
    let vectors = blob_vectors(3, 8, 4, 2.0, 7);
    let a = similarity_matrix(&vectors).unwrap();
    let n = vectors.len();
    assert_eq!(a.shape(), (n, n));

    for i in 0..n {
        assert_eq!(a.get(i, i), 0.0, "diagonal must be exactly 0 at {}", i);
        for j in 0..n {
            if i != j {
                let v = a.get(i, j);
                assert!(v > 0.0 && v <= 1.0, "A[{},{}]={} outside (0, 1]", i, j, v);
            }
        }
    }
}

#[test]
fn test_similarity_is_symmetric() {
    let vectors = blob_vectors(2, 10, 3, 1.5, 11);
    let a = similarity_matrix(&vectors).unwrap();
    let n = vectors.len();

    for i in 0..n {
        for j in 0..n {
            assert!(
                abs_diff_eq!(a.get(i, j), a.get(j, i), epsilon = 1e-15),
                "A[{},{}] != A[{},{}]",
                i,
                j,
                j,
                i
            );
        }
    }
}

#[test]
fn test_similarity_matches_kernel_per_cell() {
    let vectors = VectorSet::new(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 0.0]]).unwrap();
    let a = similarity_matrix(&vectors).unwrap();

    // ‖v0 − v1‖² = 2 → exp(−1); ‖v0 − v2‖² = 4 → exp(−2)
    assert_relative_eq!(a.get(0, 1), (-1.0f64).exp());
    assert_relative_eq!(a.get(0, 2), (-2.0f64).exp());
    assert_relative_eq!(a.get(1, 2), (-1.0f64).exp());
}

#[test]
fn test_identical_and_distant_vectors() {
    let vectors = VectorSet::new(&[vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap();
    let a = similarity_matrix(&vectors).unwrap();

    assert_eq!(a.get(0, 1), 1.0);
    assert_eq!(a.get(1, 0), 1.0);
    assert_relative_eq!(a.get(0, 2), (-100.0f64).exp());
    assert!(a.get(0, 2) < 1e-40);
}

#[test]
fn test_single_vector() {
    let vectors = VectorSet::new(&[vec![3.0, -1.0, 2.0]]).unwrap();
    let a = similarity_matrix(&vectors).unwrap();
    assert_eq!(a.to_rows(), vec![vec![0.0]]);
}
