use crate::error::{ErrorKind, SymNmfError};
use crate::init::{InitConfig, init_upper_bound, initialize_h};
use crate::laplacian::normalized_similarity;
use crate::matrix::Matrix;
use crate::nmf::{BETA, EPSILON, MAX_ITER, SymNmfConfig, SymNmfSolver, symnmf};
use crate::similarity::similarity_matrix;
use crate::tests::{blob_vectors, init};
use crate::data::VectorSet;
use approx::assert_relative_eq;

fn two_point_w() -> Matrix {
    let vectors = VectorSet::new(&[vec![0.0, 0.0], vec![1.0, 0.5]]).unwrap();
    normalized_similarity(&similarity_matrix(&vectors).unwrap()).unwrap()
}

fn blob_problem(k: usize) -> (Matrix, Matrix) {
    let vectors = blob_vectors(3, 5, 2, 3.0, 99);
    let w = normalized_similarity(&similarity_matrix(&vectors).unwrap()).unwrap();
    let h0 = initialize_h(&w, k, &InitConfig::default()).unwrap();
    (w, h0)
}

#[test]
fn test_default_constants() {
    let solver = SymNmfSolver::new();
    assert_eq!(solver.config().max_iter(), MAX_ITER);
    assert_eq!(solver.config().beta(), BETA);
    assert_eq!(solver.config().epsilon(), EPSILON);
    assert_eq!((MAX_ITER, BETA, EPSILON), (300, 0.5, 1e-4));
}

#[test]
fn test_two_node_rank_one_monotone_convergence() {
    init();
    // Two-point normalised similarity is [[0, 1], [1, 0]]; the identity gives
    // the same update for a symmetric start.
    let identity = Matrix::from_diagonal(&[1.0, 1.0]).unwrap();
    let w_pair = two_point_w();
    assert_relative_eq!(w_pair.get(0, 1), 1.0);

    for w in [identity, w_pair] {
        let h0 = Matrix::from_rows(&[vec![1.0], vec![1.0]]).unwrap();
        let out = SymNmfSolver::new().solve(&w, h0).unwrap();

        assert!(out.converged);
        assert_eq!(out.iterations, out.history.len());
        assert_eq!(out.iterations, 3);
        assert_relative_eq!(out.history[0], 0.125, epsilon = 1e-12);
        for pair in out.history.windows(2) {
            assert!(
                pair[1] < pair[0],
                "step size must shrink: {:?}",
                out.history
            );
        }

        // Fixed point of h ← h/2 + 1/(4h) is h = sqrt(1/2).
        for &v in out.h.as_slice() {
            assert!(v >= 0.0);
            assert_relative_eq!(v, 0.5f64.sqrt(), epsilon = 1e-4);
        }
    }
}

#[test]
fn test_solver_is_idempotent_under_convergence() {
    let w = two_point_w();
    let h0 = Matrix::from_rows(&[vec![1.0], vec![1.0]]).unwrap();
    let first = SymNmfSolver::new().solve(&w, h0).unwrap();
    assert!(first.converged);

    let again = SymNmfSolver::new().solve(&w, first.h.clone()).unwrap();
    assert!(again.history[0] < EPSILON);
    assert!(first.h.frobenius_sq_diff(&again.h).unwrap() < EPSILON);
}

#[test]
fn test_factor_stays_non_negative_every_iteration() {
    let (w, h0) = blob_problem(3);

    for steps in 1..=6 {
        let config = SymNmfConfig {
            max_iter: steps,
            ..SymNmfConfig::default()
        };
        let out = SymNmfSolver::with_config(config)
            .solve(&w, h0.clone())
            .unwrap();
        assert!(out.iterations <= steps);
        for &v in out.h.as_slice() {
            assert!(v.is_finite() && v >= 0.0, "negative entry after {} steps", steps);
        }
    }

    let out = SymNmfSolver::new().solve(&w, h0).unwrap();
    assert!(out.iterations <= MAX_ITER);
    assert_eq!(out.h.shape(), (15, 3));
    assert!(out.h.as_slice().iter().all(|&v| v >= 0.0));
    log::info!("{}", out.summary());
}

#[test]
fn test_solver_is_deterministic() {
    let (w, h0) = blob_problem(2);
    let a = symnmf(&w, h0.clone()).unwrap();
    let b = symnmf(&w, h0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_problem_returns_input() {
    let w = Matrix::zeros(0, 0).unwrap();
    let h0 = Matrix::zeros(0, 2).unwrap();
    let out = SymNmfSolver::new().solve(&w, h0.clone()).unwrap();

    assert_eq!(out.h, h0);
    assert_eq!(out.iterations, 0);
    assert!(out.history.is_empty());
}

#[test]
fn test_zero_row_aborts_with_numerical_error() {
    let w = two_point_w();
    let h0 = Matrix::from_rows(&[vec![1.0], vec![0.0]]).unwrap();
    let err = SymNmfSolver::new().solve(&w, h0).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Numerical);
    assert!(matches!(
        err,
        SymNmfError::DegenerateUpdate {
            row: 1,
            col: 0,
            iteration: 0,
            ..
        }
    ));
}

#[test]
fn test_invalid_initial_factor_is_config_error() {
    let w = two_point_w();
    let h0 = Matrix::from_rows(&[vec![1.0], vec![-0.5]]).unwrap();
    let err = SymNmfSolver::new().solve(&w, h0).unwrap_err();
    assert!(err.is_config());

    let h0 = Matrix::from_rows(&[vec![1.0], vec![1.0], vec![1.0]]).unwrap();
    let err = SymNmfSolver::new().solve(&w, h0).unwrap_err();
    assert_eq!(err, SymNmfError::dimension_mismatch(2, 3));
}

#[test]
fn test_initialize_h_range_and_seed() {
    let (w, _) = blob_problem(2);
    let upper = init_upper_bound(&w, 4);
    assert_relative_eq!(upper, 2.0 * (w.mean() / 4.0).sqrt());

    let a = initialize_h(&w, 4, &InitConfig::default()).unwrap();
    let b = initialize_h(&w, 4, &InitConfig::default()).unwrap();
    let c = initialize_h(&w, 4, &InitConfig { seed: 7 }).unwrap();

    assert_eq!(a.shape(), (15, 4));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.as_slice().iter().all(|&v| (0.0..upper).contains(&v)));

    assert!(initialize_h(&w, 0, &InitConfig::default()).is_err());
}

#[test]
fn test_initialize_h_zero_mean_gives_zero_factor() {
    let w = Matrix::zeros(3, 3).unwrap();
    let h = initialize_h(&w, 2, &InitConfig::default()).unwrap();
    assert!(h.as_slice().iter().all(|&v| v == 0.0));
}
