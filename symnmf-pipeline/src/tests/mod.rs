
use symnmf_core::VectorSet;

/// Initialize logging for tests
pub(crate) fn init() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Two tight groups of three points, far apart.
pub(crate) fn two_groups() -> VectorSet {
    VectorSet::new(&[
        vec![0.0, 0.0],
        vec![0.2, 0.1],
        vec![0.1, 0.3],
        vec![5.0, 5.0],
        vec![5.2, 4.9],
        vec![4.9, 5.1],
    ])
    .unwrap()
}
