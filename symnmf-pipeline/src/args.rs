//! Parsing of the numeric command line arguments.
//!
//! Arguments arrive as raw strings so a malformed value reports the same line
//! as an out-of-range one.

use symnmf_core::kmeans::DEFAULT_EPSILON;

use crate::error::{PipelineError, Result};

/// Number of clusters: a non-negative integer. Range checks happen later,
/// once N is known.
pub fn parse_cluster_count(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| PipelineError::ClusterCountArg(raw.to_string()))
}

pub fn parse_max_iter(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| PipelineError::MaxIterArg(raw.to_string()))
}

/// Convergence threshold; defaults to 1e-3 when absent.
pub fn parse_epsilon(raw: Option<&str>) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_EPSILON);
    };
    match raw.trim().parse::<f64>() {
        Ok(eps) if eps.is_finite() && eps >= 0.0 => Ok(eps),
        _ => Err(PipelineError::EpsilonArg(raw.to_string())),
    }
}
