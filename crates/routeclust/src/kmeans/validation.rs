//! Argument checks run before any iteration.

use super::{Convergence, KMeansOptions};
use crate::{
    ClusteringError, DimensionMismatchSnafu, EmptyInputSnafu, InvalidToleranceSnafu,
    TooManyGroupsSnafu, ZeroDimensionSnafu, ZeroGroupsSnafu, ZeroIterationCapSnafu,
};
use snafu::ensure;

/// Checks the point set against `k` and returns the shared dimensionality.
pub(crate) fn validate_points<P: AsRef<[f64]>>(
    points: &[P],
    k: usize,
) -> Result<usize, ClusteringError> {
    ensure!(!points.is_empty(), EmptyInputSnafu);
    ensure!(k > 0, ZeroGroupsSnafu);
    let n = points.len();
    ensure!(k <= n, TooManyGroupsSnafu { k, n });

    let dim = points[0].as_ref().len();
    ensure!(dim > 0, ZeroDimensionSnafu);
    for (index, point) in points.iter().enumerate() {
        let found = point.as_ref().len();
        ensure!(
            found == dim,
            DimensionMismatchSnafu {
                index,
                expected: dim,
                found,
            }
        );
    }

    Ok(dim)
}

pub(crate) fn validate_options(options: &KMeansOptions) -> Result<(), ClusteringError> {
    ensure!(options.max_iter > 0, ZeroIterationCapSnafu);
    if let Convergence::Tolerance(tolerance) = options.convergence {
        ensure!(
            tolerance.is_finite() && tolerance >= 0.0,
            InvalidToleranceSnafu { tolerance }
        );
    }
    Ok(())
}
