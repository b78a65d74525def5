use super::{Init, plus_plus_init};
use crate::types::{Point, cmp_coords};
use crate::{
    ClusteringError, DuplicateInitialIndexSnafu, InitialCenterCountSnafu,
    InitialCenterDimensionSnafu, InitialIndexOutOfRangeSnafu, TooFewDistinctPointsSnafu,
};
use rand::RngExt;
use rand::seq::index;
use snafu::ensure;

/// First position of every distinct coordinate tuple, in input order.
pub fn distinct_positions<P: AsRef<[f64]>>(points: &[P]) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..points.len()).collect();
    positions.sort_by(|&a, &b| {
        cmp_coords(points[a].as_ref(), points[b].as_ref()).then_with(|| a.cmp(&b))
    });
    positions.dedup_by(|later, kept| {
        cmp_coords(points[*later].as_ref(), points[*kept].as_ref()).is_eq()
    });
    positions.sort_unstable();
    positions
}

fn check_distinct(distinct: usize, k: usize) -> Result<(), ClusteringError> {
    ensure!(k <= distinct, TooFewDistinctPointsSnafu { k, distinct });
    Ok(())
}

/// `k` positions holding pairwise distinct points, uniformly, without
/// replacement. Stops sharing an address count once.
pub fn random_init<P: AsRef<[f64]>>(
    rng: &mut impl RngExt,
    points: &[P],
    k: usize,
) -> Result<Vec<usize>, ClusteringError> {
    let distinct = distinct_positions(points);
    check_distinct(distinct.len(), k)?;

    Ok(index::sample(rng, distinct.len(), k)
        .into_iter()
        .map(|i| distinct[i])
        .collect())
}

fn check_indices(indices: &[usize], n: usize, k: usize) -> Result<(), ClusteringError> {
    ensure!(
        indices.len() == k,
        InitialCenterCountSnafu {
            k,
            found: indices.len()
        }
    );

    let mut seen = vec![false; n];
    for &index in indices {
        ensure!(index < n, InitialIndexOutOfRangeSnafu { index, n });
        ensure!(!seen[index], DuplicateInitialIndexSnafu { index });
        seen[index] = true;
    }
    Ok(())
}

fn check_centers(centers: &[Point], k: usize, dim: usize) -> Result<(), ClusteringError> {
    ensure!(
        centers.len() == k,
        InitialCenterCountSnafu {
            k,
            found: centers.len()
        }
    );
    for (index, center) in centers.iter().enumerate() {
        ensure!(
            center.dim() == dim,
            InitialCenterDimensionSnafu {
                index,
                expected: dim,
                found: center.dim(),
            }
        );
    }
    Ok(())
}

/// Builds the first set of centers. Points must already be validated against
/// `k` and `dim`.
pub fn initial_centers<P: AsRef<[f64]>>(
    rng: &mut impl RngExt,
    points: &[P],
    k: usize,
    dim: usize,
    init: &Init,
) -> Result<Vec<Point>, ClusteringError> {
    let n = points.len();
    let indices = match init {
        Init::Random => random_init(rng, points, k)?,
        Init::PlusPlus => {
            check_distinct(distinct_positions(points).len(), k)?;
            plus_plus_init::find_initial(rng, points, k)
        }
        Init::Indices(indices) => {
            check_indices(indices, n, k)?;
            indices.clone()
        }
        Init::Centers(centers) => {
            check_centers(centers, k, dim)?;
            return Ok(centers.clone());
        }
    };

    Ok(indices
        .into_iter()
        .map(|i| Point::new(points[i].as_ref()))
        .collect())
}
