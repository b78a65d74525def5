use super::{Clustering, Convergence, EmptyGroupPolicy, KMeansOptions, init, validation};
use crate::types::{Point, cmp_coords, squared_distance};
use crate::{ClusteringError, EmptyGroupSnafu};
use rand::RngExt;
use tracing::{debug, trace, warn};

/// Index of the closest center and the squared distance to it.
///
/// Scans left to right and only moves on a strictly smaller distance, so ties
/// go to the lowest index.
#[inline]
pub fn nearest_center(point: &[f64], centers: &[Point]) -> (usize, f64) {
    let mut min = f64::INFINITY;
    let mut min_idx = 0;
    for (j, center) in centers.iter().enumerate() {
        let d = squared_distance(point, center.coords());
        if d < min {
            min = d;
            min_idx = j;
        }
    }
    (min_idx, min)
}

#[inline]
pub fn assign_points<P: AsRef<[f64]>>(points: &[P], centers: &[Point], assignments: &mut [usize]) {
    for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
        *assignment = nearest_center(point.as_ref(), centers).0;
    }
}

#[derive(Debug)]
pub struct UpdateResult {
    pub counts: Vec<usize>,
    /// Largest squared distance any single center moved.
    pub max_shift_squared: f64,
}

/// Replaces every center with the mean of its assigned points.
pub fn update_centers<P: AsRef<[f64]>>(
    points: &[P],
    assignments: &[usize],
    centers: &mut [Point],
    empty_groups: EmptyGroupPolicy,
    iteration: usize,
) -> Result<UpdateResult, ClusteringError> {
    let k = centers.len();
    let dim = centers.first().map_or(0, Point::dim);

    let mut counts = vec![0usize; k];
    let mut sums = vec![vec![0.0f64; dim]; k];

    for (point, &assigned) in points.iter().zip(assignments) {
        assert!(assigned < k);

        counts[assigned] += 1;
        for (sum, x) in sums[assigned].iter_mut().zip(point.as_ref()) {
            *sum += x;
        }
    }

    let mut max_shift_squared = 0f64;

    for (i, sum) in sums.into_iter().enumerate() {
        let count = counts[i];
        if count == 0 {
            match empty_groups {
                EmptyGroupPolicy::Error => {
                    return EmptyGroupSnafu {
                        group: i,
                        iteration,
                    }
                    .fail();
                }
                EmptyGroupPolicy::KeepPrevious => {
                    debug!(group = i, iteration, "empty group keeps its previous center");
                    continue;
                }
            }
        }

        let mean: Vec<f64> = sum.into_iter().map(|s| s / count as f64).collect();
        max_shift_squared = max_shift_squared.max(squared_distance(centers[i].coords(), &mean));
        centers[i] = Point::new(mean);
    }

    Ok(UpdateResult {
        counts,
        max_shift_squared,
    })
}

fn center_set(centers: &[Point]) -> Vec<&[f64]> {
    let mut set: Vec<&[f64]> = centers.iter().map(Point::coords).collect();
    set.sort_by(|a, b| cmp_coords(a, b));
    set.dedup_by(|a, b| a == b);
    set
}

/// Exact equality of the two center lists taken as sets of coordinate tuples.
pub fn same_center_set(a: &[Point], b: &[Point]) -> bool {
    center_set(a) == center_set(b)
}

fn has_converged(
    convergence: Convergence,
    previous: &[Point],
    current: &[Point],
    max_shift_squared: f64,
) -> bool {
    match convergence {
        Convergence::Exact => same_center_set(previous, current),
        Convergence::Tolerance(tolerance) => max_shift_squared <= tolerance * tolerance,
    }
}

/// Runs Lloyd's algorithm on `points` until the centers settle or
/// `options.max_iter` passes are done.
///
/// The returned centers are always the means of the returned groups (except
/// for groups left empty under [`EmptyGroupPolicy::KeepPrevious`]).
pub fn find_centers<P: AsRef<[f64]>>(
    rng: &mut impl RngExt,
    points: &[P],
    k: usize,
    options: &KMeansOptions,
) -> Result<Clustering, ClusteringError> {
    let dim = validation::validate_points(points, k)?;
    validation::validate_options(options)?;

    let mut centers = init::initial_centers(rng, points, k, dim, &options.init)?;
    debug!(
        n = points.len(),
        k,
        dim,
        init = options.init.label(),
        "starting lloyd's loop"
    );

    let mut previous = Vec::with_capacity(k);
    let mut assignments = vec![0usize; points.len()];

    for iteration in 1..=options.max_iter {
        previous.clone_from(&centers);

        assign_points(points, &centers, &mut assignments);
        let update = update_centers(
            points,
            &assignments,
            &mut centers,
            options.empty_groups,
            iteration,
        )?;
        trace!(
            iteration,
            max_shift = update.max_shift_squared.sqrt(),
            empty_groups = update.counts.iter().filter(|&&c| c == 0).count(),
            "recomputed centers"
        );

        if has_converged(
            options.convergence,
            &previous,
            &centers,
            update.max_shift_squared,
        ) {
            debug!(iterations = iteration, "converged");
            return Ok(Clustering::new(points, centers, assignments, iteration, true));
        }
    }

    warn!(
        max_iter = options.max_iter,
        "iteration cap reached before the centers settled"
    );
    Ok(Clustering::new(
        points,
        centers,
        assignments,
        options.max_iter,
        false,
    ))
}
