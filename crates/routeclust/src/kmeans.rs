use crate::types::{Point, squared_distance};
use crate::{ClusteringError, DimensionMismatchSnafu, WeightCountMismatchSnafu};
use serde::{Deserialize, Serialize};
use snafu::ensure;

pub mod init;
pub mod lloyds;
pub mod plus_plus_init;
mod validation;

// References:
// - Least Squares Quantization in PCM (S. Lloyd)
// - https://scikit-learn.org/stable/modules/generated/sklearn.cluster.KMeans.html
// - Noisy, Greedy and Not so Greedy k-Means++ (A. Bhattacharya et al)
//   https://drops.dagstuhl.de/storage/00lipics/lipics-vol173-esa2020/LIPIcs.ESA.2020.18/LIPIcs.ESA.2020.18.pdf

// sklearn KMeans default
pub const DEFAULT_MAX_ITER: usize = 300;

/// When the loop decides that the centers stopped moving.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convergence {
    /// The new centers, taken as an unordered set of coordinate tuples, are
    /// exactly equal to the previous ones.
    #[default]
    Exact,
    /// Every center moved by at most this Euclidean distance since the
    /// previous iteration. Compared index by index.
    Tolerance(f64),
}

/// How the initial centers are picked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Init {
    /// `k` distinct input points drawn uniformly without replacement.
    #[default]
    Random,
    /// Greedy k-means++.
    PlusPlus,
    /// Distinct input positions, one per group.
    Indices(Vec<usize>),
    /// Explicit coordinates, one per group.
    Centers(Vec<Point>),
}

impl Init {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Init::Random => "random",
            Init::PlusPlus => "plus_plus",
            Init::Indices(_) => "indices",
            Init::Centers(_) => "centers",
        }
    }
}

/// What to do with a center that ends up with no points after an assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroupPolicy {
    /// Fail the run with [`ClusteringError::EmptyGroup`].
    #[default]
    Error,
    /// Leave the center where it was. The group stays empty unless a later
    /// assignment pass gives it points.
    KeepPrevious,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansOptions {
    /// Upper bound on assign/recompute passes.
    pub max_iter: usize,
    pub convergence: Convergence,
    pub init: Init,
    pub empty_groups: EmptyGroupPolicy,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            convergence: Convergence::Exact,
            init: Init::Random,
            empty_groups: EmptyGroupPolicy::Error,
        }
    }
}

/// The outcome of one run.
///
/// `centers`, `groups` and every value in `assignments` share the index space
/// `0..k`. `assignments[i]` is the group of the i-th input point, and
/// `groups[g]` holds the points of group `g` in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    pub centers: Vec<Point>,
    pub groups: Vec<Vec<Point>>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

impl Clustering {
    pub(crate) fn new<P: AsRef<[f64]>>(
        points: &[P],
        centers: Vec<Point>,
        assignments: Vec<usize>,
        iterations: usize,
        converged: bool,
    ) -> Self {
        let mut groups = vec![Vec::new(); centers.len()];
        for (point, &group) in points.iter().zip(&assignments) {
            groups[group].push(Point::new(point.as_ref()));
        }

        Clustering {
            centers,
            groups,
            assignments,
            iterations,
            converged,
        }
    }

    pub fn k(&self) -> usize {
        self.centers.len()
    }

    /// Input positions of the points in `group`, ascending.
    pub fn members(&self, group: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |&(_, &g)| g == group)
            .map(|(i, _)| i)
    }

    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    pub fn non_empty_groups(&self) -> usize {
        self.groups.iter().filter(|g| !g.is_empty()).count()
    }

    /// Sum of squared distances from every point to its group's center.
    pub fn inertia(&self) -> f64 {
        self.groups
            .iter()
            .zip(&self.centers)
            .map(|(group, center)| {
                group
                    .iter()
                    .map(|p| squared_distance(p.coords(), center.coords()))
                    .sum::<f64>()
            })
            .sum()
    }

    /// Adds up a per-point quantity (one weight per input point, in input order)
    /// for every group.
    pub fn group_totals(&self, weights: &[f64]) -> Result<Vec<f64>, ClusteringError> {
        ensure!(
            weights.len() == self.assignments.len(),
            WeightCountMismatchSnafu {
                expected: self.assignments.len(),
                found: weights.len(),
            }
        );

        let mut totals = vec![0.0; self.k()];
        for (&group, &w) in self.assignments.iter().zip(weights) {
            totals[group] += w;
        }
        Ok(totals)
    }

    /// The group a new point would join, with the same lowest-index tie-break
    /// the assignment pass uses.
    pub fn nearest_center(&self, point: &[f64]) -> Result<usize, ClusteringError> {
        let expected = self.centers.first().map_or(0, Point::dim);
        ensure!(
            point.len() == expected,
            DimensionMismatchSnafu {
                index: 0usize,
                expected,
                found: point.len(),
            }
        );
        Ok(lloyds::nearest_center(point, &self.centers).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn two_routes() -> Clustering {
        let points = [[0.0, 0.0], [10.0, 0.0], [0.0, 1.0], [10.0, 1.0]];
        Clustering::new(
            &points,
            vec![Point::from((0.0, 0.5)), Point::from((10.0, 0.5))],
            vec![0, 1, 0, 1],
            2,
            true,
        )
    }

    #[test]
    fn groups_follow_assignments() {
        let c = two_routes();
        assert_eq!(c.k(), 2);
        assert_eq!(
            c.groups[0],
            vec![Point::from((0.0, 0.0)), Point::from((0.0, 1.0))]
        );
        assert_eq!(
            c.groups[1],
            vec![Point::from((10.0, 0.0)), Point::from((10.0, 1.0))]
        );
        assert_eq!(c.group_sizes(), vec![2, 2]);
        assert_eq!(c.non_empty_groups(), 2);
    }

    #[test]
    fn members_in_input_order() {
        let c = two_routes();
        assert_eq!(c.members(0).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(c.members(1).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(c.members(5).count(), 0);
    }

    #[test]
    fn inertia_known_value() {
        // Every point is 0.5 away from its center
        let c = two_routes();
        assert!((c.inertia() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn group_totals_sum_weights() {
        let c = two_routes();
        let totals = c.group_totals(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(totals, vec![4.0, 6.0]);
    }

    #[test]
    fn group_totals_length_mismatch() {
        let err = two_routes().group_totals(&[1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("weight count 1"));
    }

    #[test]
    fn nearest_center_tie_goes_to_lower_index() {
        let c = two_routes();
        assert_eq!(c.nearest_center(&[5.0, 0.5]).unwrap(), 0);
        assert_eq!(c.nearest_center(&[9.0, 3.0]).unwrap(), 1);
        assert!(c.nearest_center(&[1.0]).is_err());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: KMeansOptions =
            serde_json::from_str(r#"{"convergence": {"tolerance": 0.001}}"#).unwrap();
        assert_eq!(options.max_iter, DEFAULT_MAX_ITER);
        assert_eq!(options.convergence, Convergence::Tolerance(0.001));
        assert_eq!(options.init, Init::Random);
        assert_eq!(options.empty_groups, EmptyGroupPolicy::Error);
    }
}
