#[cfg(feature = "_debug")]
pub mod debug_helpers;
#[cfg(feature = "_debug")]
pub mod kmeans;
#[cfg(not(feature = "_debug"))]
mod kmeans;
#[cfg(feature = "_debug")]
pub mod rng;
#[cfg(not(feature = "_debug"))]
mod rng;
mod types;

pub use kmeans::{Clustering, Convergence, EmptyGroupPolicy, Init, KMeansOptions};
use rand::RngExt;
use snafu::prelude::*;
pub use types::Point;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ClusteringError {
    #[snafu(display("point set is empty"))]
    EmptyInput,

    #[snafu(display("group count must be positive"))]
    ZeroGroups,

    #[snafu(display("group count {k} exceeds the number of points ({n})"))]
    TooManyGroups { k: usize, n: usize },

    #[snafu(display("group count {k} exceeds the number of distinct points ({distinct})"))]
    TooFewDistinctPoints { k: usize, distinct: usize },

    #[snafu(display("points must have at least one coordinate"))]
    ZeroDimension,

    #[snafu(display("point {index} has {found} coordinates, expected {expected}"))]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[snafu(display("iteration cap must be positive"))]
    ZeroIterationCap,

    #[snafu(display("convergence tolerance must be finite and non-negative, got {tolerance}"))]
    InvalidTolerance { tolerance: f64 },

    #[snafu(display("expected {k} initial centers, got {found}"))]
    InitialCenterCount { k: usize, found: usize },

    #[snafu(display("initial point index {index} is out of range for {n} points"))]
    InitialIndexOutOfRange { index: usize, n: usize },

    #[snafu(display("initial point index {index} is used more than once"))]
    DuplicateInitialIndex { index: usize },

    #[snafu(display("initial center {index} has {found} coordinates, expected {expected}"))]
    InitialCenterDimension {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[snafu(display("weight count {found} doesn't match the number of points ({expected})"))]
    WeightCountMismatch { expected: usize, found: usize },

    #[snafu(display("group {group} has no points after iteration {iteration}"))]
    EmptyGroup { group: usize, iteration: usize },
}

/// Coarse classification of [`ClusteringError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call was rejected before any iteration ran.
    InvalidArgument,
    /// An iteration produced a state the engine can't continue from.
    InvalidClusteringState,
}

impl ClusteringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClusteringError::EmptyGroup { .. } => ErrorKind::InvalidClusteringState,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Split points into `k` groups with Lloyd's algorithm.
///
/// ```
/// use rand::SeedableRng;
/// use routeclust::{Init, KMeansOptions, Point};
///
/// let stops = [[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
/// let options = KMeansOptions {
///     init: Init::Indices(vec![0, 2]),
///     ..Default::default()
/// };
///
/// let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(1);
/// let routes = routeclust::find_centers_extra(&mut rng, &stops, 2, &options).unwrap();
///
/// assert_eq!(routes.centers, vec![Point::from((0.0, 0.5)), Point::from((10.0, 0.5))]);
/// assert_eq!(routes.assignments, vec![0, 0, 1, 1]);
/// ```
///
/// Points can be anything that exposes a coordinate slice (`[f64; N]`,
/// `Vec<f64>`, [`Point`]), but all of them must have the same length, and
/// `k` must be between 1 and the number of points.
///
/// Uses the crate's fixed-seed generator, so repeated calls give the same
/// answer. See [`find_centers_seeded`] to pick the seed, and
/// [`find_centers_extra`] to bring a generator and tune the loop.
///
/// Returns the centers, the points of every group and the group of every
/// input point. With the default options an empty group is reported as
/// [`ClusteringError::EmptyGroup`].
pub fn find_centers<P: AsRef<[f64]>>(
    points: &[P],
    k: usize,
) -> Result<Clustering, ClusteringError> {
    find_centers_extra(&mut rng::new(), points, k, &KMeansOptions::default())
}

pub fn find_centers_seeded<P: AsRef<[f64]>>(
    points: &[P],
    k: usize,
    seed: u64,
) -> Result<Clustering, ClusteringError> {
    find_centers_extra(
        &mut rng::from_seed(seed),
        points,
        k,
        &KMeansOptions::default(),
    )
}

pub fn find_centers_extra<P: AsRef<[f64]>>(
    rng: &mut impl RngExt,
    points: &[P],
    k: usize,
    options: &KMeansOptions,
) -> Result<Clustering, ClusteringError> {
    kmeans::lloyds::find_centers(rng, points, k, options)
}
