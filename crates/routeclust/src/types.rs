use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A point (or center) in N-dimensional Euclidean space.
///
/// The engine doesn't care about the dimensionality as long as it's consistent
/// within one run. Projected addresses are 2-D.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn new(coords: impl Into<Vec<f64>>) -> Self {
        Point(coords.into())
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn distance(&self, other: &[f64]) -> f64 {
        squared_distance(&self.0, other).sqrt()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for Point {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point(coords)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Point(coords.to_vec())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point(vec![x, y])
    }
}

// Both slices must have the same length, callers validate dimensions upfront
#[inline]
pub(crate) fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .fold(0.0, |acc, (x, y)| {
            let d = x - y;
            d.mul_add(d, acc)
        })
}

// -0.0 and 0.0 compare equal, same as with `==`
pub(crate) fn cmp_coords(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x + 0.0).total_cmp(&(y + 0.0)))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
