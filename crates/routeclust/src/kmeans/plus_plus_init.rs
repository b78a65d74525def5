use crate::types::squared_distance;
use rand::RngExt;

// Scikit uses (2+log(k)) candidates per step
fn n_candidates(k: usize) -> usize {
    2 + (k as f64).ln() as usize
}

#[inline(always)]
fn sample_by_distance(
    rng: &mut impl RngExt,
    min_distances: &[f64],
    sum: f64,
    chosen: &[bool],
) -> usize {
    let random_threshold = rng.random::<f64>() * sum;
    let mut cumsum = 0.0;

    for (i, &distance) in min_distances.iter().enumerate() {
        cumsum += distance;
        if cumsum > random_threshold {
            return i;
        }
    }

    // Rounding (or a NaN sum) pushed the threshold past the end; take the last
    // point that isn't a center yet, preferring one away from every center
    let unchosen = || (0..min_distances.len()).rev().filter(move |&i| !chosen[i]);
    unchosen()
        .find(|&i| min_distances[i] > 0.0)
        .or_else(|| unchosen().next())
        .unwrap_or(min_distances.len() - 1)
}

/// Greedy k-means++: every step samples a few candidates proportionally to
/// their squared distance from the closest chosen center and keeps the one
/// that minimises the total potential.
///
/// Returns `min(k, n)` distinct input positions.
pub fn find_initial<P: AsRef<[f64]>>(rng: &mut impl RngExt, points: &[P], k: usize) -> Vec<usize> {
    let n = points.len();

    // More clusters than points => silent clamping
    let k = k.min(n);

    let mut init_points = Vec::<usize>::with_capacity(k);
    if k == 0 {
        return init_points;
    }

    let mut chosen = vec![false; n];
    let c0 = rng.random_range(0..n);
    init_points.push(c0);
    chosen[c0] = true;

    let first = points[c0].as_ref();
    let mut min_distances: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p.as_ref(), first))
        .collect();
    let mut min_distances_sum: f64 = min_distances.iter().sum();

    let n_candidates = n_candidates(k);
    let mut candidate_min_distances = vec![vec![0.0f64; n]; n_candidates];
    let mut candidates = vec![0usize; n_candidates];
    let mut potentials = vec![0.0f64; n_candidates];

    for _ in 1..k {
        if min_distances_sum <= 0.0 {
            // Every remaining point coincides with a chosen center
            let unchosen: Vec<usize> = (0..n).filter(|&i| !chosen[i]).collect();
            let next = unchosen[rng.random_range(0..unchosen.len())];
            init_points.push(next);
            chosen[next] = true;
            continue;
        }

        for candidate in candidates.iter_mut() {
            *candidate = sample_by_distance(rng, &min_distances, min_distances_sum, &chosen);
        }

        potentials.fill(0.0);
        for (i, point) in points.iter().enumerate() {
            let (point, current_min) = (point.as_ref(), min_distances[i]);
            for (j, &candidate) in candidates.iter().enumerate() {
                let d = squared_distance(points[candidate].as_ref(), point).min(current_min);
                candidate_min_distances[j][i] = d;
                potentials[j] += d;
            }
        }

        let mut best_potential = f64::INFINITY;
        let mut best = 0;
        for (j, &potential) in potentials.iter().enumerate() {
            if potential < best_potential {
                best_potential = potential;
                best = j;
            }
        }

        std::mem::swap(&mut min_distances, &mut candidate_min_distances[best]);
        min_distances_sum = best_potential;
        init_points.push(candidates[best]);
        chosen[candidates[best]] = true;
    }

    init_points
}
