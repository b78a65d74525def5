use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use routeclust::{
    ClusteringError, EmptyGroupPolicy, ErrorKind, Init, KMeansOptions, find_centers,
    find_centers_extra, find_centers_seeded,
};
use std::collections::BTreeSet;

fn board_and_k() -> impl Strategy<Value = (Vec<[f64; 2]>, usize)> {
    prop::collection::vec(
        (-1_000.0f64..1_000.0, -1_000.0f64..1_000.0).prop_map(|(x, y)| [x, y]),
        1..60,
    )
    .prop_flat_map(|points| {
        let n = points.len();
        (Just(points), 1..=n)
    })
}

// Stops on a small street grid, so many of them share an address
fn grid_and_k() -> impl Strategy<Value = (Vec<[f64; 2]>, usize)> {
    prop::collection::vec((0i32..4, 0i32..4), 1..40).prop_flat_map(|cells| {
        let distinct = cells.iter().collect::<BTreeSet<_>>().len();
        let points: Vec<[f64; 2]> = cells
            .iter()
            .map(|&(x, y)| [f64::from(x) * 100.0, f64::from(y) * 100.0])
            .collect();
        (Just(points), 1..=distinct)
    })
}

fn lenient(init: Init) -> KMeansOptions {
    KMeansOptions {
        init,
        empty_groups: EmptyGroupPolicy::KeepPrevious,
        ..Default::default()
    }
}

fn run(points: &[[f64; 2]], k: usize, seed: u64, init: Init) -> routeclust::Clustering {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    find_centers_extra(&mut rng, points, k, &lenient(init)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_point_in_exactly_one_group((points, k) in board_and_k(), seed in any::<u64>()) {
        let result = run(&points, k, seed, Init::Random);

        prop_assert_eq!(result.assignments.len(), points.len());
        prop_assert_eq!(result.centers.len(), k);
        prop_assert_eq!(result.groups.len(), k);
        prop_assert_eq!(result.group_sizes().iter().sum::<usize>(), points.len());

        for (i, point) in points.iter().enumerate() {
            let group = result.assignments[i];
            prop_assert!(group < k);
            prop_assert!(result.members(group).any(|m| m == i));
            prop_assert!(result.groups[group].iter().any(|p| p.coords() == point.as_slice()));
        }
    }

    #[test]
    fn group_count_is_bounded((points, k) in board_and_k(), seed in any::<u64>()) {
        let result = run(&points, k, seed, Init::PlusPlus);
        let non_empty = result.non_empty_groups();
        prop_assert!((1..=k).contains(&non_empty));
    }

    #[test]
    fn centers_are_means_of_their_groups((points, k) in board_and_k(), seed in any::<u64>()) {
        let result = run(&points, k, seed, Init::Random);

        for (center, group) in result.centers.iter().zip(&result.groups) {
            if group.is_empty() {
                continue;
            }
            for d in 0..2 {
                let mean = group.iter().map(|p| p.coords()[d]).sum::<f64>() / group.len() as f64;
                let c = center.coords()[d];
                prop_assert!((c - mean).abs() <= 1e-9 * mean.abs().max(1.0), "{} vs {}", c, mean);
            }
        }
    }

    #[test]
    fn same_seed_same_clustering((points, k) in board_and_k(), seed in any::<u64>()) {
        let a = run(&points, k, seed, Init::Random);
        let b = run(&points, k, seed, Init::Random);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn default_policy_only_fails_on_empty_groups((points, k) in board_and_k()) {
        match find_centers(&points, k) {
            Ok(result) => prop_assert_eq!(result.non_empty_groups(), k),
            Err(e @ ClusteringError::EmptyGroup { .. }) => {
                prop_assert_eq!(e.kind(), ErrorKind::InvalidClusteringState);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn shared_addresses_never_empty_the_first_pass((points, k) in grid_and_k(), seed in any::<u64>()) {
        match find_centers_seeded(&points, k, seed) {
            Ok(result) => prop_assert_eq!(result.non_empty_groups(), k),
            Err(ClusteringError::EmptyGroup { iteration, .. }) => prop_assert!(iteration > 1),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn k_above_point_count_is_rejected((points, _) in board_and_k(), extra in 1usize..5) {
        let err = find_centers(&points, points.len() + extra).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn singletons() {
    let points = [[3.0, 1.0], [-2.0, 7.5], [0.0, 0.0], [100.0, -40.0], [5.5, 5.5]];
    let result = find_centers(&points, points.len()).unwrap();

    assert_eq!(result.iterations, 1);
    assert!(result.converged);
    assert!(result.groups.iter().all(|g| g.len() == 1));
}
