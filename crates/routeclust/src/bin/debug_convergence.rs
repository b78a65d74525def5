use clap::Parser;
use routeclust::debug_helpers::{BoardArgs, init_tracing, random_board};
use routeclust::{
    Clustering, ClusteringError, Convergence, EmptyGroupPolicy, KMeansOptions, find_centers_extra,
    rng,
};
use std::time::{Duration, Instant};

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    board: BoardArgs,

    /// Number of consecutive seeds to try, starting at --seed
    #[arg(long, default_value_t = 10)]
    runs: u64,

    #[arg(long, default_value_t = 1e-4)]
    tolerance: f64,
}

fn run(
    seed: u64,
    board: &[routeclust::Point],
    k: usize,
    convergence: Convergence,
) -> (Result<Clustering, ClusteringError>, Duration) {
    let options = KMeansOptions {
        convergence,
        empty_groups: EmptyGroupPolicy::KeepPrevious,
        ..Default::default()
    };
    // Same generator state for both modes, so they start from the same centers
    let mut rng = rng::from_seed(seed);
    let t = Instant::now();
    let result = find_centers_extra(&mut rng, board, k, &options);
    (result, t.elapsed())
}

fn describe(result: &Result<Clustering, ClusteringError>, elapsed: Duration) -> String {
    match result {
        Ok(c) => format!(
            "{:>3} iterations{} inertia={:.6} ({:?})",
            c.iterations,
            if c.converged { "" } else { " (cap)" },
            c.inertia(),
            elapsed,
        ),
        Err(e) => format!("error: {e}"),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.board.verbose);

    for seed in args.board.seed..args.board.seed + args.runs {
        let board = random_board(&mut rng::from_seed(seed), args.board.points);

        let (exact, exact_elapsed) = run(seed, &board, args.board.k, Convergence::Exact);
        let (tol, tol_elapsed) = run(
            seed,
            &board,
            args.board.k,
            Convergence::Tolerance(args.tolerance),
        );

        let same_partition = match (&exact, &tol) {
            (Ok(a), Ok(b)) => a.assignments == b.assignments,
            _ => false,
        };

        println!(
            "seed {seed}: exact {} | tolerance {} | same partition: {same_partition}",
            describe(&exact, exact_elapsed),
            describe(&tol, tol_elapsed),
        );
    }
}
