use clap::{Parser, ValueEnum};
use routeclust::debug_helpers::{BoardArgs, init_tracing, random_board};
use routeclust::{Convergence, EmptyGroupPolicy, Init, KMeansOptions, find_centers_extra, rng};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Clone, Copy, ValueEnum)]
enum InitArg {
    Random,
    PlusPlus,
}

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    board: BoardArgs,

    /// How to pick the initial centers
    #[arg(long, value_enum, default_value_t = InitArg::Random)]
    init: InitArg,

    /// Stop once no center moves more than this (exact set equality if unset)
    #[arg(long)]
    tolerance: Option<f64>,

    #[arg(long, default_value_t = routeclust::kmeans::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Keep the previous center of an empty group instead of failing
    #[arg(long)]
    keep_empty: bool,

    /// Print the whole result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.board.verbose);

    let mut rng = rng::from_seed(args.board.seed);
    let board = random_board(&mut rng, args.board.points);

    let options = KMeansOptions {
        max_iter: args.max_iter,
        convergence: args
            .tolerance
            .map_or(Convergence::Exact, Convergence::Tolerance),
        init: match args.init {
            InitArg::Random => Init::Random,
            InitArg::PlusPlus => Init::PlusPlus,
        },
        empty_groups: if args.keep_empty {
            EmptyGroupPolicy::KeepPrevious
        } else {
            EmptyGroupPolicy::Error
        },
    };

    let t = Instant::now();
    let result = match find_centers_extra(&mut rng, &board, args.board.k, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = t.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
        return ExitCode::SUCCESS;
    }

    for (i, (center, group)) in result.centers.iter().zip(&result.groups).enumerate() {
        let c = center.coords();
        println!(
            "group {}: {} points, center ({:.4}, {:.4})",
            i + 1,
            group.len(),
            c[0],
            c[1],
        );
    }
    println!(
        "n={}, k={}, iterations={}, converged={}, inertia={:.4}, {:?}",
        board.len(),
        result.k(),
        result.iterations,
        result.converged,
        result.inertia(),
        elapsed,
    );

    ExitCode::SUCCESS
}
