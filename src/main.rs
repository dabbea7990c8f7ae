//! Sliding-Tile Puzzle Benchmark
//!
//! Generates solvable random boards for an N×N sliding-tile puzzle, solves
//! each one with A* under three heuristics (misplaced tiles, Manhattan
//! distance, Manhattan plus linear conflicts) and reports the average path
//! length, expanded states and wall time per heuristic.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::info;

use fifteen::experiment::{format_summary_table, summarize, ExperimentConfig};
use fifteen::generator::WalkBounds;
use fifteen::heuristics::Heuristic;
use fifteen::{persistence, puzzle_for_side, PuzzleOps};

/// Benchmarks A* heuristics on the sliding-tile puzzle.
#[derive(Parser)]
#[command(name = "fifteen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tiles per row and column (2 to 5).
    #[arg(long, global = true, default_value_t = 4)]
    side: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compare heuristics on random boards and save the results.
    Run(RunArgs),
    /// Solve one board and print every step.
    Solve {
        /// Heuristic to search with.
        #[arg(long, value_enum, default_value_t = Heuristic::LinearConflict)]
        heuristic: Heuristic,
        /// Tiles in row-major order, 0 for the blank.
        #[arg(required = true, num_args = 1..)]
        tiles: Vec<u8>,
    },
    /// Print a random solvable board.
    Generate {
        #[command(flatten)]
        walk: WalkArgs,
        /// Seed for the generator; omit for a random seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Recompute the summary table from a saved results file.
    Summarize {
        /// Results file written by `run`.
        #[arg(default_value = persistence::DEFAULT_RECORDS_CSV)]
        path: PathBuf,
    },
}

#[derive(Args)]
struct WalkArgs {
    /// Fewest random moves away from the goal.
    #[arg(long, default_value_t = 5)]
    min_moves: usize,
    /// Most random moves away from the goal.
    #[arg(long, default_value_t = 10)]
    max_moves: usize,
}

#[derive(Args)]
struct RunArgs {
    /// Number of random start boards.
    #[arg(long, default_value_t = 100)]
    trials: usize,
    #[command(flatten)]
    walk: WalkArgs,
    /// Heuristics to compare, in report order.
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = Heuristic::ALL)]
    heuristics: Vec<Heuristic>,
    /// Seed for the generator.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Draw a fresh seed from the OS instead of using `--seed`.
    #[arg(long)]
    random_seed: bool,
    /// Require every trial to start from a different board.
    #[arg(long)]
    distinct: bool,
    /// Where to write one row per search.
    #[arg(long, default_value = persistence::DEFAULT_RECORDS_CSV)]
    output: PathBuf,
    /// Where to write the per-heuristic summary.
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        let config = ExperimentConfig::default();
        Self {
            trials: config.trials,
            walk: WalkArgs {
                min_moves: config.walk.min_moves,
                max_moves: config.walk.max_moves,
            },
            heuristics: config.heuristics,
            seed: config.seed.unwrap_or(7),
            random_seed: false,
            distinct: config.distinct_states,
            output: PathBuf::from(persistence::DEFAULT_RECORDS_CSV),
            summary: None,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Run(args)) => run_experiment(cli.side, args),
        Some(Command::Solve { heuristic, tiles }) => run_solve(cli.side, heuristic, &tiles),
        Some(Command::Generate { walk, seed }) => run_generate(cli.side, &walk, seed),
        Some(Command::Summarize { path }) => run_summarize(cli.side, &path),
        // default: run the benchmark with default settings
        None => run_experiment(cli.side, RunArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn lookup(side: usize) -> Result<&'static dyn PuzzleOps, String> {
    puzzle_for_side(side).map_err(|e| format!("Invalid --side: {e}"))
}

/// Runs the benchmark, saves CSV files and prints the summary table.
fn run_experiment(side: usize, args: RunArgs) -> Result<(), String> {
    let puzzle = lookup(side)?;
    let config = ExperimentConfig {
        trials: args.trials,
        walk: WalkBounds {
            min_moves: args.walk.min_moves,
            max_moves: args.walk.max_moves,
        },
        heuristics: args.heuristics,
        seed: (!args.random_seed).then_some(args.seed),
        distinct_states: args.distinct,
    };

    info!(
        "running {} trials on the {}x{} puzzle, walks of {}..={} moves",
        config.trials, side, side, config.walk.min_moves, config.walk.max_moves
    );
    let report = puzzle
        .run_experiment(&config)
        .map_err(|e| format!("Invalid experiment: {e}"))?;

    persistence::save_records(&args.output, &report.records)
        .map_err(|e| format!("Failed to save {}: {e}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    if let Some(path) = &args.summary {
        persistence::save_summary(path, &report.summaries)
            .map_err(|e| format!("Failed to save {}: {e}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!();
    print!("{}", report.format_table());
    Ok(())
}

/// Solves one board and prints the path.
fn run_solve(side: usize, heuristic: Heuristic, tiles: &[u8]) -> Result<(), String> {
    let puzzle = lookup(side)?;
    let solution = puzzle
        .solve(tiles, heuristic)
        .map_err(|e| format!("Cannot solve board: {e}"))?;

    let Some(cost) = solution.outcome.cost else {
        println!(
            "No path to the goal ({} states expanded)",
            solution.outcome.expanded
        );
        return Ok(());
    };

    println!(
        "Found optimal solution with {} moves ({} states expanded, {heuristic})",
        cost, solution.outcome.expanded
    );
    for (step, board) in solution.steps.iter().enumerate() {
        println!("Step {step}:");
        print!("{}", puzzle.format_board(board).map_err(|e| e.to_string())?);
        println!();
    }
    Ok(())
}

/// Prints a random solvable board.
fn run_generate(side: usize, walk: &WalkArgs, seed: Option<u64>) -> Result<(), String> {
    let puzzle = lookup(side)?;
    let bounds = WalkBounds::new(walk.min_moves, walk.max_moves).map_err(|e| e.to_string())?;
    let tiles = puzzle.generate(bounds, seed).map_err(|e| e.to_string())?;

    print!("{}", puzzle.format_board(&tiles).map_err(|e| e.to_string())?);
    let row: Vec<String> = tiles.iter().map(u8::to_string).collect();
    println!("{}", row.join(" "));
    Ok(())
}

/// Reloads a results file and prints its summary table.
fn run_summarize(side: usize, path: &Path) -> Result<(), String> {
    let puzzle = lookup(side)?;
    let Some(records) = persistence::load_records(path) else {
        return Err(format!(
            "No readable results at {}. Run 'fifteen run' first.",
            path.display()
        ));
    };

    let heuristics = persistence::heuristics_in(&records);
    let trials = records.iter().map(|r| r.state_id).max().unwrap_or(0);
    let summaries = summarize(&records, &heuristics);
    print!("{}", format_summary_table(puzzle.side(), trials, &summaries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_options() {
        let cli = Cli::parse_from([
            "fifteen",
            "--side",
            "3",
            "run",
            "--trials",
            "4",
            "--heuristics",
            "h3,h1",
            "--min-moves",
            "2",
            "--max-moves",
            "6",
        ]);
        assert_eq!(cli.side, 3);
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected the run subcommand");
        };
        assert_eq!(args.trials, 4);
        assert_eq!(
            args.heuristics,
            vec![Heuristic::LinearConflict, Heuristic::Misplaced]
        );
        assert_eq!((args.walk.min_moves, args.walk.max_moves), (2, 6));
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn test_cli_parses_solve_tiles() {
        let cli = Cli::parse_from(["fifteen", "solve", "--heuristic", "h2", "1", "2", "0", "3"]);
        let Some(Command::Solve { heuristic, tiles }) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert_eq!(heuristic, Heuristic::Manhattan);
        assert_eq!(tiles, vec![1, 2, 0, 3]);
        assert_eq!(cli.side, 4);
    }

    #[test]
    fn test_default_run_args_match_config_defaults() {
        let args = RunArgs::default();
        assert_eq!(args.trials, 100);
        assert_eq!(args.heuristics, Heuristic::ALL.to_vec());
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn test_summarize_rejects_bad_side_before_reading() {
        for side in [0, 9] {
            let err = run_summarize(side, Path::new("no_such_results.csv")).unwrap_err();
            assert!(err.starts_with("Invalid --side"), "{err}");
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
