//! Benchmark runner comparing heuristics on shared start states.
//!
//! Every trial generates one start board and searches it once per
//! heuristic, so each heuristic sees exactly the same boards. Costs and
//! expansion counts are deterministic for a fixed seed; wall times are not.

use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::error::Error;
use crate::generator::{self, WalkBounds};
use crate::heuristics::Heuristic;
use crate::search::{self, SearchOutcome};
use crate::topology::Puzzle;

/// Generator draws allowed per requested trial before distinct-state
/// sampling gives up.
const DISTINCT_ATTEMPTS_PER_TRIAL: usize = 100;

/// Runner configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Number of start boards to generate.
    pub trials: usize,
    /// Random walk length range for start boards.
    pub walk: WalkBounds,
    /// Heuristics to compare, in report order.
    pub heuristics: Vec<Heuristic>,
    /// Seed for the board generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Require every trial to start from a different board.
    pub distinct_states: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            walk: WalkBounds::default(),
            heuristics: Heuristic::ALL.to_vec(),
            seed: Some(7),
            distinct_states: false,
        }
    }
}

impl ExperimentConfig {
    /// Rejects configurations that cannot produce a meaningful comparison.
    pub fn validate(&self) -> Result<(), Error> {
        if self.trials == 0 {
            return Err(Error::ZeroTrials);
        }
        if self.heuristics.is_empty() {
            return Err(Error::NoHeuristics);
        }
        self.walk.validate()
    }
}

/// One search: one start board under one heuristic.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRecord {
    /// 1-based index of the start board.
    pub state_id: usize,
    pub heuristic: Heuristic,
    pub outcome: SearchOutcome,
    pub elapsed: Duration,
}

/// Per-heuristic averages over the solved trials.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicSummary {
    pub heuristic: Heuristic,
    /// Trials where the goal was reached.
    pub solved: usize,
    pub avg_cost: f64,
    pub avg_expanded: f64,
    pub avg_time: Duration,
}

/// Everything a run produces: the raw records and their summary.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentReport {
    pub side: usize,
    pub trials: usize,
    pub records: Vec<TrialRecord>,
    pub summaries: Vec<HeuristicSummary>,
}

/// Runs the experiment with an RNG seeded from `config.seed`.
pub fn run<const SIDE: usize, const CELLS: usize>(
    puzzle: &Puzzle<SIDE, CELLS>,
    config: &ExperimentConfig,
) -> Result<ExperimentReport, Error> {
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    run_with_rng(puzzle, config, &mut rng)
}

/// Runs the experiment drawing start boards from `rng`.
pub fn run_with_rng<const SIDE: usize, const CELLS: usize, R: Rng + ?Sized>(
    puzzle: &Puzzle<SIDE, CELLS>,
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<ExperimentReport, Error> {
    config.validate()?;

    let starts = start_boards(puzzle, config, rng)?;
    let mut records = Vec::with_capacity(starts.len() * config.heuristics.len());

    for (index, start) in starts.iter().enumerate() {
        let state_id = index + 1;
        for &heuristic in &config.heuristics {
            let began = Instant::now();
            let outcome = search::solve(puzzle, start, heuristic);
            let elapsed = began.elapsed();

            info!(
                "[{state_id}/{}] {heuristic}: done in {:.2}s (cost={}, expanded={})",
                config.trials,
                elapsed.as_secs_f64(),
                outcome.reported_cost(),
                outcome.expanded
            );
            if !outcome.is_solved() {
                warn!("[{state_id}/{}] {heuristic}: goal unreachable", config.trials);
            }

            records.push(TrialRecord {
                state_id,
                heuristic,
                outcome,
                elapsed,
            });
        }
    }

    let summaries = summarize(&records, &config.heuristics);
    Ok(ExperimentReport {
        side: SIDE,
        trials: config.trials,
        records,
        summaries,
    })
}

/// Draws one start board per trial.
fn start_boards<const SIDE: usize, const CELLS: usize, R: Rng + ?Sized>(
    puzzle: &Puzzle<SIDE, CELLS>,
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<Vec<Board<CELLS>>, Error> {
    if !config.distinct_states {
        return Ok((0..config.trials)
            .map(|_| generator::generate(puzzle, config.walk, rng))
            .collect());
    }

    let mut seen = FxHashSet::default();
    let mut boards = Vec::with_capacity(config.trials);
    let max_attempts = config.trials.saturating_mul(DISTINCT_ATTEMPTS_PER_TRIAL);

    for _ in 0..max_attempts {
        if boards.len() == config.trials {
            break;
        }
        let board = generator::generate(puzzle, config.walk, rng);
        if seen.insert(board) {
            boards.push(board);
        }
    }

    if boards.len() < config.trials {
        return Err(Error::DistinctStatesExhausted {
            requested: config.trials,
            found: boards.len(),
        });
    }
    Ok(boards)
}

/// Averages solved records per heuristic, in the order given.
///
/// A heuristic with no solved trials reports zero averages.
pub fn summarize(records: &[TrialRecord], heuristics: &[Heuristic]) -> Vec<HeuristicSummary> {
    heuristics
        .iter()
        .map(|&heuristic| {
            let mut solved = 0usize;
            let mut cost_sum = 0u64;
            let mut expanded_sum = 0u64;
            let mut time_sum = Duration::ZERO;

            for record in records.iter().filter(|r| r.heuristic == heuristic) {
                if let Some(cost) = record.outcome.cost {
                    solved += 1;
                    cost_sum += u64::from(cost);
                    expanded_sum += record.outcome.expanded;
                    time_sum += record.elapsed;
                }
            }

            let (avg_cost, avg_expanded, avg_time) = if solved == 0 {
                (0.0, 0.0, Duration::ZERO)
            } else {
                (
                    cost_sum as f64 / solved as f64,
                    expanded_sum as f64 / solved as f64,
                    time_sum / solved as u32,
                )
            };

            HeuristicSummary {
                heuristic,
                solved,
                avg_cost,
                avg_expanded,
                avg_time,
            }
        })
        .collect()
}

impl ExperimentReport {
    /// Formats the summary as a fixed-width table.
    pub fn format_table(&self) -> String {
        format_summary_table(self.side, self.trials, &self.summaries)
    }
}

/// Formats summaries as a fixed-width table.
pub fn format_summary_table(side: usize, trials: usize, summaries: &[HeuristicSummary]) -> String {
    let tiles = (side * side).saturating_sub(1);
    let mut output = String::new();

    output.push_str(&format!("{tiles}-Puzzle A* Results ({trials} trials)\n"));
    output.push_str("Heuristic | Solved | Steps |    Nodes |   Time\n");
    output.push_str(&"-".repeat(46));
    output.push('\n');
    for summary in summaries {
        output.push_str(&format!(
            "{:<9} | {:>6} | {:>5.1} | {:>8.1} | {:.4}\n",
            summary.heuristic.name(),
            summary.solved,
            summary.avg_cost,
            summary.avg_expanded,
            summary.avg_time.as_secs_f64()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{EIGHT_PUZZLE, FIFTEEN_PUZZLE, TRIO_PUZZLE};

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            trials: 8,
            walk: WalkBounds::new(5, 12).unwrap(),
            heuristics: Heuristic::ALL.to_vec(),
            seed: Some(7),
            distinct_states: false,
        }
    }

    fn record(
        state_id: usize,
        heuristic: Heuristic,
        cost: Option<u32>,
        expanded: u64,
    ) -> TrialRecord {
        TrialRecord {
            state_id,
            heuristic,
            outcome: SearchOutcome { cost, expanded },
            elapsed: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = small_config();
        config.trials = 0;
        assert_eq!(run(&FIFTEEN_PUZZLE, &config), Err(Error::ZeroTrials));

        let mut config = small_config();
        config.heuristics.clear();
        assert_eq!(run(&FIFTEEN_PUZZLE, &config), Err(Error::NoHeuristics));

        let mut config = small_config();
        config.walk = WalkBounds {
            min_moves: 9,
            max_moves: 3,
        };
        assert!(matches!(
            run(&FIFTEEN_PUZZLE, &config),
            Err(Error::InvalidWalkBounds { .. })
        ));
    }

    #[test_log::test]
    fn test_every_heuristic_sees_every_state() {
        let config = small_config();
        let report = run(&FIFTEEN_PUZZLE, &config).unwrap();

        assert_eq!(report.records.len(), 8 * 3);
        assert_eq!(report.side, 4);
        for state_id in 1..=8 {
            let costs: Vec<Option<u32>> = report
                .records
                .iter()
                .filter(|r| r.state_id == state_id)
                .map(|r| r.outcome.cost)
                .collect();
            assert_eq!(costs.len(), 3);
            assert!(costs.iter().all(|c| c.is_some()), "generated states are solvable");
            assert!(costs.windows(2).all(|w| w[0] == w[1]), "optimal costs agree");
        }
        for summary in &report.summaries {
            assert_eq!(summary.solved, 8);
        }
    }

    #[test]
    fn test_seeded_runs_repeat_costs_and_expansions() {
        let config = small_config();
        let first = run(&EIGHT_PUZZLE, &config).unwrap();
        let second = run(&EIGHT_PUZZLE, &config).unwrap();

        let strip = |report: &ExperimentReport| -> Vec<(usize, Heuristic, SearchOutcome)> {
            report
                .records
                .iter()
                .map(|r| (r.state_id, r.heuristic, r.outcome))
                .collect()
        };
        assert_eq!(strip(&first), strip(&second));
    }

    #[test]
    fn test_heuristic_order_is_kept() {
        let mut config = small_config();
        config.heuristics = vec![Heuristic::LinearConflict, Heuristic::Misplaced];
        let report = run(&EIGHT_PUZZLE, &config).unwrap();
        let order: Vec<Heuristic> = report.summaries.iter().map(|s| s.heuristic).collect();
        assert_eq!(order, config.heuristics);
        assert_eq!(report.records[0].heuristic, Heuristic::LinearConflict);
        assert_eq!(report.records[1].heuristic, Heuristic::Misplaced);
    }

    #[test]
    fn test_distinct_states_are_distinct() {
        let mut config = small_config();
        config.trials = 20;
        config.distinct_states = true;

        let mut rng = SmallRng::seed_from_u64(3);
        let boards = start_boards(&FIFTEEN_PUZZLE, &config, &mut rng).unwrap();
        let unique: FxHashSet<_> = boards.iter().collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn test_distinct_states_give_up_on_tiny_boards() {
        // the 2x2 puzzle has only 12 reachable boards
        let config = ExperimentConfig {
            trials: 13,
            walk: WalkBounds::new(0, 12).unwrap(),
            heuristics: vec![Heuristic::Manhattan],
            seed: Some(1),
            distinct_states: true,
        };
        assert_eq!(
            run(&TRIO_PUZZLE, &config),
            Err(Error::DistinctStatesExhausted {
                requested: 13,
                found: 12
            })
        );
    }

    #[test]
    fn test_summary_skips_unsolved_records() {
        let records = vec![
            record(1, Heuristic::Manhattan, Some(4), 10),
            record(2, Heuristic::Manhattan, Some(6), 30),
            record(3, Heuristic::Manhattan, None, 500),
            record(1, Heuristic::Misplaced, None, 70),
        ];
        let summaries = summarize(&records, &[Heuristic::Manhattan, Heuristic::Misplaced]);

        assert_eq!(summaries[0].solved, 2);
        assert_eq!(summaries[0].avg_cost, 5.0);
        assert_eq!(summaries[0].avg_expanded, 20.0);
        assert_eq!(summaries[0].avg_time, Duration::from_millis(10));

        // no solved trials: zero averages instead of dividing by zero
        assert_eq!(summaries[1].solved, 0);
        assert_eq!(summaries[1].avg_cost, 0.0);
        assert_eq!(summaries[1].avg_expanded, 0.0);
    }

    #[test]
    fn test_summary_table_snapshot() {
        let records = vec![
            record(1, Heuristic::Misplaced, Some(6), 40),
            record(2, Heuristic::Misplaced, Some(8), 120),
            record(1, Heuristic::Manhattan, Some(6), 9),
            record(2, Heuristic::Manhattan, Some(8), 14),
            record(1, Heuristic::LinearConflict, Some(6), 7),
            record(2, Heuristic::LinearConflict, Some(8), 10),
        ];
        let summaries = summarize(&records, &Heuristic::ALL);
        let table = format_summary_table(4, 2, &summaries);

        insta::assert_snapshot!(table, @r"
        15-Puzzle A* Results (2 trials)
        Heuristic | Solved | Steps |    Nodes |   Time
        ----------------------------------------------
        h1        |      2 |   7.0 |     80.0 | 0.0100
        h2        |      2 |   7.0 |     11.5 | 0.0100
        h3        |      2 |   7.0 |      8.5 | 0.0100
        ");
    }

    #[test]
    fn test_summary_table_tolerates_empty_grid() {
        let table = format_summary_table(0, 0, &[]);
        assert!(table.starts_with("0-Puzzle A* Results (0 trials)\n"));
        assert_eq!(table.lines().count(), 3);
    }
}
