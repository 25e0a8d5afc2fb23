pub mod game;
pub mod stats;

pub use game::prelude::*;

use game::LifetimeSim;
use std::error::Error;
use std::fmt::Display;
use std::sync::mpsc;
use std::thread;

pub mod prelude {
    pub use super::game::prelude::*;
    pub use super::stats::AggregateReport;
    pub use super::{SimulationError, Simulator, SimulatorConfig, SimulatorConfigBuilder};
}

/// Per-run increment applied to the base seed so every lifetime draws from
/// its own random stream regardless of which worker runs it.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
pub enum SimulationError {
    SendingError(String),
    WorkerError(String),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::SendingError(s) | SimulationError::WorkerError(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl Error for SimulationError {}

/// Struct for configuring a `Simulator` run: the bankroll parameters, the
/// number of independent lifetimes and an optional fixed seed.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorConfig {
    pub starting_bankroll: u64,
    pub base_bet: u64,
    pub max_bet: u64,
    pub num_simulations: u32,
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// Associated method for returning a new `SimulatorConfigBuilder`
    /// object, allowing the caller to customize any subset of parameters.
    pub fn new() -> SimulatorConfigBuilder {
        SimulatorConfigBuilder {
            starting_bankroll: None,
            base_bet: None,
            max_bet: None,
            num_simulations: None,
            seed: None,
        }
    }
}

impl Default for SimulatorConfig {
    /// Returns the standard parameters: bankroll 1000, base bet 10, max bet
    /// 500, 100 simulations, entropy-derived seed.
    fn default() -> Self {
        SimulatorConfig::new().build()
    }
}

/// Struct to implement the builder pattern for `SimulatorConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorConfigBuilder {
    starting_bankroll: Option<u64>,
    base_bet: Option<u64>,
    max_bet: Option<u64>,
    num_simulations: Option<u32>,
    seed: Option<u64>,
}

impl SimulatorConfigBuilder {
    /// Method for setting the starting bankroll of each lifetime.
    pub fn starting_bankroll(&mut self, bankroll: u64) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    /// Method for setting the base bet, also the post-win reset amount.
    pub fn base_bet(&mut self, bet: u64) -> &mut Self {
        self.base_bet = Some(bet);
        self
    }

    /// Method for setting the ceiling on martingale escalation.
    pub fn max_bet(&mut self, bet: u64) -> &mut Self {
        self.max_bet = Some(bet);
        self
    }

    /// Method for setting the number of independent lifetimes to run.
    pub fn num_simulations(&mut self, n: u32) -> &mut Self {
        self.num_simulations = Some(n);
        self
    }

    /// Method for fixing the base seed, making the whole run reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for building a `SimulatorConfig` from the given builder.
    pub fn build(&mut self) -> SimulatorConfig {
        SimulatorConfig {
            starting_bankroll: self.starting_bankroll.unwrap_or(1000),
            base_bet: self.base_bet.unwrap_or(10),
            max_bet: self.max_bet.unwrap_or(500),
            num_simulations: self.num_simulations.unwrap_or(100),
            seed: self.seed,
        }
    }
}

/// Struct for running many independent bankroll lifetimes and collecting one
/// result record per run. Lifetimes share no state, so they are fanned out
/// across worker threads and their results gathered over a channel.
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Associated function to create a new `Simulator` from a config.
    pub fn new(config: SimulatorConfig) -> Simulator {
        Simulator { config }
    }

    /// Method that executes `num_simulations` lifetimes, each with its own
    /// shoe and its own seeded random source, and returns the results
    /// ordered by run index. The ordering and the per-run seeds are
    /// independent of how runs were scheduled across workers.
    pub fn run(&self) -> Result<Vec<SimulationResult>, SimulationError> {
        let config = self.config;
        let n = config.num_simulations as usize;
        if n == 0 {
            return Ok(Vec::new());
        }
        let base_seed = config.seed.unwrap_or_else(rand::random);

        let workers = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)
            .min(n);
        let (sender, receiver) = mpsc::channel::<(usize, SimulationResult)>();

        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let sender = sender.clone();
            let handle = thread::spawn(move || -> Result<(), SimulationError> {
                let mut run = worker;
                while run < n {
                    let seed = base_seed.wrapping_add((run as u64).wrapping_mul(SEED_STRIDE));
                    let lifetime = LifetimeSim::new(
                        config.starting_bankroll,
                        config.base_bet,
                        config.max_bet,
                        seed,
                    );
                    if let Err(e) = sender.send((run, lifetime.run())) {
                        return Err(SimulationError::SendingError(format!("{}", e)));
                    }
                    run += workers;
                }
                Ok(())
            });
            handles.push(handle);
        }
        // Drop the original sender so the receiver ends with the workers
        drop(sender);

        let mut slots: Vec<Option<SimulationResult>> = vec![None; n];
        for (run, result) in receiver {
            slots[run] = Some(result);
        }

        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    return Err(SimulationError::WorkerError(
                        "simulation worker panicked".to_string(),
                    ))
                }
            }
        }

        let mut results = Vec::with_capacity(n);
        for slot in slots {
            match slot {
                Some(result) => results.push(result),
                None => {
                    return Err(SimulationError::WorkerError(
                        "missing result for a simulation run".to_string(),
                    ))
                }
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::AggregateReport;

    #[test]
    fn runner_returns_one_result_per_requested_run() {
        let config = SimulatorConfig::new()
            .num_simulations(16)
            .seed(2024)
            .build();
        let results = Simulator::new(config).run().unwrap();
        assert_eq!(results.len(), 16);
        for result in &results {
            assert_eq!(
                result.wins + result.losses + result.pushes,
                result.hands_played
            );
            assert!(result.hands_played <= MAX_HANDS_PER_LIFETIME);
        }
    }

    #[test]
    fn runs_are_reproducible_under_a_fixed_seed() {
        let config = SimulatorConfig::new().num_simulations(8).seed(99).build();
        let first = Simulator::new(config).run().unwrap();
        let second = Simulator::new(config).run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_simulations_yield_an_empty_collection() {
        let config = SimulatorConfig::new().num_simulations(0).build();
        let results = Simulator::new(config).run().unwrap();
        assert!(results.is_empty());
        // Aggregation over the empty collection must stay well-formed
        let report = AggregateReport::from_results(&config, &results);
        assert_eq!(report.total_hands, 0);
    }

    #[test]
    fn unplayable_configuration_reports_every_run_broke() {
        let config = SimulatorConfig::new()
            .starting_bankroll(5)
            .base_bet(10)
            .num_simulations(4)
            .seed(1)
            .build();
        let results = Simulator::new(config).run().unwrap();
        for result in &results {
            assert_eq!(result.hands_played, 0);
            assert_eq!(result.final_bankroll, 5);
            assert!(result.went_broke);
        }
        let report = AggregateReport::from_results(&config, &results);
        assert_eq!(report.went_broke, 4);
        assert_eq!(report.went_broke_pct, 100.0);
        assert_eq!(report.avg_hands, 0.0);
    }

    #[test]
    fn distinct_seeds_give_distinct_outcome_streams() {
        let first = Simulator::new(SimulatorConfig::new().num_simulations(4).seed(7).build())
            .run()
            .unwrap();
        let second = Simulator::new(SimulatorConfig::new().num_simulations(4).seed(8).build())
            .run()
            .unwrap();
        assert_ne!(first, second);
    }
}
