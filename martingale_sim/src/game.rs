//! Module that focuses on the simulation of a single bankroll lifetime:
//! the table for one player, the martingale bet sizing and the state machine
//! driving repeated hands until the bankroll can no longer cover a wager.

pub mod strategy;
pub mod table;

pub mod prelude {
    pub use super::strategy::{BettingStrategy, MartingaleStrategy};
    pub use super::table::{Outcome, TableSim};
    pub use super::{BankrollState, LifetimeSim, SimulationResult, MAX_HANDS_PER_LIFETIME};
}

pub use prelude::*;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Hard cap on hands per lifetime; keeps a near-break-even bankroll from
/// playing forever.
pub const MAX_HANDS_PER_LIFETIME: u32 = 1000;

/// Snapshot of one bankroll partway through a lifetime. Transitions do not
/// mutate in place; `settle` consumes the state and returns its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankrollState {
    pub balance: u64,
    pub bet: u64,
    pub hands_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub max_balance: u64,
    pub min_balance: u64,
}

impl BankrollState {
    /// Associated function for the state at the start of a lifetime.
    pub fn opening(starting_bankroll: u64, opening_bet: u64) -> BankrollState {
        BankrollState {
            balance: starting_bankroll,
            bet: opening_bet,
            hands_played: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            max_balance: starting_bankroll,
            min_balance: starting_bankroll,
        }
    }

    /// Method that reports whether another hand may be wagered: the balance
    /// must cover the current bet and the hand cap must not be reached.
    pub fn can_wager(&self) -> bool {
        self.balance >= self.bet && self.hands_played < MAX_HANDS_PER_LIFETIME
    }

    /// Settles one resolved hand: the wager is debited, the outcome credits
    /// double the stake on a win, nothing on a loss, or the stake back on a
    /// push, and `strategy` sizes the next bet. Returns the successor state.
    pub fn settle<B: BettingStrategy>(self, outcome: Outcome, strategy: &B) -> BankrollState {
        let at_risk = self.balance - self.bet;
        let (balance, wins, losses, pushes) = match outcome {
            Outcome::Win => (at_risk + 2 * self.bet, self.wins + 1, self.losses, self.pushes),
            Outcome::Loss => (at_risk, self.wins, self.losses + 1, self.pushes),
            Outcome::Push => (at_risk + self.bet, self.wins, self.losses, self.pushes + 1),
        };
        BankrollState {
            balance,
            bet: strategy.next_bet(self.bet, outcome),
            hands_played: self.hands_played + 1,
            wins,
            losses,
            pushes,
            max_balance: u64::max(self.max_balance, balance),
            min_balance: u64::min(self.min_balance, balance),
        }
    }
}

/// Immutable record of one finished bankroll lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub final_bankroll: u64,
    pub hands_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub max_bankroll: u64,
    pub min_bankroll: u64,
    pub profit_loss: i64,
    pub went_broke: bool,
}

/// Struct that drives repeated hands for one simulated bankroll, applying
/// martingale bet sizing until a termination condition is met.
pub struct LifetimeSim {
    table: TableSim,
    strategy: MartingaleStrategy,
    starting_bankroll: u64,
    base_bet: u64,
}

impl LifetimeSim {
    /// Associated function to create a new `LifetimeSim` with its own shoe
    /// and its own random source seeded from `seed`.
    pub fn new(starting_bankroll: u64, base_bet: u64, max_bet: u64, seed: u64) -> LifetimeSim {
        LifetimeSim {
            table: TableSim::new(StdRng::seed_from_u64(seed)),
            strategy: MartingaleStrategy::new(base_bet, max_bet),
            starting_bankroll,
            base_bet,
        }
    }

    /// Method that plays hands until the bankroll cannot cover the current
    /// bet or the hand cap is reached, then summarizes the lifetime. A base
    /// bet above the starting bankroll plays zero hands and reports broke.
    pub fn run(mut self) -> SimulationResult {
        let mut state = BankrollState::opening(self.starting_bankroll, self.strategy.opening_bet());
        while state.can_wager() {
            let outcome = self.table.play_hand();
            state = state.settle(outcome, &self.strategy);
        }
        SimulationResult {
            final_bankroll: state.balance,
            hands_played: state.hands_played,
            wins: state.wins,
            losses: state.losses,
            pushes: state.pushes,
            max_bankroll: state.max_balance,
            min_bankroll: state.min_balance,
            profit_loss: state.balance as i64 - self.starting_bankroll as i64,
            went_broke: state.balance < self.base_bet,
        }
    }
}
