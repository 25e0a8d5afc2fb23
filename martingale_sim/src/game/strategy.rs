use crate::game::table::Outcome;

/// Trait for a bet sizing policy. Decides the opening wager of a lifetime
/// and the wager for the next hand given how the previous one resolved.
pub trait BettingStrategy {
    /// The wager placed on the first hand of a lifetime.
    fn opening_bet(&self) -> u64;
    /// The wager for the next hand, given the previous wager and its outcome.
    fn next_bet(&self, previous_bet: u64, outcome: Outcome) -> u64;
}

/// Classic martingale sizing: reset to the base bet after a win, double the
/// wager after a loss up to a configured ceiling, hold after a push.
pub struct MartingaleStrategy {
    base_bet: u64,
    max_bet: u64,
}

impl MartingaleStrategy {
    /// Associated method for returning a new `MartingaleStrategy` struct.
    pub fn new(base_bet: u64, max_bet: u64) -> MartingaleStrategy {
        MartingaleStrategy { base_bet, max_bet }
    }
}

impl BettingStrategy for MartingaleStrategy {
    fn opening_bet(&self) -> u64 {
        self.base_bet
    }

    fn next_bet(&self, previous_bet: u64, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Win => self.base_bet,
            Outcome::Loss => u64::min(previous_bet * 2, self.max_bet),
            Outcome::Push => previous_bet,
        }
    }
}
