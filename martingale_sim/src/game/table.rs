use martingale_lib::{hand_value, Card, Shoe};
use rand::rngs::StdRng;

/// A fresh shoe is brought in before a hand once fewer than this many cards
/// remain.
pub const RESHUFFLE_THRESHOLD: usize = 20;

/// Both the fixed player policy and the dealer draw below this total and
/// stand at or above it.
const STAND_TOTAL: u8 = 17;

/// How a single hand resolved for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

/// Struct that simulates the table for one bankroll lifetime. Owns the shoe
/// carried from hand to hand and the lifetime's private random source.
pub struct TableSim {
    shoe: Shoe,
    rng: StdRng,
}

impl TableSim {
    /// Associated function to create a new `TableSim` with a freshly
    /// shuffled shoe drawn from the given random source.
    pub fn new(mut rng: StdRng) -> TableSim {
        let shoe = Shoe::shuffled(&mut rng);
        TableSim { shoe, rng }
    }

    /// Deals the next card. If the shoe runs out mid-hand a fresh shoe
    /// silently takes over so play can continue; this reproduces the
    /// original simulator's behavior and is intentional.
    fn next_card(&mut self) -> Card {
        if let Some(card) = self.shoe.deal() {
            return card;
        }
        self.shoe = Shoe::shuffled(&mut self.rng);
        match self.shoe.deal() {
            Some(card) => card,
            // A fresh shoe always holds SHOE_SIZE cards
            None => unreachable!("freshly created shoe dealt empty"),
        }
    }

    /// Method that plays one complete hand: deals two cards each to player
    /// and dealer, applies the fixed hit-below-17 player policy, lets the
    /// dealer draw to 17, and resolves the result.
    pub fn play_hand(&mut self) -> Outcome {
        if self.shoe.remaining() < RESHUFFLE_THRESHOLD {
            self.shoe = Shoe::shuffled(&mut self.rng);
        }

        let mut player = vec![self.next_card(), self.next_card()];
        let mut dealer = vec![self.next_card(), self.next_card()];

        // Player plays first, standing at 17 or more regardless of bust risk
        while hand_value(&player) < STAND_TOTAL {
            player.push(self.next_card());
        }
        let player_total = hand_value(&player);
        if player_total > 21 {
            // Player busts before the dealer acts; dealer cards stay unplayed
            return Outcome::Loss;
        }

        while hand_value(&dealer) < STAND_TOTAL {
            dealer.push(self.next_card());
        }
        let dealer_total = hand_value(&dealer);

        if dealer_total > 21 || player_total > dealer_total {
            Outcome::Win
        } else if player_total < dealer_total {
            Outcome::Loss
        } else {
            Outcome::Push
        }
    }
}
