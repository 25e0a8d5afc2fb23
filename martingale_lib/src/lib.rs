//! Core card game primitives shared by the martingale simulator: the `Card`
//! type, the multi-deck `Shoe` and the hand valuation function.

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of 52-card sets combined into one shoe, like most casinos use.
pub const DECKS_PER_SHOE: usize = 6;

/// Total number of cards in a freshly created shoe.
pub const SHOE_SIZE: usize = DECKS_PER_SHOE * 52;

/// The thirteen ranks with their initial blackjack values. Aces start at 11
/// and are softened to 1 during hand valuation when the total busts.
const RANKS: [(&str, u8); 13] = [
    ("2", 2),
    ("3", 3),
    ("4", 4),
    ("5", 5),
    ("6", 6),
    ("7", 7),
    ("8", 8),
    ("9", 9),
    ("10", 10),
    ("J", 10),
    ("Q", 10),
    ("K", 10),
    ("A", 11),
];

/// A single playing card. Suits have no effect on any outcome so only the
/// rank is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub rank: &'static str,
    pub val: u8,
}

impl Card {
    /// Associated function for creating a card from its rank symbol.
    /// Panics on an unrecognized rank, which is a programming error.
    pub fn of(rank: &'static str) -> Card {
        match RANKS.iter().find(|(r, _)| *r == rank) {
            Some(&(rank, val)) => Card { rank, val },
            None => panic!("unrecognized card rank: {}", rank),
        }
    }
}

/// The working supply of cards for a sequence of hands. Cards are dealt from
/// the top and never returned; the only way the composition changes is a
/// wholesale replacement with a fresh shuffled shoe.
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Associated function for creating a freshly shuffled shoe containing
    /// `DECKS_PER_SHOE` complete 52-card sets.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Shoe {
        let mut cards = Vec::with_capacity(SHOE_SIZE);
        for _ in 0..DECKS_PER_SHOE {
            for _suit in 0..4 {
                for &(rank, val) in RANKS.iter() {
                    cards.push(Card { rank, val });
                }
            }
        }
        cards.shuffle(rng);
        Shoe { cards }
    }

    /// Associated function for building a shoe with a predetermined deal
    /// order. `cards` is listed in the order the cards will come off the top.
    pub fn stacked(cards: Vec<Card>) -> Shoe {
        Shoe {
            cards: cards.into_iter().rev().collect(),
        }
    }

    /// Method that removes and returns the top card, or `None` when the shoe
    /// has run out.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Getter method for the number of undealt cards left in the shoe.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Computes the best total for a hand under blackjack scoring. Every ace is
/// counted as 11 first, then aces are softened to 1 one at a time while the
/// total exceeds 21. The returned total may still exceed 21, signaling a
/// bust. Pure and independent of card order.
pub fn hand_value(hand: &[Card]) -> u8 {
    let mut total: u16 = hand.iter().map(|card| card.val as u16).sum();
    let mut aces = hand.iter().filter(|card| card.rank == "A").count();
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total as u8
}
