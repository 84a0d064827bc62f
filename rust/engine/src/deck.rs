use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Remaining cards of the round's deck, persisted with the game snapshot.
///
/// The last element is the top of the deck. The deck is only rebuilt by
/// [`Deck::reset`] at the start of a round; drawing past the bottom is an
/// error rather than a silent reshuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh, shuffled 52-card deck.
    pub fn shuffled(rng: &mut dyn RngCore) -> Self {
        let mut deck = Self::default();
        deck.reset(rng);
        deck
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Restore a deck from persisted cards (top of deck last).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Regenerate all 52 cards and shuffle them.
    pub fn reset(&mut self, rng: &mut dyn RngCore) {
        self.cards = full_deck();
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::DeckExhausted);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
