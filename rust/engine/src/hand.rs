use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Hand category, ordered weakest to strongest. The discriminant is the rank (0-9).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Post-flop strength for each category rank, on the 1-10 scale.
const POSTFLOP_STRENGTH: [u8; 10] = [1, 2, 3, 5, 6, 7, 8, 9, 10, 10];

/// Classify exactly five cards.
pub fn classify(cards: &[Card; 5]) -> Category {
    let mut values: Vec<u8> = cards.iter().map(Card::value).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let is_straight = is_straight(&values);

    let mut rank_counts = [0u8; 15];
    for &v in &values {
        rank_counts[v as usize] += 1;
    }
    let mut counts: Vec<u8> = rank_counts.iter().copied().filter(|&c| c > 0).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    if is_straight && is_flush {
        return if values[0] == 14 && values[4] == 10 {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        };
    }
    match counts.as_slice() {
        [4, ..] => Category::FourOfAKind,
        [3, 2] => Category::FullHouse,
        _ if is_flush => Category::Flush,
        _ if is_straight => Category::Straight,
        [3, ..] => Category::ThreeOfAKind,
        [2, 2, ..] => Category::TwoPair,
        [2, ..] => Category::OnePair,
        _ => Category::HighCard,
    }
}

/// `values` must be sorted descending.
fn is_straight(values: &[u8]) -> bool {
    // A-2-3-4-5, the ace plays low
    if values == [14, 5, 4, 3, 2] {
        return true;
    }
    values.windows(2).all(|w| w[0] == w[1] + 1)
}

/// Best category over every 5-card subset of `cards` (at most 21 subsets for 7 cards).
pub fn best_of(cards: &[Card]) -> Result<Category, GameError> {
    let n = cards.len();
    if n < 5 {
        return Err(GameError::NotEnoughCards {
            needed: 5,
            actual: n,
        });
    }
    let mut best = Category::HighCard;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(classify(&five));
                    }
                }
            }
        }
    }
    Ok(best)
}

/// Heuristic hand strength on a 1-10 scale, used by automated players.
///
/// With no community cards the two hole cards are rated from a starting-hand
/// chart. Afterwards the best available category is mapped through a fixed
/// table; fewer than five known cards rate as 1.
pub fn strength(hole: &[Card], community: &[Card]) -> u8 {
    if community.is_empty() {
        return match hole {
            [a, b] => preflop_strength(*a, *b),
            _ => 1,
        };
    }
    let mut all = Vec::with_capacity(hole.len() + community.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(community);
    match best_of(&all) {
        Ok(category) => POSTFLOP_STRENGTH[category.rank() as usize],
        Err(_) => 1,
    }
}

fn preflop_strength(a: Card, b: Card) -> u8 {
    let (high, low) = if a.value() >= b.value() {
        (a.value(), b.value())
    } else {
        (b.value(), a.value())
    };
    let suited = a.suit == b.suit;

    if high == low {
        return match high {
            13..=14 => 10, // AA, KK
            11..=12 => 9,  // QQ, JJ
            9..=10 => 8,   // TT, 99
            _ => 7,
        };
    }
    // AK, AQ
    if high == 14 && low >= 12 {
        return if suited { 9 } else { 8 };
    }
    if high >= 12 && low >= 10 {
        return if suited { 7 } else { 6 };
    }
    if high >= 10 {
        return if suited { 5 } else { 4 };
    }
    if suited {
        3
    } else {
        2
    }
}
