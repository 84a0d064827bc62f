use holdem_engine::cards::{full_deck, Card, Rank as R, Suit as S};
use holdem_engine::errors::GameError;
use holdem_engine::hand::{best_of, classify, strength, Category};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

#[test]
fn detects_royal_flush() {
    let five = [
        c(S::Spades, R::Ace),
        c(S::Spades, R::King),
        c(S::Spades, R::Queen),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Ten),
    ];
    assert_eq!(classify(&five), Category::RoyalFlush);
    assert_eq!(classify(&five).rank(), 9);
}

#[test]
fn detects_full_house() {
    let five = [
        c(S::Clubs, R::Two),
        c(S::Diamonds, R::Two),
        c(S::Hearts, R::Two),
        c(S::Spades, R::Five),
        c(S::Clubs, R::Five),
    ];
    assert_eq!(classify(&five), Category::FullHouse);
    assert_eq!(classify(&five).rank(), 6);
}

#[test]
fn mixed_suit_wheel_is_a_straight() {
    let five = [
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::Two),
        c(S::Hearts, R::Three),
        c(S::Spades, R::Four),
        c(S::Clubs, R::Five),
    ];
    assert_eq!(classify(&five), Category::Straight);
}

#[test]
fn suited_wheel_is_a_straight_flush_not_royal() {
    let five = [
        c(S::Hearts, R::Ace),
        c(S::Hearts, R::Two),
        c(S::Hearts, R::Three),
        c(S::Hearts, R::Four),
        c(S::Hearts, R::Five),
    ];
    assert_eq!(classify(&five), Category::StraightFlush);
}

#[test]
fn each_category_is_recognised() {
    let cases = [
        (
            [
                c(S::Clubs, R::Ace),
                c(S::Diamonds, R::Ace),
                c(S::Hearts, R::Ace),
                c(S::Spades, R::Ace),
                c(S::Clubs, R::King),
            ],
            Category::FourOfAKind,
        ),
        (
            [
                c(S::Clubs, R::Two),
                c(S::Clubs, R::Nine),
                c(S::Clubs, R::Jack),
                c(S::Clubs, R::Four),
                c(S::Clubs, R::King),
            ],
            Category::Flush,
        ),
        (
            [
                c(S::Clubs, R::Seven),
                c(S::Diamonds, R::Seven),
                c(S::Hearts, R::Seven),
                c(S::Spades, R::Two),
                c(S::Clubs, R::King),
            ],
            Category::ThreeOfAKind,
        ),
        (
            [
                c(S::Clubs, R::Seven),
                c(S::Diamonds, R::Seven),
                c(S::Hearts, R::King),
                c(S::Spades, R::King),
                c(S::Clubs, R::Two),
            ],
            Category::TwoPair,
        ),
        (
            [
                c(S::Clubs, R::Seven),
                c(S::Diamonds, R::Seven),
                c(S::Hearts, R::King),
                c(S::Spades, R::Queen),
                c(S::Clubs, R::Two),
            ],
            Category::OnePair,
        ),
        (
            [
                c(S::Clubs, R::Seven),
                c(S::Diamonds, R::Nine),
                c(S::Hearts, R::King),
                c(S::Spades, R::Queen),
                c(S::Clubs, R::Two),
            ],
            Category::HighCard,
        ),
    ];
    for (five, expected) in cases {
        assert_eq!(classify(&five), expected, "{five:?}");
    }
}

#[test]
fn best_of_seven_is_at_least_every_subset() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut deck = full_deck();
        deck.shuffle(&mut rng);
        let seven = &deck[..7];
        let best = best_of(seven).unwrap();
        let mut max_seen = Category::HighCard;
        for skip_a in 0..7 {
            for skip_b in skip_a + 1..7 {
                let five: Vec<Card> = (0..7)
                    .filter(|&i| i != skip_a && i != skip_b)
                    .map(|i| seven[i])
                    .collect();
                let five: [Card; 5] = five.try_into().unwrap();
                let cat = classify(&five);
                assert!(best >= cat);
                max_seen = max_seen.max(cat);
            }
        }
        assert_eq!(best, max_seen);
    }
}

#[test]
fn best_of_finds_flush_among_seven() {
    let seven = [
        c(S::Hearts, R::Two),
        c(S::Hearts, R::Nine),
        c(S::Clubs, R::Nine),
        c(S::Hearts, R::Jack),
        c(S::Diamonds, R::Nine),
        c(S::Hearts, R::Four),
        c(S::Hearts, R::King),
    ];
    assert_eq!(best_of(&seven), Ok(Category::Flush));
}

#[test]
fn best_of_needs_five_cards() {
    let err = best_of(&[c(S::Hearts, R::Two)]).unwrap_err();
    assert_eq!(err, GameError::NotEnoughCards { needed: 5, actual: 1 });
    assert!(!err.is_rejection());
}

#[test]
fn strength_scales_from_chart_to_table() {
    let aces = [c(S::Hearts, R::Ace), c(S::Spades, R::Ace)];
    assert_eq!(strength(&aces, &[]), 10);

    let board = [
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::Ace),
        c(S::Hearts, R::King),
        c(S::Spades, R::Two),
        c(S::Clubs, R::Seven),
    ];
    // four aces map to 9
    assert_eq!(strength(&aces, &board), 9);

    let royal = [
        c(S::Spades, R::King),
        c(S::Spades, R::Queen),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Ten),
        c(S::Clubs, R::Two),
    ];
    assert_eq!(strength(&[c(S::Spades, R::Ace), c(S::Hearts, R::Three)], &royal), 10);
}
