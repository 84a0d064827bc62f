//! Card, board and action formatters for terminal display.
//!
//! Suits print as Unicode symbols where the terminal can render them and as
//! lowercase letters otherwise:
//!
//! - **Unicode mode**: ♥ ♦ ♣ ♠
//! - **ASCII mode**: h d c s
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::logger::ActionRecord;
use holdem_engine::player::{ActionKind, PlayerAction};

/// Whether the terminal can draw suit symbols.
///
/// On Windows only Windows Terminal, VS Code and terminals announcing
/// `TERM_PROGRAM` are trusted; everything else is assumed to cope.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
    }
}

/// Single-character rank (2-9, T, J, Q, K, A).
pub fn format_rank(rank: &Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards in brackets separated by spaces, e.g. `[A♠ K♥ 7♦]`.
pub fn format_board(cards: &[Card]) -> String {
    let inner: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", inner.join(" "))
}

/// Action as the player would type it.
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(extra) => format!("raise {}", extra),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

/// One line of the action log, e.g. `bob calls 20`.
pub fn format_record(record: &ActionRecord) -> String {
    let who = record.player.as_str();
    match record.kind {
        ActionKind::Fold => format!("{} folds", who),
        ActionKind::Check => format!("{} checks", who),
        ActionKind::Call => format!("{} calls {}", who, record.amount),
        ActionKind::Raise => format!("{} raises, putting in {}", who, record.amount),
        ActionKind::AllIn => format!("{} is all-in for {}", who, record.amount),
    }
}
