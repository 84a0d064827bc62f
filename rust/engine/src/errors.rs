use thiserror::Error;

use crate::game::GameId;
use crate::player::PlayerId;
use crate::round::Phase;

/// Errors reported by game operations.
///
/// Most variants are rejections of a request (bad parameters, wrong turn,
/// illegal action) and leave the game untouched. [`GameError::DeckExhausted`],
/// [`GameError::NotEnoughCards`] and [`GameError::Store`] are faults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Game name must not be empty")]
    EmptyName,
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error("Game has already started")]
    GameNotWaiting,
    #[error("Game is not in progress")]
    GameNotInProgress,
    #[error("Game is full")]
    GameFull,
    #[error("Player {0} is already seated in this game")]
    AlreadySeated(PlayerId),
    #[error("Player {0} is not seated in this game")]
    NotSeated(PlayerId),
    #[error("At least {needed} players are required, found {actual}")]
    NotEnoughPlayers { needed: usize, actual: usize },
    #[error("No active round")]
    NoActiveRound,
    #[error("Betting is closed during {0:?}")]
    BettingClosed(Phase),
    #[error("Player is not active")]
    PlayerNotActive,
    #[error("It's not seat {seat}'s turn")]
    NotPlayersTurn { seat: usize },
    #[error("Betting is still open in this phase")]
    BettingInProgress,
    #[error("Cannot check, {to_call} to call")]
    CannotCheck { to_call: u32 },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Deck is exhausted")]
    DeckExhausted,
    #[error("Hand evaluation needs at least {needed} cards, got {actual}")]
    NotEnoughCards { needed: usize, actual: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GameError {
    /// Stable machine-readable code for hosts.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidConfig(_) => "invalid_config",
            GameError::EmptyName => "empty_name",
            GameError::GameNotFound(_) => "game_not_found",
            GameError::GameNotWaiting => "game_already_started",
            GameError::GameNotInProgress => "game_not_in_progress",
            GameError::GameFull => "game_full",
            GameError::AlreadySeated(_) => "already_seated",
            GameError::NotSeated(_) => "not_seated",
            GameError::NotEnoughPlayers { .. } => "not_enough_players",
            GameError::NoActiveRound => "no_active_round",
            GameError::BettingClosed(_) => "betting_closed",
            GameError::PlayerNotActive => "player_not_active",
            GameError::NotPlayersTurn { .. } => "not_your_turn",
            GameError::BettingInProgress => "betting_in_progress",
            GameError::CannotCheck { .. } => "cannot_check",
            GameError::InvalidBetAmount { .. } => "invalid_bet_amount",
            GameError::DeckExhausted => "deck_exhausted",
            GameError::NotEnoughCards { .. } => "not_enough_cards",
            GameError::Store(_) => "store_failure",
        }
    }

    /// True for user-facing rejections, false for faults the host must surface.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            GameError::DeckExhausted | GameError::NotEnoughCards { .. } | GameError::Store(_)
        )
    }
}

/// Failure reported by a [`crate::store::GameStore`] implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("record conflict: {0}")]
    Conflict(String),
}
